use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use lotto_data::models::{DrawHistory, Number};

use crate::analysis::{FrequencyTag, NumberStats};
use crate::report::AnalysisResult;

fn join_numbers(numbers: &[Number]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_report(report: &AnalysisResult) {
    println!("\n🎲 Grille générée ({} tirages analysés)\n", report.draw_count);

    let mut table = new_table(vec!["Numéros", "Complémentaire"]);
    let bonus = match report.predicted_bonus() {
        Some(b) => b.to_string(),
        None => "—".to_string(),
    };
    table.add_row(vec![join_numbers(&report.numbers), bonus]);
    println!("{table}");

    println!("\n── Numéros les plus fréquents ──");
    display_ranking(&report.main_top);

    println!("\n── Complémentaire le plus fréquent ──");
    display_ranking(&report.bonus_top);
}

fn display_ranking(ranking: &[(Number, u32)]) {
    if ranking.is_empty() {
        println!("Aucun historique.");
        return;
    }
    let mut table = new_table(vec!["#", "Numéro", "Sorties"]);
    for (i, (number, count)) in ranking.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            format!("{:2}", number),
            count.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_uniform(numbers: &[Number]) {
    println!("\n🎰 Tirage aléatoire\n");
    let mut table = new_table(vec!["Numéros"]);
    table.add_row(vec![join_numbers(numbers)]);
    println!("{table}");
}

pub fn display_history(history: &DrawHistory, last: Option<usize>) {
    if history.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let skip = last.map_or(0, |n| history.len().saturating_sub(n));
    let mut table = new_table(vec!["Tirage", "Numéros", "Complémentaire"]);

    for (i, record) in history.records().enumerate().skip(skip) {
        table.add_row(vec![
            (i + 1).to_string(),
            join_numbers(&record.main),
            record.bonus.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_stats(main_stats: &[NumberStats], bonus_stats: &[NumberStats], draw_count: usize) {
    println!("\n📊 Statistiques sur {} tirages\n", draw_count);

    println!("── Numéros ──");
    display_stats_table(main_stats);

    println!("\n── Complémentaires ──");
    display_stats_table(bonus_stats);
}

fn display_stats_table(stats: &[NumberStats]) {
    let mut table = new_table(vec!["Numéro", "Fréquence", "Part", "Tag"]);

    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));

    for stat in &sorted {
        let color = match stat.tag {
            FrequencyTag::Hot => Color::Green,
            FrequencyTag::Cold => Color::Red,
            FrequencyTag::Normal => Color::White,
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", stat.number)),
            Cell::new(stat.frequency.to_string()),
            Cell::new(format!("{:.2} %", stat.share * 100.0)),
            Cell::new(stat.tag.to_string()).fg(color),
        ]);
    }
    println!("{table}");
}
