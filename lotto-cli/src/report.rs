use log::info;
use rand::Rng;
use serde::Serialize;

use lotto_data::error::Result;
use lotto_data::models::{DrawHistory, Number};

use crate::analysis::sampler::sample_weighted_with;
use crate::analysis::{bonus_frequencies, main_frequencies, top_n};
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub numbers: Vec<Number>,
    pub main_top: Vec<(Number, u32)>,
    pub bonus_top: Vec<(Number, u32)>,
    pub draw_count: usize,
}

impl AnalysisResult {
    /// Le complémentaire le plus fréquent, proposé comme complémentaire de la grille.
    pub fn predicted_bonus(&self) -> Option<Number> {
        self.bonus_top.first().map(|&(n, _)| n)
    }
}

pub fn build_report(
    numbers: Vec<Number>,
    main_top: Vec<(Number, u32)>,
    bonus_top: Vec<(Number, u32)>,
    draw_count: usize,
) -> AnalysisResult {
    AnalysisResult {
        numbers,
        main_top,
        bonus_top,
        draw_count,
    }
}

/// Fréquences, tirage pondéré puis classement, sur un historique déjà chargé.
pub fn analyze<R: Rng + ?Sized>(
    history: &DrawHistory,
    config: &GameConfig,
    rng: &mut R,
) -> Result<AnalysisResult> {
    let main_table = main_frequencies(history);
    let bonus_table = bonus_frequencies(history);

    let numbers = sample_weighted_with(
        &main_table,
        config.game.pick_count,
        config.game.main_max,
        config.strategy,
        rng,
    )?;

    info!(
        "Analyse de {} tirages : {} numéros distincts observés",
        history.len(),
        main_table.len()
    );

    Ok(build_report(
        numbers,
        top_n(&main_table, config.main_top),
        top_n(&bonus_table, config.bonus_top),
        history.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_data::error::LottoError;
    use lotto_data::loader::{load_path, load_rows};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;

    #[test]
    fn test_build_report_keeps_inputs() {
        let report = build_report(vec![3, 9, 27], vec![(9, 4), (3, 2)], vec![(12, 3)], 10);
        assert_eq!(report.numbers, vec![3, 9, 27]);
        assert_eq!(report.main_top[0], (9, 4));
        assert_eq!(report.predicted_bonus(), Some(12));
        assert_eq!(report.draw_count, 10);
    }

    #[test]
    fn test_analyze_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1,2,3,4,5,6,7\n7,8,9,10,11,12,13\n1,2,20,21,22,23,7\n").unwrap();
        let history = load_path(file.path()).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let report = analyze(&history, &GameConfig::default(), &mut rng).unwrap();

        assert_eq!(report.numbers.len(), 6);
        assert!(report.numbers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(report.main_top.len(), 5);
        assert_eq!(report.main_top[0], (1, 2));
        assert_eq!(report.main_top[1], (2, 2));
        assert_eq!(report.bonus_top, vec![(7, 2)]);
        assert_eq!(report.draw_count, 3);
    }

    #[test]
    fn test_analyze_empty_history() {
        let history = DrawHistory::default();
        let mut rng = StdRng::seed_from_u64(1);
        let report = analyze(&history, &GameConfig::default(), &mut rng).unwrap();
        assert_eq!(report.numbers.len(), 6);
        assert!(report.main_top.is_empty());
        assert_eq!(report.predicted_bonus(), None);
    }

    #[test]
    fn test_analyze_propagates_invalid_game() {
        let history = load_rows(vec![vec!["1", "2", "3"]]).unwrap();
        let mut config = GameConfig::default();
        config.game.pick_count = 60;
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            analyze(&history, &config, &mut rng),
            Err(LottoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_report_serializes() {
        let report = build_report(vec![1, 2], vec![(1, 1)], vec![(2, 1)], 1);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"numbers\":[1,2]"));
        assert!(json.contains("\"bonus_top\":[[2,1]]"));
    }
}
