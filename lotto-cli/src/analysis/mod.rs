pub mod sampler;
pub mod uniform;

use std::collections::HashMap;

use lotto_data::models::{DrawHistory, Number};

/// Nombre d'apparitions par numéro. Les clés gardent leur ordre de première apparition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<Number, u32>,
    order: Vec<Number>,
}

impl FrequencyTable {
    /// Fréquence d'un numéro, 0 s'il n'est jamais sorti.
    pub fn get(&self, number: Number) -> u32 {
        self.counts.get(&number).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Number, u32)> + '_ {
        self.order.iter().map(|&n| (n, self.get(n)))
    }
}

impl FromIterator<Number> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = Number>>(numbers: I) -> Self {
        let mut table = FrequencyTable::default();
        for n in numbers {
            let count = table.counts.entry(n).or_insert(0);
            if *count == 0 {
                table.order.push(n);
            }
            *count += 1;
        }
        table
    }
}

pub fn frequencies<I: IntoIterator<Item = Number>>(numbers: I) -> FrequencyTable {
    numbers.into_iter().collect()
}

pub fn main_frequencies(history: &DrawHistory) -> FrequencyTable {
    frequencies(history.mains.iter().flatten().copied())
}

pub fn bonus_frequencies(history: &DrawHistory) -> FrequencyTable {
    frequencies(history.bonuses.iter().copied())
}

/// Les `n` numéros les plus fréquents. À égalité, le premier rencontré passe devant.
pub fn top_n(table: &FrequencyTable, n: usize) -> Vec<(Number, u32)> {
    let mut entries: Vec<(Number, u32)> = table.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyTag {
    Hot,
    Cold,
    Normal,
}

impl std::fmt::Display for FrequencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrequencyTag::Hot => write!(f, "HOT"),
            FrequencyTag::Cold => write!(f, "COLD"),
            FrequencyTag::Normal => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumberStats {
    pub number: Number,
    pub frequency: u32,
    pub share: f64,
    pub tag: FrequencyTag,
}

/// Une ligne par numéro de `[1, range_max]`, y compris ceux jamais sortis.
pub fn compute_stats(table: &FrequencyTable, range_max: usize) -> Vec<NumberStats> {
    let total = table.total();
    let uniform = 1.0 / range_max as f64;
    let threshold = 0.3;

    (1..=range_max as Number)
        .map(|number| {
            let frequency = table.get(number);
            let share = if total > 0 {
                frequency as f64 / total as f64
            } else {
                uniform
            };
            let deviation = (share - uniform) / uniform;
            let tag = if deviation > threshold {
                FrequencyTag::Hot
            } else if deviation < -threshold {
                FrequencyTag::Cold
            } else {
                FrequencyTag::Normal
            };
            NumberStats { number, frequency, share, tag }
        })
        .collect()
}
