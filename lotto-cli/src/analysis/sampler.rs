use std::collections::BTreeSet;

use log::debug;
use rand::Rng;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use serde::{Deserialize, Serialize};

use lotto_data::error::{LottoError, Result};
use lotto_data::models::Number;

use super::FrequencyTable;

/// Plus grande plage acceptée : les candidats sont matérialisés en mémoire.
pub const MAX_RANGE: usize = 1_000_000;

pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// Tirage pondéré sans remise : le numéro retenu sort de l'urne.
    #[default]
    Exact,
    /// Tirage avec remise, doublons rejetés, abandon après `max_attempts` tirages.
    Rejection { max_attempts: usize },
}

/// `count` numéros distincts de `[1, range_max]`, poids = fréquence + 1, triés.
pub fn sample_weighted<R: Rng + ?Sized>(
    table: &FrequencyTable,
    count: usize,
    range_max: usize,
    rng: &mut R,
) -> Result<Vec<Number>> {
    sample_weighted_with(table, count, range_max, SamplingStrategy::Exact, rng)
}

pub fn sample_weighted_with<R: Rng + ?Sized>(
    table: &FrequencyTable,
    count: usize,
    range_max: usize,
    strategy: SamplingStrategy,
    rng: &mut R,
) -> Result<Vec<Number>> {
    check_bounds(count, range_max)?;

    let candidates: Vec<(Number, u64)> = (1..=range_max as Number)
        .map(|n| (n, table.get(n) as u64 + 1))
        .collect();

    let selected = match strategy {
        SamplingStrategy::Exact => sample_without_replacement(candidates, count, rng)?,
        SamplingStrategy::Rejection { max_attempts } => {
            sample_with_rejection(&candidates, count, max_attempts, rng)?
        }
    };

    debug!("Tirage pondéré ({:?}) : {:?}", strategy, selected);
    Ok(selected)
}

pub(crate) fn check_bounds(count: usize, range_max: usize) -> Result<()> {
    if range_max == 0 {
        return Err(LottoError::invalid_argument("la plage doit contenir au moins un numéro"));
    }
    if count > range_max {
        return Err(LottoError::invalid_argument(format!(
            "impossible de tirer {} numéros distincts parmi {}",
            count, range_max
        )));
    }
    if range_max > MAX_RANGE {
        return Err(LottoError::invalid_argument(format!(
            "plage {} trop grande (maximum {})",
            range_max, MAX_RANGE
        )));
    }
    Ok(())
}

fn sample_without_replacement<R: Rng + ?Sized>(
    mut available: Vec<(Number, u64)>,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Number>> {
    let mut selected = Vec::with_capacity(count);

    for _ in 0..count {
        let weights: Vec<u64> = available.iter().map(|(_, w)| *w).collect();
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| LottoError::invalid_argument(e.to_string()))?;
        let idx = dist.sample(rng);

        let (number, _) = available.swap_remove(idx);
        selected.push(number);
    }

    selected.sort_unstable();
    Ok(selected)
}

fn sample_with_rejection<R: Rng + ?Sized>(
    candidates: &[(Number, u64)],
    count: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Vec<Number>> {
    let weights: Vec<u64> = candidates.iter().map(|(_, w)| *w).collect();
    let dist = WeightedIndex::new(&weights)
        .map_err(|e| LottoError::invalid_argument(e.to_string()))?;

    let mut selected = BTreeSet::new();
    let mut attempts = 0usize;

    while selected.len() < count {
        if attempts >= max_attempts {
            return Err(LottoError::SamplingTimeout { attempts });
        }
        attempts += 1;
        selected.insert(candidates[dist.sample(rng)].0);
    }

    Ok(selected.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::frequencies;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_valid_draw(draw: &[Number], count: usize, range_max: usize) {
        assert_eq!(draw.len(), count);
        assert!(draw.windows(2).all(|w| w[0] < w[1]), "non trié ou doublon : {:?}", draw);
        assert!(draw.iter().all(|&n| n >= 1 && n <= range_max as Number));
    }

    #[test]
    fn test_sample_six_of_49() {
        let mut rng = StdRng::seed_from_u64(42);
        let table = frequencies(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        for _ in 0..200 {
            let draw = sample_weighted(&table, 6, 49, &mut rng).unwrap();
            assert_valid_draw(&draw, 6, 49);
        }
    }

    #[test]
    fn test_sample_whole_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let table = frequencies(vec![3, 3, 3]);
        let draw = sample_weighted(&table, 10, 10, &mut rng).unwrap();
        assert_eq!(draw, (1..=10).collect::<Vec<Number>>());
    }

    #[test]
    fn test_sample_zero_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let draw = sample_weighted(&FrequencyTable::default(), 0, 49, &mut rng).unwrap();
        assert!(draw.is_empty());
    }

    #[test]
    fn test_count_above_range_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = FrequencyTable::default();
        assert!(matches!(
            sample_weighted(&table, 7, 6, &mut rng),
            Err(LottoError::InvalidArgument(_))
        ));
        assert!(matches!(
            sample_weighted(&table, 0, 0, &mut rng),
            Err(LottoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_oversized_range_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = FrequencyTable::default();
        for range_max in [MAX_RANGE + 1, usize::MAX] {
            assert!(matches!(
                sample_weighted(&table, 6, range_max, &mut rng),
                Err(LottoError::InvalidArgument(_))
            ));
        }
        assert!(sample_weighted(&table, 6, MAX_RANGE, &mut rng).is_ok());
    }

    #[test]
    fn test_seed_reproducible() {
        let table = frequencies(vec![5, 5, 9, 12, 40]);
        let a = sample_weighted(&table, 6, 49, &mut StdRng::seed_from_u64(2024)).unwrap();
        let b = sample_weighted(&table, 6, 49, &mut StdRng::seed_from_u64(2024)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_frequent_numbers_favoured() {
        let mut rng = StdRng::seed_from_u64(12345);
        let table = frequencies(std::iter::repeat(1).take(50));

        let mut hits_hot = 0u32;
        let mut hits_cold = 0u32;
        for _ in 0..10_000 {
            let draw = sample_weighted(&table, 6, 49, &mut rng).unwrap();
            if draw.contains(&1) {
                hits_hot += 1;
            }
            if draw.contains(&49) {
                hits_cold += 1;
            }
        }
        assert!(
            hits_hot > 2 * hits_cold,
            "1 sorti {} fois, 49 sorti {} fois",
            hits_hot,
            hits_cold
        );
    }

    #[test]
    fn test_rejection_strategy_valid() {
        let mut rng = StdRng::seed_from_u64(99);
        let table = frequencies(vec![1, 1, 2, 3]);
        let strategy = SamplingStrategy::Rejection { max_attempts: 100_000 };
        for _ in 0..100 {
            let draw = sample_weighted_with(&table, 6, 49, strategy, &mut rng).unwrap();
            assert_valid_draw(&draw, 6, 49);
        }
    }

    #[test]
    fn test_rejection_strategy_favours_frequent_numbers() {
        let mut rng = StdRng::seed_from_u64(54321);
        let table = frequencies(std::iter::repeat(1).take(50));
        let strategy = SamplingStrategy::Rejection { max_attempts: DEFAULT_MAX_ATTEMPTS };

        let mut hits_hot = 0u32;
        let mut hits_cold = 0u32;
        for _ in 0..10_000 {
            let draw = sample_weighted_with(&table, 6, 49, strategy, &mut rng).unwrap();
            if draw.contains(&1) {
                hits_hot += 1;
            }
            if draw.contains(&49) {
                hits_cold += 1;
            }
        }
        assert!(
            hits_hot > 2 * hits_cold,
            "1 sorti {} fois, 49 sorti {} fois",
            hits_hot,
            hits_cold
        );
    }

    #[test]
    fn test_rejection_strategy_times_out() {
        let mut rng = StdRng::seed_from_u64(99);
        let strategy = SamplingStrategy::Rejection { max_attempts: 1 };
        match sample_weighted_with(&FrequencyTable::default(), 2, 49, strategy, &mut rng) {
            Err(LottoError::SamplingTimeout { attempts }) => assert_eq!(attempts, 1),
            other => panic!("SamplingTimeout attendu, obtenu {:?}", other),
        }
    }
}
