use rand::Rng;
use rand::seq::index;

use lotto_data::error::Result;
use lotto_data::models::Number;

use super::sampler::check_bounds;

/// Tirage équiprobable sans remise, indépendant de l'historique. Ordre de sortie conservé.
pub fn sample_uniform<R: Rng + ?Sized>(count: usize, range_max: usize, rng: &mut R) -> Result<Vec<Number>> {
    check_bounds(count, range_max)?;
    Ok(index::sample(rng, range_max, count)
        .into_iter()
        .map(|i| i as Number + 1)
        .collect())
}
