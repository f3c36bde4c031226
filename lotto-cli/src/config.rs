use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lotto_data::models::Game;

use crate::analysis::sampler::{DEFAULT_MAX_ATTEMPTS, SamplingStrategy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game: Game,
    /// Nombre de numéros principaux affichés dans le classement.
    pub main_top: usize,
    pub bonus_top: usize,
    pub strategy: SamplingStrategy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: Game::default(),
            main_top: 5,
            bonus_top: 1,
            strategy: SamplingStrategy::Exact,
        }
    }
}

impl GameConfig {
    /// Passe au tirage par rejet ; sans limite explicite, garde celle déjà configurée.
    pub fn use_rejection(&mut self, max_attempts: Option<usize>) {
        let configured = match self.strategy {
            SamplingStrategy::Rejection { max_attempts: limit } => limit,
            SamplingStrategy::Exact => DEFAULT_MAX_ATTEMPTS,
        };
        self.strategy = SamplingStrategy::Rejection {
            max_attempts: max_attempts.unwrap_or(configured),
        };
    }
}

pub fn load_config(path: &Path) -> Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let config: GameConfig = serde_json::from_str(&json)
        .with_context(|| format!("JSON invalide dans {:?}", path))?;
    Ok(config)
}

pub fn save_config(config: &GameConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}
