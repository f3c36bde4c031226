use serde::{Deserialize, Serialize};

use crate::error::{LottoError, Result};

pub type Number = i64;

/// Un tirage historique : numéros principaux dans l'ordre lu, puis le complémentaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub main: Vec<Number>,
    pub bonus: Number,
}

/// Historique chargé : séquences parallèles, une entrée par ligne du fichier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawHistory {
    pub mains: Vec<Vec<Number>>,
    pub bonuses: Vec<Number>,
}

impl DrawHistory {
    pub fn push(&mut self, record: DrawRecord) {
        self.mains.push(record.main);
        self.bonuses.push(record.bonus);
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = DrawRecord> + '_ {
        self.mains
            .iter()
            .zip(&self.bonuses)
            .map(|(main, &bonus)| DrawRecord { main: main.clone(), bonus })
    }

    pub fn into_parts(self) -> (Vec<Vec<Number>>, Vec<Number>) {
        (self.mains, self.bonuses)
    }
}

/// Format d'une loterie : combien de numéros on tire et dans quelles bornes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub pick_count: usize,
    pub main_max: usize,
    pub bonus_max: usize,
}

impl Default for Game {
    /// Loto 6/49 avec complémentaire.
    fn default() -> Self {
        Self {
            pick_count: 6,
            main_max: 49,
            bonus_max: 49,
        }
    }
}

/// Contrôle optionnel des bornes ; le chargement lui-même ne l'applique jamais.
pub fn validate_record(record: &DrawRecord, game: &Game) -> Result<()> {
    if record.main.len() != game.pick_count {
        return Err(LottoError::invalid_argument(format!(
            "{} numéros attendus, {} trouvés",
            game.pick_count,
            record.main.len()
        )));
    }
    for &n in &record.main {
        check_range(n, game.main_max)?;
    }
    check_range(record.bonus, game.bonus_max)?;
    for i in 0..record.main.len() {
        for j in (i + 1)..record.main.len() {
            if record.main[i] == record.main[j] {
                return Err(LottoError::invalid_argument(format!(
                    "Numéro en double : {}",
                    record.main[i]
                )));
            }
        }
    }
    Ok(())
}

fn check_range(value: Number, max: usize) -> Result<()> {
    let max = max as Number;
    if value < 1 || value > max {
        return Err(LottoError::OutOfRange { value, min: 1, max });
    }
    Ok(())
}
