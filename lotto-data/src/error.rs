use std::path::PathBuf;

use thiserror::Error;

use crate::models::Number;

pub type Result<T> = std::result::Result<T, LottoError>;

#[derive(Debug, Error)]
pub enum LottoError {
    #[error("Fichier introuvable : {}", .path.display())]
    NotFound { path: PathBuf },

    /// Première ligne invalide rencontrée, avec ses jetons bruts.
    #[error("Données invalides ligne {line} : [{}]", .row.join(","))]
    Parse { line: u64, row: Vec<String> },

    #[error("Paramètre invalide : {0}")]
    InvalidArgument(String),

    #[error("Échantillonnage abandonné après {attempts} tirages")]
    SamplingTimeout { attempts: usize },

    #[error("Numéro {value} hors limites ({min}-{max})")]
    OutOfRange { value: Number, min: Number, max: Number },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl LottoError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        LottoError::InvalidArgument(msg.into())
    }
}
