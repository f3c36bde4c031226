pub mod error;
pub mod loader;
pub mod models;

pub use error::{LottoError, Result};
