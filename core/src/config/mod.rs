//! JSON input files.
pub use build::BuildConfig;
pub use molecule::{ConfigAtom, ConfigMolecule};

mod build;
mod molecule;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config")]
    Io(#[from] std::io::Error),

    #[error("invalid config")]
    Json(#[from] serde_json::Error),

    #[error("atom {atom} needs x, y, z coordinates but has {len}")]
    Position { atom: usize, len: usize },

    #[error("atom {atom} has neither a symbol nor a label")]
    MissingSymbol { atom: usize },
}
