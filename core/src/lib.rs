//! Gaussian94 basis set files and the flattened basis sets built from them.
pub mod angular;
pub mod atom;
pub mod basis;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod g94;
pub mod library;
pub mod molecule;

pub use basis::{BasisSet, BuildOptions, ShellRecord};
pub use error::{BasisError, Result};
pub use g94::ShellRecordParser;
