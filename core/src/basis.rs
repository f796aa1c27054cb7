//! Contracted Gaussian shells and the flattened, molecule-wide basis set built
//! from them.
mod construct;
mod detail;
mod set;
mod shell;

pub use construct::BuildOptions;
pub use set::{BasisSet, Shell};
pub use shell::{Normalization, Primitives, ShellRecord};
