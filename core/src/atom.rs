use std::collections::HashMap;

use nalgebra::Vector3;

/// Represents an atom in a molecule.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    pub(crate) position: Vector3<f64>,
    /// Element symbol, e.g. `O`
    pub(crate) symbol: String,
    /// Label used to look up basis blocks, e.g. `O3`. Defaults to the symbol.
    pub(crate) label: String,
    /// Basis names assigned to this atom, by role. Takes precedence over the
    /// molecule-wide assignment.
    pub(crate) basis: HashMap<String, String>,
}

impl Atom {
    /// An atom labeled by its element symbol.
    pub fn new(symbol: impl Into<String>, position: Vector3<f64>) -> Self {
        let symbol = symbol.into();
        Self {
            position,
            label: symbol.clone(),
            symbol,
            basis: HashMap::new(),
        }
    }

    /// An atom with a custom label, its symbol derived from the label.
    pub fn labeled(label: impl Into<String>, position: Vector3<f64>) -> Self {
        let label = label.into();
        Self {
            position,
            symbol: symbol_from_label(&label).to_owned(),
            label,
            basis: HashMap::new(),
        }
    }

    /// Assigns a basis for `role` to this atom only.
    pub fn with_basis(mut self, role: impl Into<String>, basis: impl Into<String>) -> Self {
        self.basis.insert(role.into(), basis.into());
        self
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Strips the underscore suffix and trailing digits of a label: `N2` -> `N`,
/// `H_a` -> `H`, `Cl12_b` -> `Cl`.
pub fn symbol_from_label(label: &str) -> &str {
    let stem = label.split('_').next().unwrap_or(label);
    stem.trim_end_matches(|c: char| c.is_ascii_digit())
}
