use std::collections::HashMap;

use crate::atom::Atom;

/// Role of the orbital basis, the one used when no other role is requested.
pub const ORBITAL_BASIS: &str = "BASIS";

/// Represents a molecule, along with the basis sets assigned to its atoms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Molecule {
    pub(crate) atoms: Vec<Atom>,
    /// molecule-wide basis names, by role
    pub(crate) basis: HashMap<String, String>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            basis: HashMap::new(),
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn label(&self, atom: usize) -> &str {
        self.atoms[atom].label()
    }

    pub fn symbol(&self, atom: usize) -> &str {
        self.atoms[atom].symbol()
    }

    /// The basis assigned to `atom` for `role`: the atom's own assignment if it
    /// has one, otherwise the molecule-wide one.
    pub fn basis_name(&self, atom: usize, role: &str) -> Option<&str> {
        self.atoms[atom]
            .basis
            .get(role)
            .or_else(|| self.basis.get(role))
            .map(String::as_str)
    }

    /// Assigns `basis` for `role` to every atom without an assignment of its own.
    pub fn set_basis_all_atoms(&mut self, role: impl Into<String>, basis: impl Into<String>) {
        self.basis.insert(role.into(), basis.into());
    }

    /// Assigns `basis` for `role` to every atom of element `symbol`.
    pub fn set_basis_by_symbol(&mut self, symbol: &str, role: &str, basis: &str) {
        for atom in self
            .atoms
            .iter_mut()
            .filter(|atom| atom.symbol.eq_ignore_ascii_case(symbol))
        {
            atom.basis.insert(role.to_owned(), basis.to_owned());
        }
    }

    /// Assigns `basis` for `role` to every atom labeled `label`.
    pub fn set_basis_by_label(&mut self, label: &str, role: &str, basis: &str) {
        for atom in self
            .atoms
            .iter_mut()
            .filter(|atom| atom.label.eq_ignore_ascii_case(label))
        {
            atom.basis.insert(role.to_owned(), basis.to_owned());
        }
    }
}
