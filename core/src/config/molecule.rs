use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use nalgebra::Vector3;
use serde::Deserialize;

use crate::{
    atom::Atom,
    molecule::{Molecule, ORBITAL_BASIS},
};

use super::ConfigError;

/// Represents a full molecule in a config file: a list of positioned atoms and
/// the basis sets assigned to them.
///
/// ```json
/// {
///     "basis": "cc-pvdz",
///     "atoms": [
///         { "symbol": "O", "position": [0.0, 0.0, 0.0] },
///         { "label": "H1", "position": [0.0, 1.43, 1.1], "basis": "sto-3g" },
///         { "label": "H2", "position": [0.0, -1.43, 1.1] }
///     ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct ConfigMolecule {
    #[serde(default)]
    basis: Option<ConfigBasis>,
    atoms: Vec<ConfigAtom>,
}

#[derive(Debug, Deserialize)]
pub struct ConfigAtom {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    label: Option<String>,
    position: Vec<f64>,
    #[serde(default)]
    basis: Option<ConfigBasis>,
}

/// Either the orbital basis name alone, or basis names by role.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigBasis {
    Orbital(String),
    Roles(HashMap<String, String>),
}

impl ConfigBasis {
    fn into_roles(self) -> HashMap<String, String> {
        match self {
            Self::Orbital(name) => HashMap::from([(ORBITAL_BASIS.to_owned(), name)]),
            Self::Roles(roles) => roles,
        }
    }
}

impl ConfigMolecule {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }
}

impl TryFrom<ConfigMolecule> for Molecule {
    type Error = ConfigError;

    fn try_from(value: ConfigMolecule) -> Result<Self, Self::Error> {
        let ConfigMolecule { basis, atoms } = value;

        let mut molecule = Molecule::new(Vec::with_capacity(atoms.len()));
        molecule.basis = basis.map(ConfigBasis::into_roles).unwrap_or_default();

        for (index, atom) in atoms.into_iter().enumerate() {
            let &[x, y, z] = atom.position.as_slice() else {
                return Err(ConfigError::Position {
                    atom: index,
                    len: atom.position.len(),
                });
            };
            let position = Vector3::new(x, y, z);

            let mut parsed = match (atom.symbol, atom.label) {
                (Some(symbol), Some(label)) => Atom {
                    label,
                    ..Atom::new(symbol, position)
                },
                (Some(symbol), None) => Atom::new(symbol, position),
                (None, Some(label)) => Atom::labeled(label, position),
                (None, None) => return Err(ConfigError::MissingSymbol { atom: index }),
            };
            parsed.basis = atom.basis.map(ConfigBasis::into_roles).unwrap_or_default();

            molecule.atoms.push(parsed);
        }

        Ok(molecule)
    }
}
