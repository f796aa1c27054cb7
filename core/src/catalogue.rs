//! Shells assigned to each (basis name, atom label) pair of a molecule.

use std::{collections::HashMap, path::PathBuf};

use itertools::Itertools;
use log::{debug, warn};

use crate::{
    angular::Convention,
    basis::ShellRecord,
    error::{BasisError, Result},
    g94::{ParsedShells, ShellRecordParser},
    library::{BasisFile, BasisLibrary},
    molecule::Molecule,
};

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    shells: Vec<ShellRecord>,
    convention: Convention,
}

/// Maps (basis name, label) to the shells of that label in that basis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShellCatalogue {
    entries: HashMap<(String, String), Entry>,
}

/// One distinct (basis, label) pair of a molecule, with the first atom using it.
struct Request<'a> {
    atom: usize,
    basis: &'a str,
    label: &'a str,
    symbol: &'a str,
}

impl ShellCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers already parsed shells for a pair, replacing any previous entry.
    pub fn insert(
        &mut self,
        basis: impl Into<String>,
        label: impl Into<String>,
        shells: Vec<ShellRecord>,
    ) {
        let convention = Convention::from_puream(shells.iter().any(ShellRecord::is_spherical));
        self.insert_parsed(basis.into(), label.into(), ParsedShells { shells, convention });
    }

    fn insert_parsed(&mut self, basis: String, label: String, parsed: ParsedShells) {
        let ParsedShells { shells, convention } = parsed;
        self.entries
            .insert((basis, label), Entry { shells, convention });
    }

    pub fn get(&self, basis: &str, label: &str) -> Option<&[ShellRecord]> {
        self.entries
            .get(&(basis.to_owned(), label.to_owned()))
            .map(|entry| entry.shells.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The convention declared by the parsed files: spherical if any entry is.
    pub fn declared_convention(&self) -> Convention {
        Convention::from_puream(
            self.entries
                .values()
                .any(|entry| entry.convention.is_spherical()),
        )
    }

    /// Reads and parses the shells of every (basis, label) pair used by
    /// `molecule` for `role`. Labels missing from a file are retried once with
    /// the bare element symbol.
    pub fn resolve(
        molecule: &Molecule,
        role: &str,
        library: &BasisLibrary,
        parser: &ShellRecordParser,
    ) -> Result<Self> {
        let mut requests = Vec::new();
        for atom in 0..molecule.atom_count() {
            let basis = molecule
                .basis_name(atom, role)
                .ok_or_else(|| BasisError::NoBasisAssigned {
                    atom,
                    label: molecule.label(atom).to_owned(),
                    role: role.to_owned(),
                    basis: None,
                    file: None,
                    searched: Vec::new(),
                })?;

            requests.push(Request {
                atom,
                basis,
                label: molecule.label(atom),
                symbol: molecule.symbol(atom),
            });
        }

        let requests = requests
            .into_iter()
            .unique_by(|request| (request.basis, request.label))
            .collect::<Vec<_>>();

        let mut files = HashMap::new();
        for basis in requests.iter().map(|request| request.basis).unique() {
            files.insert(basis, library.load(basis)?);
        }

        let lookup = |request: &Request| -> Result<(String, String, ParsedShells)> {
            let file = &files[request.basis];
            let parsed = lookup_label(parser, library, file, request, role)?;
            Ok((request.basis.to_owned(), request.label.to_owned(), parsed))
        };

        #[cfg(feature = "rayon")]
        let resolved = {
            use rayon::prelude::*;
            requests.par_iter().map(lookup).collect::<Result<Vec<_>>>()?
        };
        #[cfg(not(feature = "rayon"))]
        let resolved = requests.iter().map(lookup).collect::<Result<Vec<_>>>()?;

        let mut catalogue = Self::new();
        for (basis, label, parsed) in resolved {
            catalogue.insert_parsed(basis, label, parsed);
        }

        Ok(catalogue)
    }
}

/// Label first, then the symbol, and only on a missing block.
fn lookup_label(
    parser: &ShellRecordParser,
    library: &BasisLibrary,
    file: &BasisFile,
    request: &Request,
    role: &str,
) -> Result<ParsedShells> {
    let no_basis = || BasisError::NoBasisAssigned {
        atom: request.atom,
        label: request.label.to_owned(),
        role: role.to_owned(),
        basis: Some(request.basis.to_owned()),
        file: Some(file.path.clone()),
        searched: library.search_path().to_vec(),
    };

    match parser.parse(&file.text, request.label) {
        Err(error) if error.is_not_found() => {
            if request.symbol.eq_ignore_ascii_case(request.label) {
                return Err(no_basis());
            }

            warn!(
                "no {} entry for label {}, falling back to symbol {}",
                request.basis, request.label, request.symbol
            );

            match parser.parse(&file.text, request.symbol) {
                Err(error) if error.is_not_found() => Err(no_basis()),
                other => other,
            }
        }
        other => {
            debug!("{} entry found for label {}", request.basis, request.label);
            other
        }
    }
}
