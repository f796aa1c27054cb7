use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::{
    angular::Convention,
    basis::{BasisSet, BuildOptions},
    catalogue::ShellCatalogue,
    error::Result,
    g94::ShellRecordParser,
    library::BasisLibrary,
    molecule::{Molecule, ORBITAL_BASIS},
};

use super::ConfigError;

/// How basis sets are located and built. Every field is optional.
///
/// ```json
/// { "puream": true, "basis_path": ["/opt/basis"], "role": "BASIS" }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildConfig {
    /// Forces spherical (`true`) or cartesian (`false`) functions, overriding
    /// the basis files
    pub puream: Option<bool>,
    /// Directories searched before `GBASIS_PATH` and the working directory
    pub basis_path: Vec<PathBuf>,
    /// Which basis assignment of the molecule to build
    pub role: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            puream: None,
            basis_path: Vec::new(),
            role: ORBITAL_BASIS.to_owned(),
        }
    }
}

impl BuildConfig {
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn convention(&self) -> Option<Convention> {
        self.puream.map(Convention::from_puream)
    }

    pub fn library(&self) -> BasisLibrary {
        let mut library = BasisLibrary::from_env();
        for directory in self.basis_path.iter().rev() {
            library.prepend(directory);
        }
        library
    }

    pub fn parser(&self) -> ShellRecordParser {
        ShellRecordParser::with_override(self.convention())
    }

    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            convention: self.convention(),
        }
    }

    /// Reads every basis file `molecule` needs and builds its basis set.
    pub fn build(&self, molecule: &Molecule) -> Result<BasisSet> {
        let catalogue =
            ShellCatalogue::resolve(molecule, &self.role, &self.library(), &self.parser())?;
        BasisSet::construct(molecule, &self.role, &catalogue, &self.options())
    }
}
