//! Locating basis library files on disk.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::{BasisError, Result};

/// Environment variable holding extra basis directories.
pub const BASIS_PATH_VAR: &str = "GBASIS_PATH";

/// File name a basis is stored under: `6-31+G*` -> `6-31pgs.gbs`.
pub fn basis_file_name(basis: &str) -> String {
    let mangled: String = basis
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '+' => 'p',
            '*' => 's',
            '(' | ')' | ',' => '_',
            c => c,
        })
        .collect();

    format!("{mangled}.gbs")
}

/// An ordered list of directories searched for `.gbs` files.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BasisLibrary {
    search_path: Vec<PathBuf>,
}

/// A basis file read from the library.
#[derive(Clone, Debug)]
pub struct BasisFile {
    pub path: PathBuf,
    pub text: String,
}

impl BasisLibrary {
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }

    /// The directories in [`BASIS_PATH_VAR`], then the working directory.
    pub fn from_env() -> Self {
        let mut search_path = env::var_os(BASIS_PATH_VAR)
            .map(|paths| env::split_paths(&paths).collect::<Vec<_>>())
            .unwrap_or_default();
        search_path.push(PathBuf::from("."));

        Self { search_path }
    }

    /// Adds `directory` in front of the search path.
    pub fn prepend(&mut self, directory: impl Into<PathBuf>) {
        self.search_path.insert(0, directory.into());
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Returns the first existing file for `basis`. An explicit path to an
    /// existing file is returned as is.
    pub fn locate(&self, basis: &str) -> Result<PathBuf> {
        let explicit = Path::new(basis);
        if explicit.extension().is_some_and(|extension| extension == "gbs") && explicit.is_file() {
            return Ok(explicit.to_owned());
        }

        let file = basis_file_name(basis);
        self.search_path
            .iter()
            .map(|directory| directory.join(&file))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| BasisError::FileNotFound {
                file,
                searched: self.search_path.clone(),
            })
    }

    /// Locates and reads the file for `basis`.
    pub fn load(&self, basis: &str) -> Result<BasisFile> {
        let path = self.locate(basis)?;
        debug!("reading basis {basis} from {}", path.display());

        let text = fs::read_to_string(&path).map_err(|source| BasisError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(BasisFile { path, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(basis_file_name("STO-3G"), "sto-3g.gbs");
        assert_eq!(basis_file_name("6-31+G*"), "6-31pgs.gbs");
        assert_eq!(basis_file_name("6-311++G(d,p)"), "6-311ppg_d_p_.gbs");
        assert_eq!(basis_file_name("cc-pVDZ"), "cc-pvdz.gbs");
    }

    #[test]
    fn locate_in_search_path() {
        let root = env::temp_dir().join(format!("gbasis-library-{}", std::process::id()));
        let first = root.join("first");
        let second = root.join("second");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(second.join("sto-3g.gbs"), "****\n").unwrap();

        let library = BasisLibrary::new(vec![first.clone(), second.clone()]);
        assert_eq!(library.locate("STO-3G").unwrap(), second.join("sto-3g.gbs"));
        assert_eq!(library.load("sto-3g").unwrap().text, "****\n");

        match library.locate("cc-pvdz") {
            Err(BasisError::FileNotFound { file, searched }) => {
                assert_eq!(file, "cc-pvdz.gbs");
                assert_eq!(searched, [first, second]);
            }
            other => panic!("expected a missing file, got {other:?}"),
        }

        fs::remove_dir_all(root).unwrap();
    }
}
