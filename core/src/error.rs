use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading basis-set libraries or assembling
/// a [`BasisSet`](crate::basis::BasisSet).
#[derive(Error, Debug)]
pub enum BasisError {
    /// The requested label has no atom block in the file. This is the only
    /// error callers are expected to recover from, by retrying with the bare
    /// element symbol.
    #[error("shell catalogue not found for label {label}")]
    LabelNotFound { label: String },

    #[error("basis file {file} not found in search path [{}]", display_paths(.searched))]
    FileNotFound {
        file: String,
        searched: Vec<PathBuf>,
    },

    #[error("line {line}: {reason}: {text:?}")]
    Malformed {
        line: usize,
        text: String,
        reason: &'static str,
    },

    #[error("line {line}: unable to parse basis sets with {shell_type} or higher grouping")]
    UnsupportedShellType { line: usize, shell_type: String },

    #[error("line {line}: unknown angular momentum letter {letter:?}")]
    UnknownAngularMomentum { line: usize, letter: char },

    #[error("line {line}: invalid numeric literal {literal:?}")]
    InvalidNumber { line: usize, literal: String },

    #[error("invalid shell: {0}")]
    InvalidShell(String),

    /// An atom did not consume exactly the primitive range reserved for its
    /// (basis, label) pair.
    #[error(
        "problem with nprimitive in basis set construction: atom {atom} ({basis}, {label}) \
         consumed {consumed} primitives but {reserved} were reserved"
    )]
    PoolMismatch {
        atom: usize,
        basis: String,
        label: String,
        consumed: usize,
        reserved: usize,
    },

    /// `file` is the basis file that lacked the label and `searched` the
    /// library search path it was found in.
    #[error("no basis set assigned to atom {atom} ({label}) for role {role}{}", describe_lookup(.basis, .file, .searched))]
    NoBasisAssigned {
        atom: usize,
        label: String,
        role: String,
        basis: Option<String>,
        file: Option<PathBuf>,
        searched: Vec<PathBuf>,
    },

    #[error("center {center} out of range, basis set has {ncenter} centers")]
    CenterOutOfRange { center: usize, ncenter: usize },

    #[error("unable to read basis file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BasisError {
    /// Returns true for the label lookup failure that warrants a retry with the
    /// element symbol.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LabelNotFound { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_lookup(basis: &Option<String>, file: &Option<PathBuf>, searched: &[PathBuf]) -> String {
    let Some(basis) = basis else {
        return String::new();
    };

    let mut description = format!(": {basis} has no entry for it");
    if let Some(file) = file {
        description.push_str(&format!(" in {}", file.display()));
    }
    if !searched.is_empty() {
        description.push_str(&format!(" (search path [{}])", display_paths(searched)));
    }
    description
}

pub type Result<T> = std::result::Result<T, BasisError>;
