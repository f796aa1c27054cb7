//! Reader for the Gaussian94 basis library format.
//!
//! A file is a sequence of atom blocks terminated by `****`:
//!
//! ```text
//! spherical
//! ****
//! O     0
//! S   3   1.00
//!     130.7093200      0.15432897
//!      23.8088610      0.53532814
//!       6.4436083      0.44463454
//! SP   3   1.00
//!       5.0331513     -0.09996723      0.15591627
//!       1.1695961      0.39951283      0.60768372
//!       0.3803890      0.70011547      0.39195739
//! ****
//! ```
pub(crate) mod grammar;

use log::debug;
use smallvec::SmallVec;

use crate::{
    angular::{self, Convention},
    basis::{Normalization, Primitives, ShellRecord},
    error::{BasisError, Result},
};

use grammar::Line;

/// The shells found for one label, along with the harmonic convention in
/// effect for them.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedShells {
    pub shells: Vec<ShellRecord>,
    pub convention: Convention,
}

/// Extracts the shells of a single atom label from Gaussian94 text.
#[derive(Copy, Clone, Debug, Default)]
pub struct ShellRecordParser {
    forced: Option<Convention>,
}

impl ShellRecordParser {
    /// A parser honoring `cartesian`/`spherical` directives in the file.
    pub fn new() -> Self {
        Self { forced: None }
    }

    /// A parser that ignores directives and always uses `convention`.
    pub fn forced(convention: Convention) -> Self {
        Self {
            forced: Some(convention),
        }
    }

    /// A parser forcing `convention` if one is given.
    pub fn with_override(convention: Option<Convention>) -> Self {
        Self { forced: convention }
    }

    pub fn forced_convention(&self) -> Option<Convention> {
        self.forced
    }

    /// Returns the shells of the first block whose header names `label`.
    /// Fails with [`BasisError::LabelNotFound`] if there is none.
    pub fn parse(&self, text: &str, label: &str) -> Result<ParsedShells> {
        let target = label.to_uppercase();
        let mut convention = self.forced.unwrap_or_default();

        let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

        while let Some((_, line)) = lines.next() {
            match grammar::classify(line) {
                Line::Cartesian if self.forced.is_none() => convention = Convention::Cartesian,
                Line::Spherical if self.forced.is_none() => convention = Convention::Spherical,
                Line::AtomArray(symbols)
                    if symbols
                        .iter()
                        .any(|symbol| symbol.to_uppercase() == target) =>
                {
                    let shells = read_block(&mut lines, convention)?;
                    debug!(
                        "found {} shells for {label} ({convention} functions)",
                        shells.len()
                    );
                    return Ok(ParsedShells { shells, convention });
                }
                _ => {}
            }
        }

        Err(BasisError::LabelNotFound {
            label: label.to_owned(),
        })
    }

    /// Lists the symbols of every atom block header, in file order.
    pub fn labels(text: &str) -> Vec<String> {
        text.lines()
            .filter_map(|line| match grammar::classify(line) {
                Line::AtomArray(symbols) => Some(symbols),
                _ => None,
            })
            .flatten()
            .map(str::to_owned)
            .collect()
    }
}

/// Reads shells up to the next separator (or the end of the text).
fn read_block<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    convention: Convention,
) -> Result<Vec<ShellRecord>> {
    let mut shells = Vec::new();

    while let Some((lineno, line)) = lines.next() {
        match grammar::classify(line) {
            Line::Separator => break,
            Line::Skip => continue,
            _ => {}
        }

        let header = grammar::shell_header(line, lineno)?;
        let shell_type = match header.shell_type.to_uppercase().as_str() {
            "L" => "SP".to_owned(),
            other => other.to_owned(),
        };

        let ams = shell_type
            .chars()
            .map(|letter| {
                angular::am_from_letter(letter)
                    .ok_or(BasisError::UnknownAngularMomentum { line: lineno, letter })
            })
            .collect::<Result<SmallVec<[u32; 2]>>>()?;

        if ams.len() > 2 {
            return Err(BasisError::UnsupportedShellType {
                line: lineno,
                shell_type: header.shell_type.to_owned(),
            });
        }

        let mut exponents = Primitives::with_capacity(header.nprimitive);
        let mut columns: [Primitives; 2] = Default::default();

        for _ in 0..header.nprimitive {
            let (lineno, line) = next_data_line(lines).ok_or_else(|| BasisError::Malformed {
                line: lineno,
                text: line.to_owned(),
                reason: "unexpected end of file inside shell",
            })?;

            let (exponent, coefficients) = grammar::primitive(line, lineno, ams.len())?;
            exponents.push(exponent);
            for (column, coefficient) in columns.iter_mut().zip(coefficients).take(ams.len()) {
                column.push(coefficient * header.scale);
            }
        }

        for (&am, coefficients) in ams.iter().zip(columns) {
            shells.push(ShellRecord::new(
                am,
                exponents.clone(),
                coefficients,
                Normalization::Unnormalized,
                convention,
            )?);
        }
    }

    Ok(shells)
}

fn next_data_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
) -> Option<(usize, &'a str)> {
    lines.find(|(_, line)| grammar::classify(line) != Line::Skip)
}
