//! Line patterns of the Gaussian94 basis library format.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BasisError, Result};

/// Numeric literal: optional sign, mandatory decimal point, optional exponent
/// with a Fortran `D` marker allowed.
const NUMBER: &str = r"[-+]?(?:\d*\.\d+|\d+\.\d*)(?:[DdEe][-+]?\d+)?";

macro_rules! pattern {
    ($($regex:expr),+ $(,)?) => {
        Lazy::new(|| Regex::new(&[$($regex),+].concat()).expect("valid pattern"))
    };
}

static COMMENT: Lazy<Regex> = pattern!(r"^\s*!");
static BLANK: Lazy<Regex> = pattern!(r"^\s*$");
static CARTESIAN: Lazy<Regex> = pattern!(r"(?i)^\s*cartesian\s*$");
static SPHERICAL: Lazy<Regex> = pattern!(r"(?i)^\s*spherical\s*$");
static SEPARATOR: Lazy<Regex> = pattern!(r"^\s*\*\*\*\*");
/// Element symbol, optionally suffixed by digits (`O3`) or an underscore tag (`H_a`).
const ATOM_LABEL: &str = r"[A-Za-z]{1,3}(?:\d*|_\w+)";

static ATOM_ARRAY: Lazy<Regex> = pattern!(r"^\s*(", ATOM_LABEL, r")(\s+", ATOM_LABEL, r")*\s+0\s*$");
static SHELL: Lazy<Regex> = pattern!(r"^\s*(\w+)\s+(\d+)\s+(-?\d+\.\d+)");
static PRIMITIVE_1: Lazy<Regex> = pattern!(r"^\s*(", NUMBER, r")\s+(", NUMBER, r")\s*$");
static PRIMITIVE_2: Lazy<Regex> = pattern!(
    r"^\s*(",
    NUMBER,
    r")\s+(",
    NUMBER,
    r")\s+(",
    NUMBER,
    r")\s*$"
);

/// Classification of one line outside of a shell body.
#[derive(Debug, PartialEq)]
pub(crate) enum Line<'a> {
    /// Blank or comment line
    Skip,
    Cartesian,
    Spherical,
    Separator,
    /// Element symbols of an atom block header
    AtomArray(Vec<&'a str>),
    Other,
}

pub(crate) fn classify(line: &str) -> Line<'_> {
    if BLANK.is_match(line) || COMMENT.is_match(line) {
        Line::Skip
    } else if CARTESIAN.is_match(line) {
        Line::Cartesian
    } else if SPHERICAL.is_match(line) {
        Line::Spherical
    } else if SEPARATOR.is_match(line) {
        Line::Separator
    } else if ATOM_ARRAY.is_match(line) {
        let mut symbols = line.split_whitespace().collect::<Vec<_>>();
        // trailing literal 0
        symbols.pop();
        Line::AtomArray(symbols)
    } else {
        Line::Other
    }
}

/// `<TYPE> <nprimitive> <scale>`
#[derive(Debug, PartialEq)]
pub(crate) struct ShellHeader<'a> {
    pub(crate) shell_type: &'a str,
    pub(crate) nprimitive: usize,
    pub(crate) scale: f64,
}

pub(crate) fn shell_header(line: &str, lineno: usize) -> Result<ShellHeader<'_>> {
    let malformed = |reason| BasisError::Malformed {
        line: lineno,
        text: line.to_owned(),
        reason,
    };

    let captures = SHELL
        .captures(line)
        .ok_or_else(|| malformed("expected a shell header"))?;

    let (Some(shell_type), Some(nprimitive), Some(scale)) =
        (captures.get(1), captures.get(2), captures.get(3))
    else {
        return Err(malformed("expected a shell header"));
    };

    let nprimitive = nprimitive
        .as_str()
        .parse::<usize>()
        .map_err(|_| malformed("primitive count out of range"))?;
    if nprimitive == 0 {
        return Err(malformed("a shell needs at least one primitive"));
    }

    Ok(ShellHeader {
        shell_type: shell_type.as_str(),
        nprimitive,
        scale: parse_number(scale.as_str(), lineno)?,
    })
}

/// Parses a primitive line holding an exponent followed by `columns` coefficients.
pub(crate) fn primitive(line: &str, lineno: usize, columns: usize) -> Result<(f64, [f64; 2])> {
    let pattern = match columns {
        1 => &PRIMITIVE_1,
        2 => &PRIMITIVE_2,
        _ => unreachable!("shells group at most two angular momenta"),
    };

    let captures = pattern.captures(line).ok_or_else(|| BasisError::Malformed {
        line: lineno,
        text: line.to_owned(),
        reason: if columns == 1 {
            "expected an exponent and one coefficient"
        } else {
            "expected an exponent and two coefficients"
        },
    })?;

    let mut values = [0.0; 3];
    for (value, group) in values.iter_mut().zip(captures.iter().skip(1).flatten()) {
        *value = parse_number(group.as_str(), lineno)?;
    }

    Ok((values[0], [values[1], values[2]]))
}

/// Parses a literal, accepting Fortran style `D` exponent markers.
pub(crate) fn parse_number(literal: &str, lineno: usize) -> Result<f64> {
    literal
        .replace(['D', 'd'], "e")
        .parse::<f64>()
        .map_err(|_| BasisError::InvalidNumber {
            line: lineno,
            literal: literal.to_owned(),
        })
}
