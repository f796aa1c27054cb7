use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    angular::{self, Convention, MAX_ANGULAR_MOMENTUM},
    error::{BasisError, Result},
};

/// Primitive storage, most contracted shells have at most six primitives.
pub type Primitives = SmallVec<[f64; 6]>;

/// How the coefficients handed to [`ShellRecord::new`] are scaled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Normalization {
    /// Raw contraction coefficients as found in a basis library file
    Unnormalized,
    /// Coefficients already include primitive and contraction normalization
    Normalized,
    /// Coefficients already carry the normalization expected by ERD style integral code
    ErdNormalized,
}

/// One contracted shell, before it is placed on a center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShellRecord {
    am: u32,
    exponents: Primitives,
    /// normalized for use
    coefficients: Primitives,
    /// as read, after scaling
    original_coefficients: Primitives,
    erd_coefficients: Primitives,
    normalization: Normalization,
    spherical: bool,
}

impl ShellRecord {
    /// Creates a shell from its exponents and contraction coefficients, deriving the
    /// normalized and ERD-normalized coefficient vectors.
    pub fn new(
        am: u32,
        exponents: Primitives,
        coefficients: Primitives,
        normalization: Normalization,
        convention: Convention,
    ) -> Result<Self> {
        if am > MAX_ANGULAR_MOMENTUM {
            return Err(BasisError::InvalidShell(format!(
                "angular momentum {am} exceeds the maximum of {MAX_ANGULAR_MOMENTUM}"
            )));
        }
        if exponents.is_empty() {
            return Err(BasisError::InvalidShell(
                "a shell needs at least one primitive".to_owned(),
            ));
        }
        if exponents.len() != coefficients.len() {
            return Err(BasisError::InvalidShell(format!(
                "{} exponents but {} coefficients",
                exponents.len(),
                coefficients.len()
            )));
        }
        if let Some(exponent) = exponents.iter().find(|&&exponent| !(exponent > 0.0)) {
            return Err(BasisError::InvalidShell(format!(
                "exponent {exponent} is not positive"
            )));
        }

        let (normalized, erd_coefficients) = match normalization {
            Normalization::Unnormalized => (
                normalize(am, &exponents, &coefficients),
                erd_normalize(am, &exponents, &coefficients),
            ),
            Normalization::Normalized => (
                coefficients.clone(),
                erd_normalize(am, &exponents, &coefficients),
            ),
            Normalization::ErdNormalized => (coefficients.clone(), coefficients.clone()),
        };

        Ok(Self {
            am,
            exponents,
            coefficients: normalized,
            original_coefficients: coefficients,
            erd_coefficients,
            normalization,
            spherical: convention.is_spherical(),
        })
    }

    /// Returns the same shell under a different harmonic convention.
    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.spherical = convention.is_spherical();
        self
    }

    pub fn am(&self) -> u32 {
        self.am
    }

    pub fn am_letter(&self) -> char {
        angular::letter_from_am(self.am).unwrap_or('?')
    }

    pub fn nprimitive(&self) -> usize {
        self.exponents.len()
    }

    pub fn ncartesian(&self) -> usize {
        angular::cartesian_count(self.am)
    }

    /// Number of basis functions under this shell's own convention
    pub fn nfunction(&self) -> usize {
        angular::function_count(self.am, self.spherical)
    }

    pub fn is_spherical(&self) -> bool {
        self.spherical
    }

    pub fn convention(&self) -> Convention {
        Convention::from_puream(self.spherical)
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn original_coefficients(&self) -> &[f64] {
        &self.original_coefficients
    }

    pub fn erd_coefficients(&self) -> &[f64] {
        &self.erd_coefficients
    }
}

/// (2l-1)!!, with (-1)!! = 1
fn double_factorial(am: u32) -> f64 {
    (1..2 * am as i32).step_by(2).map(f64::from).product()
}

/// Normalization constant of a single primitive of angular momentum `am`.
fn primitive_normalization(am: u32, exponent: f64) -> f64 {
    let l = am as i32;
    let z = (2.0 * exponent).powf(f64::from(l) + 1.5);
    f64::sqrt(2f64.powi(l) * z / (PI * PI.sqrt() * double_factorial(am)))
}

fn normalize(am: u32, exponents: &[f64], coefficients: &[f64]) -> Primitives {
    let mut normalized: Primitives = exponents
        .iter()
        .zip(coefficients)
        .map(|(&exponent, &coefficient)| coefficient * primitive_normalization(am, exponent))
        .collect();

    let power = f64::from(am) + 1.5;
    let mut overlap = 0.0;
    for (i, j) in itertools::iproduct!(0..exponents.len(), 0..exponents.len()) {
        overlap += normalized[i] * normalized[j] / (exponents[i] + exponents[j]).powf(power);
    }

    let prefactor = PI.powf(1.5) * double_factorial(am) / 2f64.powi(am as i32);
    let norm = f64::sqrt(1.0 / (prefactor * overlap));

    if !norm.is_finite() {
        normalized.iter_mut().for_each(|coefficient| *coefficient = 1.0);
    } else {
        normalized.iter_mut().for_each(|coefficient| *coefficient *= norm);
    }

    normalized
}

fn erd_normalize(am: u32, exponents: &[f64], coefficients: &[f64]) -> Primitives {
    let power = f64::from(am) + 1.5;

    let mut sum = 0.0;
    for (j, k) in itertools::iproduct!(0..exponents.len(), 0..exponents.len()) {
        let (a1, a2) = (exponents[j], exponents[k]);
        let overlap = (2.0 * (a1 * a2).sqrt() / (a1 + a2)).powf(power);
        sum += coefficients[j] * coefficients[k] * overlap;
    }

    let prefactor = if am > 1 {
        2f64.powi(2 * am as i32) / double_factorial(am)
    } else {
        1.0
    };
    let norm = f64::sqrt(prefactor / sum);

    coefficients
        .iter()
        .map(|&coefficient| coefficient * norm)
        .collect()
}
