use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::angular::{self, Convention};

pub(super) const EMPTY_NAME: &str = "(Empty Basis Set)";

/// A basis set placed on a molecule.
///
/// Shells, functions and centers are stored as flat arrays indexed by shell,
/// function or center number. Primitive data lives in a single pool that
/// holds one copy per (basis, label) pair; shells refer to it by offset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisSet {
    pub(super) name: String,

    pub(super) exponents: Vec<f64>,
    pub(super) coefficients: Vec<f64>,
    pub(super) original_coefficients: Vec<f64>,
    pub(super) erd_coefficients: Vec<f64>,

    pub(super) shell_am: Vec<u32>,
    pub(super) shell_nprimitive: Vec<usize>,
    /// offset of the shell's first primitive in the pool
    pub(super) shell_first_primitive: Vec<usize>,
    pub(super) shell_center: Vec<usize>,
    pub(super) shell_first_function: Vec<usize>,
    pub(super) shell_first_cartesian: Vec<usize>,

    pub(super) center_nshell: Vec<usize>,
    pub(super) center_first_shell: Vec<usize>,
    pub(super) center_position: Vec<Vector3<f64>>,
    pub(super) center_label: Vec<String>,

    pub(super) function_to_shell: Vec<usize>,
    pub(super) function_to_center: Vec<usize>,
    pub(super) cartesian_to_shell: Vec<usize>,

    /// summed over shells, shared primitives counted once per shell using them
    pub(super) nprimitive: usize,
    pub(super) ncartesian: usize,
    pub(super) nfunction: usize,
    pub(super) max_am: u32,
    pub(super) max_nprimitive: usize,
    pub(super) puream: bool,
}

/// A shell of a [`BasisSet`], borrowing its primitives from the pool.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shell<'a> {
    pub index: usize,
    pub am: u32,
    pub center: usize,
    pub position: &'a Vector3<f64>,
    pub first_function: usize,
    pub first_cartesian: usize,
    pub exponents: &'a [f64],
    pub coefficients: &'a [f64],
    pub original_coefficients: &'a [f64],
    pub erd_coefficients: &'a [f64],
    pub spherical: bool,
}

impl Shell<'_> {
    pub fn nprimitive(&self) -> usize {
        self.exponents.len()
    }

    pub fn ncartesian(&self) -> usize {
        angular::cartesian_count(self.am)
    }

    pub fn nfunction(&self) -> usize {
        angular::function_count(self.am, self.spherical)
    }

    pub fn am_letter(&self) -> char {
        angular::letter_from_am(self.am).unwrap_or('?')
    }
}

impl BasisSet {
    /// The basis set of nothing: a single S function with exponent zero at the
    /// origin.
    pub fn empty() -> Self {
        Self {
            name: EMPTY_NAME.to_owned(),
            exponents: vec![0.0],
            coefficients: vec![1.0],
            original_coefficients: vec![1.0],
            erd_coefficients: vec![1.0],
            shell_am: vec![0],
            shell_nprimitive: vec![1],
            shell_first_primitive: vec![0],
            shell_center: vec![0],
            shell_first_function: vec![0],
            shell_first_cartesian: vec![0],
            center_nshell: vec![1],
            center_first_shell: vec![0],
            center_position: vec![Vector3::zeros()],
            center_label: vec![String::new()],
            function_to_shell: vec![0],
            function_to_center: vec![0],
            cartesian_to_shell: vec![0],
            nprimitive: 1,
            ncartesian: 1,
            nfunction: 1,
            max_am: 0,
            max_nprimitive: 1,
            puream: false,
        }
    }

    /// Whether this is the basis set returned by [`BasisSet::empty`].
    pub fn is_empty_sentinel(&self) -> bool {
        *self == Self::empty()
    }

    /// Distinct basis names used, joined by ` + `.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nshell(&self) -> usize {
        self.shell_am.len()
    }

    pub fn ncenter(&self) -> usize {
        self.center_nshell.len()
    }

    /// Number of primitives summed over all shells.
    pub fn nprimitive(&self) -> usize {
        self.nprimitive
    }

    /// Size of the primitive pool.
    pub fn n_unique_primitives(&self) -> usize {
        self.exponents.len()
    }

    /// Number of cartesian functions (atomic orbitals).
    pub fn nao(&self) -> usize {
        self.ncartesian
    }

    /// Number of basis functions under the basis set's convention.
    pub fn nbf(&self) -> usize {
        self.nfunction
    }

    pub fn max_am(&self) -> u32 {
        self.max_am
    }

    pub fn max_nprimitive(&self) -> usize {
        self.max_nprimitive
    }

    pub fn has_puream(&self) -> bool {
        self.puream
    }

    pub fn convention(&self) -> Convention {
        Convention::from_puream(self.puream)
    }

    pub fn shell(&self, index: usize) -> Option<Shell<'_>> {
        if index >= self.nshell() {
            return None;
        }

        let primitives = self.shell_first_primitive[index]
            ..self.shell_first_primitive[index] + self.shell_nprimitive[index];
        let center = self.shell_center[index];

        Some(Shell {
            index,
            am: self.shell_am[index],
            center,
            position: &self.center_position[center],
            first_function: self.shell_first_function[index],
            first_cartesian: self.shell_first_cartesian[index],
            exponents: &self.exponents[primitives.clone()],
            coefficients: &self.coefficients[primitives.clone()],
            original_coefficients: &self.original_coefficients[primitives.clone()],
            erd_coefficients: &self.erd_coefficients[primitives],
            spherical: self.puream,
        })
    }

    /// The `index`-th shell on `center`.
    pub fn shell_on_center(&self, center: usize, index: usize) -> Option<Shell<'_>> {
        self.shell_on_center_index(center, index)
            .and_then(|shell| self.shell(shell))
    }

    /// Absolute index of the `index`-th shell on `center`.
    pub fn shell_on_center_index(&self, center: usize, index: usize) -> Option<usize> {
        let nshell = *self.center_nshell.get(center)?;
        (index < nshell).then(|| self.center_first_shell[center] + index)
    }

    pub fn shells(&self) -> impl Iterator<Item = Shell<'_>> + '_ {
        (0..self.nshell()).filter_map(|index| self.shell(index))
    }

    pub fn nshell_on_center(&self, center: usize) -> usize {
        self.center_nshell[center]
    }

    pub fn center_position(&self, center: usize) -> &Vector3<f64> {
        &self.center_position[center]
    }

    pub fn center_label(&self, center: usize) -> &str {
        &self.center_label[center]
    }

    pub fn shell_to_center(&self, shell: usize) -> usize {
        self.shell_center[shell]
    }

    /// First basis function of `shell`.
    pub fn shell_to_basis_function(&self, shell: usize) -> usize {
        self.shell_first_function[shell]
    }

    /// First cartesian function of `shell`.
    pub fn shell_to_ao_function(&self, shell: usize) -> usize {
        self.shell_first_cartesian[shell]
    }

    pub fn function_to_shell(&self, function: usize) -> usize {
        self.function_to_shell[function]
    }

    pub fn function_to_center(&self, function: usize) -> usize {
        self.function_to_center[function]
    }

    pub fn ao_to_shell(&self, ao: usize) -> usize {
        self.cartesian_to_shell[ao]
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

impl Default for BasisSet {
    fn default() -> Self {
        Self::empty()
    }
}
