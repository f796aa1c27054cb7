use std::{collections::HashMap, ops::Range};

use itertools::Itertools;
use log::{debug, info};
use nalgebra::Vector3;

use crate::{
    angular::{self, Convention},
    atom::Atom,
    catalogue::ShellCatalogue,
    error::{BasisError, Result},
    molecule::{Molecule, ORBITAL_BASIS},
};

use super::{set::BasisSet, ShellRecord};

/// Caller choices for [`BasisSet::construct`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BuildOptions {
    /// Overrides the convention declared by the basis files.
    pub convention: Option<Convention>,
}

/// Slice of the primitive pool reserved for one (basis, label) pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PoolRange {
    start: usize,
    len: usize,
}

impl PoolRange {
    fn end(&self) -> usize {
        self.start + self.len
    }

    fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// One copy of the primitives of each (basis, label) pair.
#[derive(Default)]
struct PrimitivePool<'a> {
    exponents: Vec<f64>,
    coefficients: Vec<f64>,
    original_coefficients: Vec<f64>,
    erd_coefficients: Vec<f64>,
    reserved: HashMap<(&'a str, &'a str), PoolRange>,
}

impl<'a> PrimitivePool<'a> {
    /// Appends the primitives of `shells`, in record order, unless the pair
    /// already owns a range.
    fn reserve(&mut self, key: (&'a str, &'a str), shells: &[ShellRecord]) -> PoolRange {
        if let Some(&range) = self.reserved.get(&key) {
            return range;
        }

        let start = self.exponents.len();
        for shell in shells {
            self.exponents.extend_from_slice(shell.exponents());
            self.coefficients.extend_from_slice(shell.coefficients());
            self.original_coefficients
                .extend_from_slice(shell.original_coefficients());
            self.erd_coefficients.extend_from_slice(shell.erd_coefficients());
        }

        let range = PoolRange {
            start,
            len: self.exponents.len() - start,
        };
        debug!("pool range {:?} reserved for {} {}", range.range(), key.0, key.1);

        self.reserved.insert(key, range);
        range
    }
}

/// Pool offsets of the first primitive of each of `shells`, laid out back to
/// back in `range`. The shells must fill the range exactly and match the
/// exponents stored there; otherwise the number of primitives consumed when
/// the mismatch was found is returned.
fn claim_offsets(
    range: PoolRange,
    pool: &[f64],
    shells: &[ShellRecord],
) -> std::result::Result<Vec<usize>, usize> {
    let mut offsets = Vec::with_capacity(shells.len());
    let mut consumed = 0;

    for shell in shells {
        let first = range.start + consumed;
        consumed += shell.nprimitive();

        let claimed = pool.get(first..range.start + consumed);
        if consumed > range.len || claimed != Some(shell.exponents()) {
            return Err(consumed);
        }
        offsets.push(first);
    }

    if consumed != range.len {
        return Err(consumed);
    }

    Ok(offsets)
}

/// The shells one atom carries and the pool range they draw from.
struct Placement<'a> {
    basis: &'a str,
    label: &'a str,
    shells: &'a [ShellRecord],
    pool: PoolRange,
}

/// Totals of the sizing pass.
#[derive(Default)]
struct Sizes {
    nshell: usize,
    ncartesian: usize,
    nfunction: usize,
    nprimitive: usize,
    max_am: u32,
    max_nprimitive: usize,
}

impl BasisSet {
    /// Places the shells of `catalogue` on the atoms of `molecule`, using the
    /// basis assigned for `role`.
    ///
    /// A molecule without atoms (or whose atoms carry no shells) yields
    /// [`BasisSet::empty`].
    pub fn construct(
        molecule: &Molecule,
        role: &str,
        catalogue: &ShellCatalogue,
        options: &BuildOptions,
    ) -> Result<Self> {
        // primitive pool, one range per distinct (basis, label)
        let mut pool = PrimitivePool::default();
        let mut placements = Vec::with_capacity(molecule.atom_count());
        for atom in 0..molecule.atom_count() {
            let label = molecule.label(atom);
            let no_basis = |basis: Option<&str>| BasisError::NoBasisAssigned {
                atom,
                label: label.to_owned(),
                role: role.to_owned(),
                basis: basis.map(str::to_owned),
                file: None,
                searched: Vec::new(),
            };

            let basis = molecule
                .basis_name(atom, role)
                .ok_or_else(|| no_basis(None))?;
            let shells = catalogue
                .get(basis, label)
                .ok_or_else(|| no_basis(Some(basis)))?;

            placements.push(Placement {
                basis,
                label,
                shells,
                pool: pool.reserve((basis, label), shells),
            });
        }

        // only the shells placed on this molecule decide the convention
        let puream = options
            .convention
            .unwrap_or_else(|| {
                Convention::from_puream(
                    placements
                        .iter()
                        .flat_map(|placement| placement.shells)
                        .any(ShellRecord::is_spherical),
                )
            })
            .is_spherical();

        // sizing
        let sizes = placements
            .iter()
            .flat_map(|placement| placement.shells)
            .fold(Sizes::default(), |mut sizes, shell| {
                sizes.nshell += 1;
                sizes.ncartesian += shell.ncartesian();
                sizes.nfunction += angular::function_count(shell.am(), puream);
                sizes.nprimitive += shell.nprimitive();
                sizes.max_am = sizes.max_am.max(shell.am());
                sizes.max_nprimitive = sizes.max_nprimitive.max(shell.nprimitive());
                sizes
            });

        if sizes.nshell == 0 {
            info!("no shells on {} atoms, using the empty basis set", molecule.atom_count());
            return Ok(Self::empty());
        }

        let natom = molecule.atom_count();
        let mut basis_set = Self {
            name: placements
                .iter()
                .map(|placement| placement.basis)
                .unique()
                .join(" + "),
            exponents: pool.exponents,
            coefficients: pool.coefficients,
            original_coefficients: pool.original_coefficients,
            erd_coefficients: pool.erd_coefficients,
            shell_am: Vec::with_capacity(sizes.nshell),
            shell_nprimitive: Vec::with_capacity(sizes.nshell),
            shell_first_primitive: Vec::with_capacity(sizes.nshell),
            shell_center: Vec::with_capacity(sizes.nshell),
            shell_first_function: Vec::with_capacity(sizes.nshell),
            shell_first_cartesian: Vec::with_capacity(sizes.nshell),
            center_nshell: Vec::with_capacity(natom),
            center_first_shell: Vec::with_capacity(natom),
            center_position: molecule.atoms().iter().map(|atom| *atom.position()).collect(),
            center_label: molecule
                .atoms()
                .iter()
                .map(|atom| atom.label().to_owned())
                .collect(),
            function_to_shell: Vec::with_capacity(sizes.nfunction),
            function_to_center: Vec::with_capacity(sizes.nfunction),
            cartesian_to_shell: Vec::with_capacity(sizes.ncartesian),
            nprimitive: sizes.nprimitive,
            ncartesian: sizes.ncartesian,
            nfunction: sizes.nfunction,
            max_am: sizes.max_am,
            max_nprimitive: sizes.max_nprimitive,
            puream,
        };

        // expansion
        for (atom, placement) in placements.iter().enumerate() {
            basis_set.center_first_shell.push(basis_set.shell_am.len());
            basis_set.center_nshell.push(placement.shells.len());

            let offsets = claim_offsets(placement.pool, &basis_set.exponents, placement.shells)
                .map_err(|consumed| BasisError::PoolMismatch {
                    atom,
                    basis: placement.basis.to_owned(),
                    label: placement.label.to_owned(),
                    consumed,
                    reserved: placement.pool.len,
                })?;

            for (shell, first_primitive) in placement.shells.iter().zip(offsets) {
                let index = basis_set.shell_am.len();
                let nfunction = angular::function_count(shell.am(), puream);

                basis_set.shell_am.push(shell.am());
                basis_set.shell_nprimitive.push(shell.nprimitive());
                basis_set.shell_first_primitive.push(first_primitive);
                basis_set.shell_center.push(atom);
                basis_set
                    .shell_first_function
                    .push(basis_set.function_to_shell.len());
                basis_set
                    .shell_first_cartesian
                    .push(basis_set.cartesian_to_shell.len());

                basis_set
                    .function_to_shell
                    .extend(std::iter::repeat(index).take(nfunction));
                basis_set
                    .function_to_center
                    .extend(std::iter::repeat(atom).take(nfunction));
                basis_set
                    .cartesian_to_shell
                    .extend(std::iter::repeat(index).take(shell.ncartesian()));
            }
        }

        info!(
            "basis set {}: {} shells, {} functions ({}), {} primitives ({} unique)",
            basis_set.name,
            basis_set.nshell(),
            basis_set.nbf(),
            basis_set.convention(),
            basis_set.nprimitive(),
            basis_set.n_unique_primitives()
        );

        Ok(basis_set)
    }

    /// Extracts the shells on `center` into a basis set of its own.
    pub fn for_center(&self, center: usize) -> Result<Self> {
        if center >= self.ncenter() {
            return Err(BasisError::CenterOutOfRange {
                center,
                ncenter: self.ncenter(),
            });
        }

        let first = self.center_first_shell[center];
        let shells = first..first + self.center_nshell[center];
        if shells.is_empty() {
            return Ok(Self::empty());
        }

        let mut extracted = Self {
            name: self.name.clone(),
            exponents: Vec::new(),
            coefficients: Vec::new(),
            original_coefficients: Vec::new(),
            erd_coefficients: Vec::new(),
            shell_am: self.shell_am[shells.clone()].to_vec(),
            shell_nprimitive: self.shell_nprimitive[shells.clone()].to_vec(),
            shell_first_primitive: Vec::with_capacity(shells.len()),
            shell_center: vec![0; shells.len()],
            shell_first_function: Vec::with_capacity(shells.len()),
            shell_first_cartesian: Vec::with_capacity(shells.len()),
            center_nshell: vec![shells.len()],
            center_first_shell: vec![0],
            center_position: vec![self.center_position[center]],
            center_label: vec![self.center_label[center].clone()],
            function_to_shell: Vec::new(),
            function_to_center: Vec::new(),
            cartesian_to_shell: Vec::new(),
            nprimitive: 0,
            ncartesian: 0,
            nfunction: 0,
            max_am: 0,
            max_nprimitive: 0,
            puream: self.puream,
        };

        for (local, shell) in shells.enumerate() {
            let am = self.shell_am[shell];
            let nprimitive = self.shell_nprimitive[shell];
            let nfunction = angular::function_count(am, self.puream);
            let ncartesian = angular::cartesian_count(am);

            let primitives =
                self.shell_first_primitive[shell]..self.shell_first_primitive[shell] + nprimitive;
            extracted
                .shell_first_primitive
                .push(extracted.exponents.len());
            extracted
                .exponents
                .extend_from_slice(&self.exponents[primitives.clone()]);
            extracted
                .coefficients
                .extend_from_slice(&self.coefficients[primitives.clone()]);
            extracted
                .original_coefficients
                .extend_from_slice(&self.original_coefficients[primitives.clone()]);
            extracted
                .erd_coefficients
                .extend_from_slice(&self.erd_coefficients[primitives]);

            extracted
                .shell_first_function
                .push(extracted.function_to_shell.len());
            extracted
                .shell_first_cartesian
                .push(extracted.cartesian_to_shell.len());
            extracted
                .function_to_shell
                .extend(std::iter::repeat(local).take(nfunction));
            extracted
                .function_to_center
                .extend(std::iter::repeat(0).take(nfunction));
            extracted
                .cartesian_to_shell
                .extend(std::iter::repeat(local).take(ncartesian));

            extracted.nprimitive += nprimitive;
            extracted.ncartesian += ncartesian;
            extracted.nfunction += nfunction;
            extracted.max_am = extracted.max_am.max(am);
            extracted.max_nprimitive = extracted.max_nprimitive.max(nprimitive);
        }

        Ok(extracted)
    }

    /// Atom block of a molecule with a single atom at the origin; convenient
    /// for inspecting the shells of one label.
    pub fn for_label(
        basis: &str,
        label: &str,
        catalogue: &ShellCatalogue,
        options: &BuildOptions,
    ) -> Result<Self> {
        let mut molecule = Molecule::new(vec![Atom::labeled(label, Vector3::zeros())]);
        molecule.set_basis_all_atoms(ORBITAL_BASIS, basis);

        Self::construct(&molecule, ORBITAL_BASIS, catalogue, options)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::g94::ShellRecordParser;

    macro_rules! molecule {
        ($basis:literal; $(
            $label:literal => ($x:expr, $y:expr, $z:expr)
        ),*) => {{
            let mut molecule = $crate::molecule::Molecule::new(vec![
                $($crate::atom::Atom::labeled($label, ::nalgebra::Vector3::new($x, $y, $z))),*
            ]);
            molecule.set_basis_all_atoms(ORBITAL_BASIS, $basis);
            molecule
        }};
    }

    const OXYGEN: &str = "\
O    0
S   3   1.0
130.7093200      0.15432897
23.80886100      0.53532814
6.44360830       0.44463454
****
";

    const CC_PVDZ_H: &str = "\
spherical
****
H     0
S   3   1.00
     13.0100000              0.0196850
      1.9620000              0.1379770
      0.4446000              0.4781480
S   1   1.00
      0.1220000              1.0000000
P   1   1.00
      0.7270000              1.0000000
****
C     0
S   8   1.00
   6665.0000000              0.0006920
   1000.0000000              0.0053290
    228.0000000              0.0270770
     64.7100000              0.1017180
     21.0600000              0.2747400
      7.4950000              0.4485640
      2.7970000              0.2850740
      0.5215000              0.0152040
S   1   1.00
      0.1596000              1.0000000
P   3   1.00
      9.4390000              0.0381090
      2.0020000              0.2094800
      0.5456000              0.5085570
P   1   1.00
      0.1517000              1.0000000
D   1   1.00
      0.5500000              1.0000000
****
";

    const STO_3G_C: &str = "\
C     0
S   3   1.00
     71.6168370              0.15432897
     13.0450960              0.53532814
      3.5305122              0.44463454
SP   3   1.00
      2.9412494             -0.09996723             0.15591627
      0.6834831              0.39951283             0.60768372
      0.2222899              0.70011547             0.39195739
****
";

    fn catalogue(basis: &str, text: &str, labels: &[&str]) -> ShellCatalogue {
        let mut catalogue = ShellCatalogue::new();
        fill(&mut catalogue, basis, text, labels);
        catalogue
    }

    /// Parses `labels` (falling back to their symbols) into `catalogue`.
    fn fill(catalogue: &mut ShellCatalogue, basis: &str, text: &str, labels: &[&str]) {
        for &label in labels {
            let symbol = crate::atom::symbol_from_label(label);
            let parsed = ShellRecordParser::new()
                .parse(text, label)
                .or_else(|_| ShellRecordParser::new().parse(text, symbol))
                .unwrap();
            catalogue.insert(basis, label, parsed.shells);
        }
    }

    /// Checks the index arrays against each other.
    fn assert_consistent(basis: &BasisSet) {
        assert_eq!(basis.function_to_shell.len(), basis.nbf());
        assert_eq!(basis.function_to_center.len(), basis.nbf());
        assert_eq!(basis.cartesian_to_shell.len(), basis.nao());
        assert_eq!(
            basis.center_nshell.iter().sum::<usize>(),
            basis.nshell()
        );

        for shell in basis.shells() {
            for function in shell.first_function..shell.first_function + shell.nfunction() {
                assert_eq!(basis.function_to_shell(function), shell.index);
                assert_eq!(basis.function_to_center(function), shell.center);
            }
            for ao in shell.first_cartesian..shell.first_cartesian + shell.ncartesian() {
                assert_eq!(basis.ao_to_shell(ao), shell.index);
            }
            assert!(shell.nprimitive() <= basis.max_nprimitive());
            assert!(shell.am <= basis.max_am());
        }

        for center in 0..basis.ncenter() {
            for i in 0..basis.nshell_on_center(center) {
                let shell = basis.shell_on_center(center, i).unwrap();
                assert_eq!(shell.center, center);
                assert_eq!(basis.shell_to_center(shell.index), center);
            }
        }

        assert_eq!(
            basis.shells().map(|shell| shell.nprimitive()).sum::<usize>(),
            basis.nprimitive()
        );
    }

    #[test]
    fn single_oxygen() {
        let molecule = molecule!("sto-3g"; "O" => (0.0, 0.0, 0.0));
        let catalogue = catalogue("sto-3g", OXYGEN, &["O"]);

        let basis =
            BasisSet::construct(&molecule, ORBITAL_BASIS, &catalogue, &BuildOptions::default())
                .unwrap();

        assert_eq!(basis.nshell(), 1);
        assert_eq!(basis.max_am(), 0);
        assert_eq!(basis.nprimitive(), 3);
        assert_eq!(basis.nbf(), 1);
        assert_eq!(basis.nao(), 1);
        assert_eq!(basis.name(), "sto-3g");
        assert!(!basis.is_empty_sentinel());

        let shell = basis.shell(0).unwrap();
        assert_eq!(shell.original_coefficients, &[0.15432897, 0.53532814, 0.44463454]);
        assert_consistent(&basis);
    }

    #[test]
    fn no_atoms_is_the_empty_basis() {
        let basis = BasisSet::construct(
            &Molecule::default(),
            ORBITAL_BASIS,
            &ShellCatalogue::new(),
            &BuildOptions::default(),
        )
        .unwrap();

        assert!(basis.is_empty_sentinel());
        assert_eq!(basis, BasisSet::empty());
    }

    #[test]
    fn d_shell_function_counts() {
        let text = "C 0\nD 1 1.00\n 0.55 1.0\n****\n";
        let molecule = molecule!("x"; "C" => (0.0, 0.0, 0.0));
        let catalogue = catalogue("x", text, &["C"]);

        let cartesian = BasisSet::construct(
            &molecule,
            ORBITAL_BASIS,
            &catalogue,
            &BuildOptions {
                convention: Some(Convention::Cartesian),
            },
        )
        .unwrap();
        assert_eq!(cartesian.nao(), 6);
        assert_eq!(cartesian.nbf(), 6);
        assert!(!cartesian.has_puream());

        let spherical = BasisSet::construct(
            &molecule,
            ORBITAL_BASIS,
            &catalogue,
            &BuildOptions {
                convention: Some(Convention::Spherical),
            },
        )
        .unwrap();
        assert_eq!(spherical.nao(), 6);
        assert_eq!(spherical.nbf(), 5);
        assert!(spherical.has_puream());
        assert_consistent(&spherical);
    }

    #[test]
    fn declared_convention_is_inherited() {
        let molecule = molecule!("cc-pvdz";
            "C" => (0.0, 0.0, 0.0),
            "H1" => (0.0, 0.0, 2.05)
        );
        let catalogue = catalogue("cc-pvdz", CC_PVDZ_H, &["C", "H1"]);

        let basis =
            BasisSet::construct(&molecule, ORBITAL_BASIS, &catalogue, &BuildOptions::default())
                .unwrap();

        assert!(basis.has_puream());
        // C: 2s 2p 1d, H: 2s 1p
        assert_eq!(basis.nshell(), 8);
        assert_eq!(basis.nbf(), 2 + 2 * 3 + 5 + 2 + 3);
        assert_eq!(basis.nao(), 2 + 2 * 3 + 6 + 2 + 3);
        assert_eq!(basis.max_am(), 2);
        assert_eq!(basis.max_nprimitive(), 8);
        assert_eq!(basis.nshell_on_center(0), 5);
        assert_eq!(basis.nshell_on_center(1), 3);
        assert_eq!(basis.center_label(1), "H1");
        assert_relative_eq!(basis.center_position(1).z, 2.05);
        assert_consistent(&basis);
    }

    #[test]
    fn unused_catalogue_entries_do_not_set_the_convention() {
        let mut catalogue = catalogue("cartesian", "C 0\nD 1 1.00\n 0.55 1.0\n****\n", &["C"]);
        fill(&mut catalogue, "cc-pvdz", CC_PVDZ_H, &["H"]);
        assert_eq!(catalogue.declared_convention(), Convention::Spherical);

        let molecule = molecule!("cartesian"; "C" => (0.0, 0.0, 0.0));
        let basis =
            BasisSet::construct(&molecule, ORBITAL_BASIS, &catalogue, &BuildOptions::default())
                .unwrap();

        assert!(!basis.has_puream());
        assert_eq!(basis.nbf(), 6);
        assert_consistent(&basis);
    }

    #[test]
    fn pool_offsets_must_fill_their_range() {
        let shells = ShellRecordParser::new().parse(STO_3G_C, "C").unwrap().shells;
        let mut pool = PrimitivePool::default();
        let range = pool.reserve(("sto-3g", "C"), &shells);

        assert_eq!(
            claim_offsets(range, &pool.exponents, &shells),
            Ok(vec![0, 3, 6])
        );

        // one primitive too many reserved
        let wide = PoolRange {
            len: range.len + 1,
            ..range
        };
        assert_eq!(claim_offsets(wide, &pool.exponents, &shells), Err(9));

        // too few, the last shell overruns
        let narrow = PoolRange {
            len: range.len - 1,
            ..range
        };
        assert_eq!(claim_offsets(narrow, &pool.exponents, &shells), Err(9));

        // right size, wrong primitives
        let shifted = PoolRange { start: 3, len: 6 };
        assert_eq!(
            claim_offsets(shifted, &pool.exponents, &shells[..2]),
            Err(3)
        );
    }

    #[test]
    fn pool_is_shared_between_atoms_with_the_same_label() {
        let catalogue = catalogue("sto-3g", STO_3G_C, &["C"]);

        let one = molecule!("sto-3g"; "C" => (0.0, 0.0, 0.0));
        let two = molecule!("sto-3g"; "C" => (0.0, 0.0, 0.0), "C" => (1.339, 0.0, 0.0));

        let one =
            BasisSet::construct(&one, ORBITAL_BASIS, &catalogue, &BuildOptions::default()).unwrap();
        let two =
            BasisSet::construct(&two, ORBITAL_BASIS, &catalogue, &BuildOptions::default()).unwrap();

        assert_eq!(one.n_unique_primitives(), 9);
        assert_eq!(two.n_unique_primitives(), one.n_unique_primitives());
        assert_eq!(one.nprimitive(), 9);
        assert_eq!(two.nprimitive(), 2 * one.nprimitive());

        // both carbons point at the same primitives
        for i in 0..3 {
            let first = two.shell_on_center(0, i).unwrap();
            let second = two.shell_on_center(1, i).unwrap();
            assert_eq!(first.exponents.as_ptr(), second.exponents.as_ptr());
            assert_ne!(first.first_function, second.first_function);
        }
        assert_consistent(&two);
    }

    #[test]
    fn pool_is_not_shared_between_labels() {
        let catalogue = catalogue("sto-3g", STO_3G_C, &["C1", "C2"]);
        let molecule = molecule!("sto-3g"; "C1" => (0.0, 0.0, 0.0), "C2" => (1.339, 0.0, 0.0));

        let basis =
            BasisSet::construct(&molecule, ORBITAL_BASIS, &catalogue, &BuildOptions::default())
                .unwrap();

        assert_eq!(basis.n_unique_primitives(), 18);
        assert_eq!(basis.exponents()[..9], basis.exponents()[9..]);
    }

    #[test]
    fn random_molecules_keep_indices_consistent() {
        let labels = ["C", "H1", "H2"];
        let mut catalogue = catalogue("cc-pvdz", CC_PVDZ_H, &labels);
        fill(&mut catalogue, "sto-3g", STO_3G_C, &["C"]);

        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..32 {
            let natom = rng.gen_range(1..12);
            let mut atoms = Vec::with_capacity(natom);
            let mut mixed = Vec::new();
            for i in 0..natom {
                let label = labels[rng.gen_range(0..labels.len())];
                let position = Vector3::new(i as f64, rng.gen(), rng.gen());
                let mut atom = Atom::labeled(label, position);
                if label == "C" && rng.gen_bool(0.5) {
                    atom = atom.with_basis(ORBITAL_BASIS, "sto-3g");
                    mixed.push(i);
                }
                atoms.push(atom);
            }

            let mut molecule = Molecule::new(atoms);
            molecule.set_basis_all_atoms(ORBITAL_BASIS, "cc-pvdz");

            let basis =
                BasisSet::construct(&molecule, ORBITAL_BASIS, &catalogue, &BuildOptions::default())
                    .unwrap();

            assert_eq!(basis.ncenter(), natom);
            assert!(basis.n_unique_primitives() <= basis.nprimitive());
            assert_consistent(&basis);

            for center in mixed {
                // sto-3g carbon: S and the split SP shell
                assert_eq!(basis.nshell_on_center(center), 3);
            }
        }
    }

    #[test]
    fn missing_catalogue_entry() {
        let molecule = molecule!("sto-3g"; "O" => (0.0, 0.0, 0.0), "N" => (1.0, 0.0, 0.0));
        let catalogue = catalogue("sto-3g", OXYGEN, &["O"]);

        let error =
            BasisSet::construct(&molecule, ORBITAL_BASIS, &catalogue, &BuildOptions::default())
                .unwrap_err();

        assert!(matches!(
            error,
            BasisError::NoBasisAssigned { atom: 1, .. }
        ));
    }

    #[test]
    fn single_center_extraction() {
        let mut catalogue = catalogue("sto-3g", STO_3G_C, &["C"]);
        fill(&mut catalogue, "sto-3g", OXYGEN, &["O"]);
        let molecule = molecule!("sto-3g";
            "C" => (0.0, 0.0, 0.0),
            "O" => (0.0, 0.0, 2.13),
            "C" => (0.0, 0.0, -2.13)
        );
        let basis =
            BasisSet::construct(&molecule, ORBITAL_BASIS, &catalogue, &BuildOptions::default())
                .unwrap();

        let oxygen = basis.for_center(1).unwrap();
        assert_eq!(oxygen.ncenter(), 1);
        assert_eq!(oxygen.nshell(), 1);
        assert_eq!(oxygen.nbf(), 1);
        assert_eq!(oxygen.n_unique_primitives(), 3);
        assert_eq!(oxygen.center_label(0), "O");
        assert_relative_eq!(oxygen.center_position(0).z, 2.13);
        assert_eq!(
            oxygen.shell(0).unwrap().exponents,
            basis.shell_on_center(1, 0).unwrap().exponents
        );
        assert_consistent(&oxygen);

        let carbon = basis.for_center(2).unwrap();
        assert_eq!(carbon.nshell(), 3);
        assert_eq!(carbon.nbf(), 5);
        assert_eq!(carbon.n_unique_primitives(), 9);
        assert_consistent(&carbon);

        assert!(matches!(
            basis.for_center(3),
            Err(BasisError::CenterOutOfRange { center: 3, ncenter: 3 })
        ));
    }

    #[test]
    fn single_label() {
        let catalogue = catalogue("sto-3g", STO_3G_C, &["C"]);
        let basis =
            BasisSet::for_label("sto-3g", "C", &catalogue, &BuildOptions::default()).unwrap();

        assert_eq!(basis.nshell(), 3);
        assert_eq!(basis.nbf(), 5);
    }
}
