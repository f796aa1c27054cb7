use gbasis::{
    atom::Atom,
    basis::{BasisSet, BuildOptions},
    catalogue::ShellCatalogue,
    g94::ShellRecordParser,
    molecule::{Molecule, ORBITAL_BASIS},
};
use std::error::Error;

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

const SIX_31G: &str = "\
****
H     0
S   3   1.00
     18.7311370              0.03349460
      2.8253937              0.23472695
      0.6401217              0.81375733
S   1   1.00
      0.1612778              1.0000000
****
C     0
S   6   1.00
   3047.5249000              0.0018347
    457.3695100              0.0140373
    103.9486900              0.0688426
     29.2101550              0.2321844
      9.2866630              0.4679413
      3.1639270              0.3623120
SP   3   1.00
      7.8682724             -0.1193324              0.0689991
      1.8812885             -0.1608542              0.3164240
      0.5442493              1.1434564              0.7443083
SP   1   1.00
      0.1687144              1.0000000              1.0000000
****
";

/// A straight chain of `n` carbons with two hydrogens each.
fn alkane_chain(n: usize) -> Molecule {
    let mut atoms = Vec::with_capacity(3 * n);
    for i in 0..n {
        let x = 2.9 * i as f64;
        atoms.push(Atom::new("C", Vector3::new(x, 0.0, 0.0)));
        atoms.push(Atom::new("H", Vector3::new(x, 2.0, 0.0)));
        atoms.push(Atom::new("H", Vector3::new(x, -2.0, 0.0)));
    }

    let mut molecule = Molecule::new(atoms);
    molecule.set_basis_all_atoms(ORBITAL_BASIS, "6-31G");
    molecule
}

fn bench_parse(c: &mut Criterion) -> Result<(), Box<dyn Error>> {
    let parser = ShellRecordParser::new();

    c.bench_function("Parse 6-31G C", |b| {
        b.iter(|| parser.parse(SIX_31G, "C").map(|parsed| parsed.shells.len()))
    });

    Ok(())
}

fn bench_construct(c: &mut Criterion) -> Result<(), Box<dyn Error>> {
    let parser = ShellRecordParser::new();
    let mut catalogue = ShellCatalogue::new();
    for label in ["C", "H"] {
        catalogue.insert("6-31G", label, parser.parse(SIX_31G, label)?.shells);
    }

    for n in [1, 10, 100] {
        let molecule = alkane_chain(n);

        c.bench_function(&format!("Construct 6-31G C{n}H{}", 2 * n), |b| {
            b.iter(|| {
                BasisSet::construct(
                    &molecule,
                    ORBITAL_BASIS,
                    &catalogue,
                    &BuildOptions::default(),
                )
            })
        });
    }

    Ok(())
}

fn bench_basis(c: &mut Criterion) {
    bench_parse(c).unwrap();
    bench_construct(c).unwrap();
}

criterion_group!(benches, bench_basis);
criterion_main!(benches);
