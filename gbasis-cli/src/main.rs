use std::{io, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use gbasis::{
    angular::Convention,
    atom::symbol_from_label,
    basis::{BasisSet, ShellRecord},
    catalogue::ShellCatalogue,
    config::{BuildConfig, ConfigMolecule},
    g94::ShellRecordParser,
    molecule::Molecule,
};
use log::{info, warn};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: BasisCommand,
}

#[derive(Subcommand, Debug)]
enum BasisCommand {
    /// Reads the shells of a single label from a basis file
    Parse {
        /// Basis set name, looked up in the search path, or a path to a .gbs file
        #[arg(long, short)]
        basis: String,
        /// Atom label to read, such as `O` or `H1`
        #[arg(long, short, required_unless_present = "list")]
        label: Option<String>,
        /// List every label in the file instead
        #[arg(long)]
        list: bool,
        /// Extra directories searched before GBASIS_PATH
        #[arg(long = "basis-path")]
        basis_path: Vec<PathBuf>,
        #[command(flatten)]
        convention: ConventionArgs,
        /// Print JSON instead of a listing
        #[arg(long)]
        json: bool,
    },
    /// Builds the basis set of a molecule
    Build {
        /// A path to the molecule to build the basis set for
        #[arg(long, short)]
        molecule: PathBuf,
        /// A json file of build settings; flags take precedence over it
        #[arg(long, short)]
        config: Option<PathBuf>,
        /// Extra directories searched before GBASIS_PATH
        #[arg(long = "basis-path")]
        basis_path: Vec<PathBuf>,
        /// Which basis assignment of the molecule to build
        #[arg(long)]
        role: Option<String>,
        #[command(flatten)]
        convention: ConventionArgs,
        /// Print the basis set as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct ConventionArgs {
    /// Use spherical harmonic functions regardless of the basis file
    #[arg(long, action = ArgAction::SetTrue)]
    puream: bool,
    /// Use cartesian functions regardless of the basis file
    #[arg(long, action = ArgAction::SetTrue)]
    cartesian: bool,
}

impl ConventionArgs {
    fn puream(&self) -> Option<bool> {
        match (self.puream, self.cartesian) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    basis: &'a str,
    label: &'a str,
    convention: Convention,
    shells: &'a [ShellRecord],
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Cli::parse();

    match args.command {
        BasisCommand::Parse {
            basis,
            label,
            list,
            basis_path,
            convention,
            json,
        } => {
            let config = BuildConfig {
                puream: convention.puream(),
                basis_path,
                ..Default::default()
            };

            let file = config
                .library()
                .load(&basis)
                .with_context(|| format!("unable to load basis {basis}"))?;

            if list {
                let labels = ShellRecordParser::labels(&file.text);
                if json {
                    serde_json::to_writer_pretty(io::stdout(), &labels)?;
                    println!();
                } else {
                    for label in labels {
                        println!("{label}");
                    }
                }
                return Ok(());
            }

            let label = label.context("a label is required")?;
            let parser = config.parser();
            let parsed = match parser.parse(&file.text, &label) {
                Err(error) if error.is_not_found() => {
                    let symbol = symbol_from_label(&label);
                    warn!("no {basis} entry for label {label}, falling back to symbol {symbol}");
                    parser.parse(&file.text, symbol)
                }
                other => other,
            }
            .with_context(|| format!("unable to read {label} from {}", file.path.display()))?;

            if json {
                let output = ParseOutput {
                    basis: &basis,
                    label: &label,
                    convention: parsed.convention,
                    shells: &parsed.shells,
                };
                serde_json::to_writer_pretty(io::stdout(), &output)?;
                println!();
            } else {
                let mut catalogue = ShellCatalogue::new();
                catalogue.insert(basis.as_str(), label.as_str(), parsed.shells);
                let basis_set = BasisSet::for_label(&basis, &label, &catalogue, &config.options())?;
                print!("{}", basis_set.detail());
            }
        }

        BasisCommand::Build {
            molecule,
            config,
            basis_path,
            role,
            convention,
            json,
        } => {
            let mut config = match config {
                Some(path) => BuildConfig::load(&path)
                    .with_context(|| format!("unable to read {}", path.display()))?,
                None => BuildConfig::default(),
            };
            config.basis_path.extend(basis_path);
            if let Some(role) = role {
                config.role = role;
            }
            if let Some(puream) = convention.puream() {
                config.puream = Some(puream);
            }

            let molecule = ConfigMolecule::load(&molecule)
                .and_then(Molecule::try_from)
                .with_context(|| format!("unable to read molecule {}", molecule.display()))?;

            let start = Instant::now();
            let basis_set = config.build(&molecule)?;
            info!("basis set built in {:0.2?}", start.elapsed());

            if json {
                serde_json::to_writer_pretty(io::stdout(), &basis_set)?;
                println!();
            } else {
                print!("{}", basis_set.detail());
            }
        }
    }

    Ok(())
}
