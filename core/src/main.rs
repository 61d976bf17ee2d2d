use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use shamir_core::{Dealer, Polynomial, ShareFile};
use shamir_math::{FieldElement, PrimeField};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const NOTE: &str = "Note: every coefficient is printed as its canonical \
representative in [0, p). A negative coefficient of the true polynomial \
appears as its equivalent non-negative residue modulo p.";

#[derive(Parser)]
#[command(name = "shamir")]
#[command(about = "Shamir secret sharing over a prime field")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover the polynomial through the shares listed in a file
    Reconstruct {
        /// Share file: modulus on the first line, one `(x,y)` per line after
        file: PathBuf,
        /// Print the polynomial as JSON
        #[arg(long)]
        json: bool,
    },
    /// Split a secret into shares and print them as a share file
    Split {
        /// Prime modulus of the field
        #[arg(long)]
        modulus: u64,
        /// Secret to share, in [0, modulus)
        #[arg(long)]
        secret: u64,
        /// Number of shares needed to recover the secret
        #[arg(long)]
        threshold: usize,
        /// Number of shares to hand out
        #[arg(long)]
        shares: usize,
        /// Seed for a reproducible split
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    polynomial: &'a Polynomial,
    secret: FieldElement,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    match args.command {
        Commands::Reconstruct { file, json } => {
            let shares = ShareFile::open(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let polynomial = shamir_core::reconstruct(&shares)
                .context("reconstruction failed")?;
            info!(degree = polynomial.degree(), "reconstructed polynomial");

            if json {
                let report = Report {
                    polynomial: &polynomial,
                    secret: polynomial.secret(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{polynomial}");
                println!();
                println!("{NOTE}");
            }
        }
        Commands::Split {
            modulus,
            secret,
            threshold,
            shares,
            seed,
        } => {
            let field = PrimeField::new(modulus)?;
            let secret = field.element(secret)?;
            let dealer = Dealer::new(&field, threshold, shares)?;
            let shares = match seed {
                Some(seed) => dealer.split(secret, &mut ChaCha20Rng::seed_from_u64(seed))?,
                None => dealer.split(secret, &mut rand::rng())?,
            };
            print!("{}", ShareFile::new(field, shares));
        }
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` filter.
fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
