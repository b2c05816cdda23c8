//! Prints and compares histogram bucket boundaries for the hybrid and logarithmic bucketing schemes.

#![deny(warnings)]
#![deny(missing_docs)]

use anyhow::Context as _;
use clap::Parser as _;
use loghist::Quantizer;
use tracing::{debug, error};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

mod cli;
use self::cli::{Action, Cli};

mod config;
use self::config::Bucketing;

mod table;

fn main() {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{:?}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), anyhow::Error> {
    let bucketing = Bucketing::resolve(cli.config.as_deref(), cli.descriptor)
        .context("Failed to resolve quantizer configuration.")?;
    let quantizer = Quantizer::new(bucketing.config);
    let schemes = &bucketing.schemes;

    let table = match cli.action {
        Action::Bounds { start, end } => {
            let indices = table::indices(start, end)?;
            table::bounds(&quantizer, schemes, indices).context("Failed to compute bucket bounds.")?
        }
        Action::Classify { values } => {
            table::classify(&quantizer, schemes, &values).context("Failed to classify values.")?
        }
        Action::LowerBounds { start, end, step } => {
            let values = table::steps(start, end, step)?;
            table::lower_bounds(&quantizer, schemes, values).context("Failed to compute lower bounds.")?
        }
    };

    debug!(rows = table.rows().len(), "Built table.");
    print!("{}", table);
    Ok(())
}
