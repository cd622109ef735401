//! Offline training job: fit the payoff model from a CSV dataset and
//! persist the artifact the serving side loads.
//!
//! Run with: `cargo run --bin train -- data/history.csv`

use clap::Parser;
use danaga::{config, FEATURE_NAMES, TARGET};
use danaga::{ModelTrainer, Table, DEFAULT_TEST_FRACTION};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "train", about = "Train the debt payoff regression model")]
struct Args {
    /// CSV file with the labeled financial records (header row required).
    data: PathBuf,

    /// Where to write the model artifact.
    /// Defaults to model.bin inside $DANAGA_DATA_DIR (or ./artifacts).
    #[arg(long)]
    artifact: Option<PathBuf>,

    /// Holdout fraction used for evaluation.
    #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
    test_fraction: f64,

    /// Target column name.
    #[arg(long, default_value = TARGET)]
    target: String,

    /// Suppress progress output.
    #[arg(long)]
    quiet: bool,
}

fn run(args: Args) -> Result<(), danaga::Error> {
    let artifact_path = args
        .artifact
        .unwrap_or_else(config::default_artifact_path);

    let table = Table::from_csv(&args.data)?;
    if !args.quiet {
        println!(
            "[danaga] loaded {} rows, {} columns from {}",
            table.len(),
            table.columns().len(),
            args.data.display()
        );
    }

    let mut trainer =
        ModelTrainer::new(table, &FEATURE_NAMES, &args.target).verbose(!args.quiet);
    trainer.prepare_data(args.test_fraction)?;
    trainer.train()?;
    let report = trainer.evaluate()?;
    trainer.save(&artifact_path)?;

    println!("{}", report);
    println!("[danaga] artifact written to {}", artifact_path.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
