use std::path::PathBuf;

use anyhow::{Context, Result};
use band_classifier::data::loader::{load_band_table, load_series};
use band_classifier::{BandTable, Classifier, Step, replay};
use clap::Parser;
use log::info;

/// Classify a series of metric values into named bands and report the
/// current band after each value.
#[derive(Parser, Debug)]
#[command(name = "band-classifier", version)]
struct Cli {
    /// Band table file (.json or .csv). Defaults to the exam score bands
    /// (fail < 60 <= medium < 90 <= excellent).
    #[arg(long, value_name = "FILE")]
    bands: Option<PathBuf>,

    /// Metric series file (.json or .csv), replayed before positional values.
    #[arg(long, value_name = "FILE")]
    values: Option<PathBuf>,

    /// Print the number of transitions and the final band at the end.
    #[arg(long)]
    summary: bool,

    /// Values to classify, in order.
    #[arg(allow_negative_numbers = true)]
    metrics: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let table = match &cli.bands {
        Some(path) => load_band_table(path)
            .with_context(|| format!("loading bands from {}", path.display()))?,
        None => BandTable::score_bands(),
    };
    info!("bands: {table}");

    let mut series = match &cli.values {
        Some(path) => load_series(path)
            .with_context(|| format!("loading values from {}", path.display()))?,
        None => Vec::new(),
    };
    series.extend(cli.metrics.iter().copied());

    let mut classifier = Classifier::with_table(table);
    let trace = replay(&mut classifier, &series);
    for step in &trace.steps {
        match step {
            Step::Classified { .. } => println!("{step}"),
            Step::Rejected(_) => eprintln!("{step}"),
        }
    }

    if cli.summary {
        println!(
            "transitions: {}, final state: {}",
            trace.transitions,
            classifier.current_label().unwrap_or("<unclassified>")
        );
        let rejected = trace.errors().len();
        if rejected > 0 {
            println!("rejected values: {rejected}");
        }
    }

    Ok(())
}
