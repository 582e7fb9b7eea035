use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::analysis::{load_series, AnalysisReport, Event};

/// Voltboard - Server-rendered voltage telemetry dashboard
#[derive(Parser)]
#[command(name = "voltboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the server (default)
    Serve,

    /// Analyze a voltage CSV offline and print the event tables
    Analyze {
        /// Path to the voltage CSV
        file: PathBuf,
    },
}

/// Offline analysis run. Prints the derived views without touching the
/// acceleration log.
pub fn run_analyze(file: &Path) -> anyhow::Result<()> {
    let series = load_series(file)?;
    let report = AnalysisReport::from_series(&series);

    println!("{} samples loaded from {}", series.len(), file.display());
    println!("{} moving-average points", report.moving_average.len());
    print_table("Peaks", &report.peaks);
    print_table("Troughs", &report.troughs);
    print_table("Below threshold", &report.below_threshold);
    print_table("Downward acceleration", &report.accelerations);
    Ok(())
}

fn print_table(title: &str, events: &[Event]) {
    println!();
    println!("{} ({})", title, events.len());
    println!("{:<10} {:<18} {:<12}", "Position", "Timestamp", "Voltage");
    println!("{}", "-".repeat(42));
    for event in events {
        println!(
            "{:<10} {:<18} {:<12.2}",
            event.index,
            event.timestamp_display(),
            event.voltage
        );
    }
}
