use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tippool", about = "Football prediction consensus aggregator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch all sources, consolidate and render today's digest
    Digest {
        /// Render only the top N matches instead of the full report
        #[arg(long)]
        top: Option<usize>,
        /// Minimum average confidence for a match to be kept
        #[arg(long, default_value = "65")]
        min_confidence: u8,
        /// Maximum matches in a full report
        #[arg(long, default_value = "10")]
        max_records: usize,
        /// Deliver through the configured sink instead of printing
        #[arg(long)]
        send: bool,
        /// Emit the machine-readable run summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Consolidate and rank a JSON array of match records
    Consolidate {
        /// JSON array of records: {source, home_team, away_team, prediction, confidence, ...}
        json: String,
        #[arg(long, default_value = "65")]
        min_confidence: u8,
    },
    /// Per-source accuracy statistics from prediction history
    Stats,
    /// Record the actual outcome label for a stored prediction
    Resolve {
        /// Prediction id (see `history`)
        id: String,
        /// Actual result label (1, X, 2, OVER, ...)
        outcome: String,
    },
    /// Recent prediction summaries as JSON
    History {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}
