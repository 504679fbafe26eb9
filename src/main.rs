use clap::Parser;
use tippool::application::consolidate::ConsolidationEngine;
use tippool::application::digest::DigestConfig;
use tippool::application::format::ReportMode;
use tippool::application::rank::RankingFilter;
use tippool::cli::commands::{Cli, Commands};
use tippool::domain::entities::match_record::MatchRecord;
use tippool::domain::ports::history_store::HistoryFilter;
use tippool::TipPool;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("TIPPOOL_DB").unwrap_or_else(|_| "./tippool.db".into());

    let pool = match TipPool::new(&db_path) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Error initializing tippool: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(pool, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(pool: TipPool, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Digest {
            top,
            min_confidence,
            max_records,
            send,
            json,
        } => {
            let mode = match top {
                Some(n) => ReportMode::TopN(n),
                None => ReportMode::Full,
            };
            let config = DigestConfig {
                min_confidence,
                max_records,
                mode,
                report_date: chrono::Utc::now().date_naive(),
            };

            let run = if send {
                pool.publish_digest(&config).await?
            } else {
                pool.run_digest(&config).await?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&run).unwrap());
            } else if !send {
                match &run.message {
                    Some(text) => println!("{text}"),
                    None => println!("No predictions available today."),
                }
            }
        }
        Commands::Consolidate {
            json,
            min_confidence,
        } => {
            let records: Vec<MatchRecord> = serde_json::from_str(&json)?;
            let matches = ConsolidationEngine.consolidate(&records);
            let ranked = RankingFilter.rank(&matches, min_confidence);
            println!("{}", serde_json::to_string_pretty(&ranked).unwrap());
        }
        Commands::Stats => {
            println!("{}", pool.stats_text()?);
        }
        Commands::Resolve { id, outcome } => {
            pool.resolve(&id, &outcome)?;
            println!("Prediction {id} resolved as {outcome}");
        }
        Commands::History { limit } => {
            let summaries = pool.history(&HistoryFilter {
                limit: Some(limit),
                ..Default::default()
            })?;
            println!("{}", serde_json::to_string_pretty(&summaries).unwrap());
        }
    }
    Ok(())
}
