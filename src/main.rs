//! # Scan a chain snapshot and print ranked candidates
//! bwb-scanner scan --csv data/sample_chain.csv --symbol XYZ --expiry 2025-01-17
//!
//! # Tighter thresholds, natural leg pricing
//! bwb-scanner scan --csv data/sample_chain.csv --symbol XYZ --expiry 2025-01-17 \
//!     --min-credit 0.75 --natural
//!
//! # Serve the scanner over HTTP
//! bwb-scanner serve --data-dir data --addr 127.0.0.1:5000

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use bwb_scanner::data::load_chain_csv;
use bwb_scanner::report::results_table;
use bwb_scanner::scan::{scan, LegPricing, ScanConfig};
use bwb_scanner::server::run_server;

#[derive(Parser)]
#[command(name = "bwb-scanner")]
#[command(about = "Broken-wing call butterfly scanner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a chain CSV for broken-wing call butterflies
    Scan {
        /// Path to the options-chain CSV
        #[arg(short, long)]
        csv: PathBuf,

        /// Underlying symbol
        #[arg(short, long)]
        symbol: String,

        /// Expiry date (YYYY-MM-DD)
        #[arg(short, long)]
        expiry: NaiveDate,

        /// Minimum days to expiry
        #[arg(long, default_value_t = 1)]
        min_dte: i32,

        /// Maximum days to expiry
        #[arg(long, default_value_t = 10)]
        max_dte: i32,

        /// Minimum net credit per share
        #[arg(long, default_value = "0.50")]
        min_credit: Decimal,

        /// Minimum short-strike delta (absolute value)
        #[arg(long, default_value_t = 0.20)]
        short_delta_min: f64,

        /// Maximum short-strike delta (absolute value)
        #[arg(long, default_value_t = 0.35)]
        short_delta_max: f64,

        /// Price legs at natural prices (bid for shorts, ask for longs)
        /// instead of mid
        #[arg(long)]
        natural: bool,

        /// Show at most this many rows
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Serve the scanner over HTTP
    Serve {
        /// Directory chain CSVs are resolved against
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// CSV used when a request does not name one
        #[arg(long, default_value = "sample_chain.csv")]
        csv: String,

        /// Listen address
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            csv,
            symbol,
            expiry,
            min_dte,
            max_dte,
            min_credit,
            short_delta_min,
            short_delta_max,
            natural,
            limit,
        } => {
            let config = ScanConfig {
                min_dte,
                max_dte,
                min_credit,
                short_delta_min,
                short_delta_max,
                pricing: if natural {
                    LegPricing::Natural
                } else {
                    LegPricing::Mid
                },
            };

            let quotes = load_chain_csv(&csv)
                .with_context(|| format!("failed to load chain from {}", csv.display()))?;
            let results = scan(&quotes, &symbol, expiry, &config)?;

            if results.is_empty() {
                println!("No candidates found for {} {}", symbol, expiry);
            } else {
                println!(
                    "{} candidate(s) for {} {}, showing up to {}:",
                    results.len(),
                    symbol,
                    expiry,
                    limit
                );
                let shown = &results[..results.len().min(limit)];
                println!("{}", results_table(shown));
            }
        }

        Commands::Serve {
            data_dir,
            csv,
            addr,
        } => {
            run_server(addr, data_dir, csv).await?;
        }
    }

    Ok(())
}
