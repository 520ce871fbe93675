//! commission: command-line front end for the commission engine
//!
//! Loads the configured rule snapshot once, then answers one command and
//! prints JSON on stdout. Logs go to stderr (and `LOG_DIR` when set).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::models::{CommissionCalculationResult, CommissionRecord, SaleInput};

use commission_engine::commission::summarize_by_employee;
use commission_engine::{
    CommissionResolver, CommissionSummary, Config, JsonFileSource, RuleSnapshot,
    init_logger_with_file,
};

#[derive(Debug, Parser)]
#[command(name = "commission")]
#[command(about = "Resolve broker commissions from a rule snapshot", long_about = None)]
struct Cli {
    /// Rule snapshot file (overrides COMMISSION_RULES_PATH)
    #[arg(long, env = "COMMISSION_RULES_PATH")]
    rules: Option<PathBuf>,

    /// Only load rules owned by this account (overrides COMMISSION_OWNER_ID)
    #[arg(long, env = "COMMISSION_OWNER_ID")]
    owner: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the commission for one sale
    Resolve {
        #[arg(long)]
        product: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Payment period in months
        #[arg(long)]
        period: Option<u32>,
    },
    /// Resolve every sale in a JSON array file
    Batch { sales: PathBuf },
    /// Totals by status for a JSON array of commission records
    Summary {
        records: PathBuf,
        #[arg(long)]
        by_employee: bool,
    },
    /// Show what the loaded snapshot contains
    Rules,
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    sale: &'a SaleInput,
    commission: Option<CommissionCalculationResult>,
}

fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(rules) = &cli.rules {
        config.rules_path = rules.display().to_string();
    }
    if cli.owner.is_some() {
        config.owner_id = cli.owner.clone();
    }

    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    tracing::debug!(environment = %config.environment, rules_path = %config.rules_path, "Starting commission engine");

    let source = JsonFileSource::new(&config.rules_path);
    let snapshot = RuleSnapshot::load(&source, config.owner_id.as_deref())?;
    let resolver = CommissionResolver::new(snapshot);

    match cli.command {
        Commands::Resolve {
            product,
            amount,
            period,
        } => {
            let sale = SaleInput {
                product,
                amount,
                payment_period: period,
            };
            print_json(&resolver.resolve(&sale))
        }
        Commands::Batch { sales } => {
            let sales: Vec<SaleInput> = read_json(&sales)?;
            let results = resolver.resolve_batch(&sales);
            let entries: Vec<BatchEntry<'_>> = sales
                .iter()
                .zip(results)
                .map(|(sale, commission)| BatchEntry { sale, commission })
                .collect();
            tracing::info!(
                sales = entries.len(),
                resolved = entries.iter().filter(|e| e.commission.is_some()).count(),
                "Batch resolved"
            );
            print_json(&entries)
        }
        Commands::Summary {
            records,
            by_employee,
        } => {
            let records: Vec<CommissionRecord> = read_json(&records)?;
            if by_employee {
                print_json(&summarize_by_employee(&records))
            } else {
                print_json(&CommissionSummary::from_records(&records))
            }
        }
        Commands::Rules => print_json(resolver.snapshot().stats()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
