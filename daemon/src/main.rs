//! Bank daemon: command-line entry point for operating a bank store.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use bank_node::{genesis_to_json, init_logging, load_genesis, BankConfig, BankNode};
use bank_query::{AllBalancesRequest, PageRequest, TotalSupplyRequest};
use bank_types::AccountId;

#[derive(Parser)]
#[command(name = "bank-daemon", about = "Multi-asset bank ledger daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BANK_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "BANK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BANK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Load a JSON genesis document into an empty store.
    InitGenesis {
        /// Path to the genesis JSON file.
        file: PathBuf,
    },
    /// Print the full bank state as a genesis document.
    ExportGenesis,
    /// Print the total supply of every denom.
    Supply,
    /// Print every balance of an account.
    Balances {
        /// Hex-encoded account address.
        address: String,
    },
    /// Check that supply equals the sum of balances for every denom.
    Audit,
}

fn load_config(cli: &Cli) -> anyhow::Result<BankConfig> {
    let mut config = match &cli.config {
        Some(path) => BankConfig::from_toml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BankConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level)?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        backend = ?config.backend,
        "starting bank daemon"
    );

    match &cli.command {
        Command::InitGenesis { file } => {
            let genesis = load_genesis(file)?;
            // the genesis file is applied explicitly here, not on open
            let node = BankNode::open(BankConfig {
                genesis_file: None,
                ..config
            })?;
            node.ledger()
                .init_genesis(&genesis)
                .with_context(|| format!("applying genesis from {}", file.display()))?;
            println!(
                "imported {} accounts, {} metadata records",
                genesis.balances.len(),
                genesis.denom_metadata.len()
            );
        }
        Command::ExportGenesis => {
            let node = BankNode::open(config)?;
            let genesis = node.ledger().export_genesis()?;
            println!("{}", genesis_to_json(&genesis)?);
        }
        Command::Supply => {
            let node = BankNode::open(config)?;
            let mut key = None;
            loop {
                let page = node.queries().total_supply(&TotalSupplyRequest {
                    pagination: PageRequest::default().resume(key),
                })?;
                for coin in page.supply {
                    println!("{}\t{}", coin.denom, coin.amount);
                }
                key = page.pagination.next_key;
                if key.is_none() {
                    break;
                }
            }
        }
        Command::Balances { address } => {
            let account: AccountId = address
                .parse()
                .with_context(|| format!("invalid address {address}"))?;
            let node = BankNode::open(config)?;
            let mut key = None;
            loop {
                let page = node.queries().all_balances(&AllBalancesRequest {
                    address: account.to_hex(),
                    pagination: PageRequest::default().resume(key),
                })?;
                for coin in page.balances {
                    println!("{}\t{}", coin.denom, coin.amount);
                }
                key = page.pagination.next_key;
                if key.is_none() {
                    break;
                }
            }
        }
        Command::Audit => {
            let node = BankNode::open(config)?;
            let mismatches = node.ledger().check_total_supply()?;
            if !mismatches.is_empty() {
                for m in &mismatches {
                    eprintln!(
                        "{}: supply {} but balances sum to {}",
                        m.denom, m.supply, m.balances
                    );
                }
                bail!("{} denoms out of balance", mismatches.len());
            }
            println!("supply matches balances");
        }
    }

    Ok(())
}
