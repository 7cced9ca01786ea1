//! txlens CLI — turn one explorer transaction into a multi-chain JSON report.
//!
//! # Commands
//! ```text
//! txlens enrich      <TX_HASH> [--api <url>] [--output <path>] [--no-abi] [--quiet]
//! txlens decode-log  --topics <...> --data <hex> [--json]
//! txlens resolve     <ADDRESS>...
//! txlens info
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use txlens_core::ChainMap;

mod cmd_decode;
mod cmd_enrich;
mod config;
mod output;

use config::AppConfig;

#[derive(Parser)]
#[command(
    name = "txlens",
    about = "Enrich a block-explorer transaction into a multi-chain report",
    long_about = "
txlens: fetch a transaction from a Blockscout / Etherscan-compatible API,
decode its ERC-20 logs, attach token metadata, internal calls and the
contract ABI, resolve addresses to chain ids and classify the transaction.

ENVIRONMENT VARIABLES:
  TXLENS_API_URL   Explorer API base URL
  TXLENS_API_KEY   Explorer API key
  RUST_LOG         Log filter (overrides the config file)
",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ./txlens.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, decode and enrich a transaction, then write the JSON report
    Enrich {
        /// Transaction hash (0x + 64 hex digits)
        hash: String,
        /// Explorer API base URL (overrides config and TXLENS_API_URL)
        #[arg(long)]
        api: Option<String>,
        /// Output file (default: transaction_multichain.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip the contract ABI fetch
        #[arg(long)]
        no_abi: bool,
        /// Skip the internal transactions fetch
        #[arg(long)]
        no_internal: bool,
        /// Do not print the summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Decode a single event log from raw topics + data
    #[command(name = "decode-log")]
    DecodeLog {
        /// topics[0] = event signature hash, topics[1..] = indexed params
        #[arg(long, num_args = 1..)]
        topics: Vec<String>,
        /// Non-indexed params (hex, 0x-prefixed)
        #[arg(long, default_value = "0x")]
        data: String,
        /// Emitting contract address
        #[arg(long, default_value = "0x0000000000000000000000000000000000000000")]
        address: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve addresses to chain ids using the configured chain map
    Resolve {
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Show build info, explorer endpoint and the chain map
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    let log = if cli.verbose {
        config.log.clone().verbose()
    } else {
        config.log.clone()
    };
    txlens_observability::init_tracing(&log);

    match cli.command {
        Commands::Enrich { hash, api, output, no_abi, no_internal, quiet } => {
            let args = cmd_enrich::EnrichArgs { hash, api, output, no_abi, no_internal, quiet };
            cmd_enrich::run(args, config).await
        }

        Commands::DecodeLog { topics, data, address, json } => {
            cmd_decode::run(&topics, &data, &address, &config.chains(), json)
        }

        Commands::Resolve { addresses } => cmd_resolve(&addresses, &config.chains()),

        Commands::Info => cmd_info(&config),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_resolve(addresses: &[String], chains: &ChainMap) -> Result<()> {
    for address in addresses {
        println!("{:44} {}", address, chains.resolve(Some(address)));
    }
    Ok(())
}

fn cmd_info(config: &AppConfig) -> Result<()> {
    println!("txlens v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Explorer:     {}", config.explorer.base_url);
    println!(
        "API key:      {}",
        if config.explorer.api_key.is_some() { "set" } else { "not set" }
    );
    println!("Timeout:      {}s", config.explorer.timeout_secs);
    println!("Output:       {}", config.output.display());
    println!();
    println!("Decoded events:");
    for kind in txlens_core::EventKind::ALL {
        println!("  {}", kind.signature());
    }
    println!();

    let chains = config.chains();
    let mut entries: Vec<_> = chains.iter().collect();
    entries.sort();
    println!("Chain map ({} addresses):", entries.len());
    for (address, chain_id) in entries {
        println!("  {address}  {chain_id}");
    }
    Ok(())
}
