//! `txlens enrich` — fetch a transaction from the explorer and write the report.
//!
//! Nothing is written when the transaction cannot be fetched.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::PathBuf;
use txlens_core::{Pipeline, PipelineOptions};
use txlens_explorer::BlockscoutClient;

use crate::config::AppConfig;
use crate::output;

pub struct EnrichArgs {
    pub hash: String,
    pub api: Option<String>,
    pub output: Option<PathBuf>,
    pub no_abi: bool,
    pub no_internal: bool,
    pub quiet: bool,
}

pub async fn run(args: EnrichArgs, mut config: AppConfig) -> Result<()> {
    let hash = validate_hash(&args.hash)?;
    if let Some(api) = args.api {
        config.explorer.base_url = api;
    }
    let output_path = args.output.unwrap_or_else(|| config.output.clone());

    let client = BlockscoutClient::new(config.explorer.clone()).context("build HTTP client")?;
    let pipeline = Pipeline::new(client, config.chains()).with_options(PipelineOptions {
        fetch_abi: !args.no_abi,
        fetch_internal: !args.no_internal,
        ..PipelineOptions::default()
    });

    tracing::info!(hash = %hash, explorer = %config.explorer.base_url, "enriching transaction");
    let tx = pipeline.run(&hash).await?;

    output::write_report(&tx, &output_path)?;
    if !args.quiet {
        let mut stdout = std::io::stdout().lock();
        output::print_summary(&mut stdout, &tx)?;
        writeln!(stdout)?;
        writeln!(stdout, "Report written to {}", output_path.display())?;
    }
    Ok(())
}

/// Accept `0x` + 64 hex digits, returned trimmed and lowercased.
pub fn validate_hash(hash: &str) -> Result<String> {
    let hash = hash.trim();
    let digits = hash
        .strip_prefix("0x")
        .or_else(|| hash.strip_prefix("0X"))
        .unwrap_or(hash);
    if digits.len() != 64 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("invalid transaction hash '{hash}': expected 0x followed by 64 hex digits");
    }
    Ok(format!("0x{}", digits.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0xd97e6cdbbc7bef4fc3193ad849b103dd23313b3bcf8b55d241c06748e262d50a";

    #[test]
    fn accepts_well_formed_hashes() {
        assert_eq!(validate_hash(HASH).unwrap(), HASH);
        assert_eq!(validate_hash(&format!(" {} ", HASH.to_uppercase())).unwrap(), HASH);
        assert_eq!(validate_hash(&HASH[2..]).unwrap(), HASH);
    }

    #[test]
    fn rejects_malformed_hashes() {
        assert!(validate_hash("0x1234").is_err());
        assert!(validate_hash(&format!("0x{}", "g".repeat(64))).is_err());
        assert!(validate_hash("").is_err());
    }

    #[tokio::test]
    async fn unreachable_explorer_writes_nothing() {
        let output = std::env::temp_dir().join(format!("txlens-none-{}.json", std::process::id()));
        let mut config = AppConfig::default();
        config.explorer.timeout_secs = 2;
        let args = EnrichArgs {
            hash: HASH.into(),
            api: Some("http://127.0.0.1:9/api".into()),
            output: Some(output.clone()),
            no_abi: false,
            no_internal: false,
            quiet: true,
        };
        let err = run(args, config).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert!(!output.exists());
    }
}
