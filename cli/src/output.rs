//! Console summary and JSON report writing.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use txlens_core::{EnhancedTransaction, TokenTransfer};

/// Pretty-print the report to `path`, creating parent directories as needed.
pub fn write_report(tx: &EnhancedTransaction, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("create output file '{}'", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, tx).context("serialize report")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Human-readable summary: hash, block, type, status, value, gas, fee and transfers.
pub fn print_summary(out: &mut impl Write, tx: &EnhancedTransaction) -> std::io::Result<()> {
    writeln!(out, "Transaction:  {}", tx.hash)?;
    match &tx.readable_time {
        Some(time) => writeln!(out, "Block:        {} ({})", tx.block_number, time)?,
        None => writeln!(out, "Block:        {}", tx.block_number)?,
    }
    writeln!(out, "Type:         {}", tx.tx_type)?;
    writeln!(out, "Status:       {}", tx.status)?;
    if let Some(reason) = &tx.revert_reason {
        writeln!(out, "Revert:       {reason}")?;
    }
    writeln!(
        out,
        "From:         {} (chain {})",
        tx.from.as_deref().unwrap_or("-"),
        tx.from_chain_id
    )?;
    writeln!(
        out,
        "To:           {} (chain {})",
        tx.to.as_deref().unwrap_or("-"),
        tx.to_chain_id
    )?;
    writeln!(out, "Value:        {} ETH", tx.value_eth)?;
    writeln!(
        out,
        "Gas:          {} used / {} limit @ {} gwei",
        tx.gas_used, tx.gas_limit, tx.gas_price_gwei
    )?;
    writeln!(out, "Fee:          {} ETH", tx.transaction_fee_eth)?;
    writeln!(
        out,
        "Logs:         {} ({} internal txs)",
        tx.summary.log_count, tx.summary.internal_tx_count
    )?;
    if tx.summary.is_multi_chain {
        let chains: Vec<&str> = tx.summary.chain_ids.iter().map(String::as_str).collect();
        writeln!(out, "Multi-chain:  yes ({})", chains.join(", "))?;
    } else {
        writeln!(out, "Multi-chain:  no")?;
    }

    if tx.token_transfers.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Token transfers ({}):", tx.token_transfers.len())?;
    for (i, transfer) in tx.token_transfers.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, transfer_line(transfer))?;
    }
    Ok(())
}

fn transfer_line(t: &TokenTransfer) -> String {
    let token = t
        .token_symbol
        .as_deref()
        .or(t.token_name.as_deref())
        .unwrap_or(&t.token_contract);
    format!(
        "{} {} from {} (chain {}) to {} (chain {})",
        t.amount_formatted, token, t.from, t.from_chain_id, t.to, t.to_chain_id
    )
}
