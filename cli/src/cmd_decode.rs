//! `txlens decode-log` — decode one log offline, without an explorer.

use anyhow::Result;
use txlens_core::transfer::PROVISIONAL_DECIMALS;
use txlens_core::{ChainMap, DecodedEvent, LogDecoder, RawLog, TokenTransfer};

pub fn run(
    topics: &[String],
    data: &str,
    address: &str,
    chains: &ChainMap,
    as_json: bool,
) -> Result<()> {
    let raw = RawLog {
        address: address.to_string(),
        topics: topics.to_vec(),
        data: data.to_string(),
        log_index: Some("0".into()),
        block_number: None,
    };
    let decoded = LogDecoder::default().decode(&raw)?;
    let transfer = TokenTransfer::from_log(&decoded, chains);

    if as_json {
        let json = serde_json::json!({
            "log": decoded,
            "tokenTransfer": transfer,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("Event:      {}", decoded.event_name);
    println!("Signature:  {}", decoded.event_signature);
    match &decoded.decoded_event {
        Some(DecodedEvent::Transfer { from, to, value }) => {
            println!("  from:  {from} (chain {})", chains.resolve(Some(from)));
            println!("  to:    {to} (chain {})", chains.resolve(Some(to)));
            println!("  value: {value}");
        }
        Some(DecodedEvent::Approval { owner, spender, value }) => {
            println!("  owner:   {owner}");
            println!("  spender: {spender}");
            println!("  value:   {value}");
        }
        None if decoded.is_recognized() => println!("  (payload could not be decoded)"),
        None => {}
    }
    if let Some(t) = transfer {
        println!(
            "Transfer:   {} (assuming {PROVISIONAL_DECIMALS} decimals)",
            t.amount_formatted
        );
    }
    Ok(())
}
