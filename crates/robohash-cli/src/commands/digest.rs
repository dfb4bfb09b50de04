//! Digest command implementation
//!
//! Prints the seeded HMAC-SHA512 digest for an identifier.

use anyhow::Result;
use colored::Colorize;
use robohash_core::{seeded_digest, Digest512, PUBLIC_KEY};
use std::process::ExitCode;

use super::json_output::{CommandOutput, DigestResult};

/// Run the digest command
///
/// # Arguments
/// * `identifier` - The identifier to hash
/// * `key` - HMAC key (empty for the public key)
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(identifier: &str, key: &str, json_output: bool) -> Result<ExitCode> {
    let digest = seeded_digest(identifier, key);

    if json_output {
        CommandOutput::success(DigestResult {
            identifier: identifier.to_string(),
            public_key: key == PUBLIC_KEY,
            digest: digest.to_hex(),
            chunks: chunks(&digest),
        })
        .print()?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Identifier:".cyan().bold(), identifier);
    if key != PUBLIC_KEY {
        println!("{} {}", "Key:".dimmed(), "(secret)".dimmed());
    }
    println!("{}", digest.to_hex());
    for (i, chunk) in chunks(&digest).iter().enumerate() {
        println!("  {} {}", format!("chunk[{}]", i).dimmed(), chunk);
    }
    Ok(ExitCode::SUCCESS)
}

fn chunks(digest: &Digest512) -> Vec<u64> {
    (0..digest.chunk_count())
        .filter_map(|i| digest.chunk(i))
        .collect()
}
