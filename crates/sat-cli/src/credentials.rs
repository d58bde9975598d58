//! API key masking.
//!
//! The config stores the Redmine key XOR-ed, byte for byte, with the SHA-256
//! digest of a passphrase, so the file alone does not leak a usable key.

use anyhow::{Context, Result, ensure};
use sha2::{Digest, Sha256};

/// Recovers the API key from its masked hex form.
///
/// Masking and unmasking are the same operation, so this also masks a plain
/// key. Keys longer than the 32-byte digest are rejected.
pub fn unmask_api_key(masked: &str, passphrase: &str) -> Result<String> {
    let bytes = hex::decode(masked.trim()).context("API key in config is not valid hex")?;
    let digest = Sha256::digest(passphrase.as_bytes());
    ensure!(
        bytes.len() <= digest.len(),
        "API key in config is longer than {} bytes",
        digest.len()
    );

    let key: Vec<u8> = bytes.iter().zip(digest.iter()).map(|(a, b)| a ^ b).collect();
    Ok(hex::encode(key))
}
