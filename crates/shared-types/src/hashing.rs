//! Keccak-256, the hash behind function selectors and transaction ids.

use sha3::{Digest, Keccak256};

/// Compute keccak256 over `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    hasher.finalize().into()
}
