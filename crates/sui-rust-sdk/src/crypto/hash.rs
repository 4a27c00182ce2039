//! Hash functions for the Sui SDK.
//!
//! Sui uses Blake2b with a 256-bit output for transaction digests, signing
//! digests and address derivation.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Computes the Blake2b-256 hash of the input.
///
/// # Example
///
/// ```rust
/// use sui_rust_sdk::crypto::blake2b256;
///
/// let hash = blake2b256(b"hello world");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn blake2b256(data: &[u8]) -> [u8; 32] {
    blake2b256_of([data])
}

/// Computes the Blake2b-256 hash of multiple byte slices, fed in order.
pub fn blake2b256_of<I, T>(items: I) -> [u8; 32]
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut hasher = Blake2b256::new();
    for item in items {
        hasher.update(item.as_ref());
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
