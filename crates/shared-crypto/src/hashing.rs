//! # BLAKE3 Hashing
//!
//! Domain-separated hashing. Event identities are computed through
//! [`domain_hash`] so the digest is bound to its context string.

use blake3::Hasher;

/// BLAKE3 hash output (256-bit).
pub type Hash = [u8; 32];

/// Hash the concatenation of `parts` under `context` (derive-key mode).
pub fn domain_hash(context: &str, parts: &[&[u8]]) -> Hash {
    let mut hasher = Hasher::new_derive_key(context);
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}
