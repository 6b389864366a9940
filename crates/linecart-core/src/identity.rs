//! # Identity Hashing
//!
//! Derives the storage key for an item from its id.
//!
//! The key is a SHA-256 hex digest of the id's canonical string form, so it
//! is deterministic across processes and collision-resistant for any
//! realistic id space. Numeric and textual ids with the same canonical form
//! (`433` and `"433"`) hash to the same key on purpose. This is a stable
//! identifier, not a security boundary.

use sha2::{Digest, Sha256};

use crate::item::ItemId;
use crate::ITEM_HASH_LEN;

/// Computes the identity hash for an item id.
///
/// ## Example
/// ```rust
/// use linecart_core::identity::item_hash;
/// use linecart_core::ItemId;
///
/// let hash = item_hash(&ItemId::from("abc123"));
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, item_hash(&ItemId::from("abc123")));
/// ```
pub fn item_hash(id: &ItemId) -> String {
    let digest = Sha256::digest(id.to_string().as_bytes());
    format!("{digest:x}")
}

/// Checks whether a string has the identity hash format
/// (64 lowercase hex characters).
pub fn is_item_hash(candidate: &str) -> bool {
    candidate.len() == ITEM_HASH_LEN
        && candidate
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
