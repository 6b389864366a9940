//! # Error Types
//!
//! Domain-specific error types for linecart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  linecart-core errors (this file)                                      │
//! │  ├── CartError        - Cart operation failures                        │
//! │  └── ValidationError  - Field validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → caller                            │
//! │                                                                         │
//! │  Not every absence is an error: update requires an existing item,      │
//! │  but remove and lookup treat "not found" as a normal empty result.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending value in the error message
//! 3. Errors are enum variants, never String
//! 4. Errors are raised before any mutation, so a failed call leaves the
//!    cart exactly as it was

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
///
/// These occur when an item attribute does not meet its rules. Every cart
/// operation validates fully before mutating, so one of these surfacing
/// means nothing changed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Item id is not plain alphanumeric text.
    #[error("invalid item id, must be alphanumeric: {id:?}")]
    InvalidId { id: String },

    /// Item name was rejected.
    ///
    /// The built-in [`Item`](crate::Item) accepts any string, so this is
    /// only produced by custom [`CartItem`](crate::CartItem) implementations
    /// that constrain names.
    #[error("invalid item name: {name:?}")]
    InvalidName { name: String },

    /// Cost is negative or not a finite number.
    #[error("invalid cost, must be a non-negative number: {cost}")]
    InvalidCost { cost: f64 },

    /// Quantity is below 1.
    #[error("invalid quantity, must be at least 1: {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Assigned identity hash is not a 64-character lowercase hex digest.
    #[error("invalid item hash, must be a lowercase hex digest: {hash:?}")]
    InvalidItemHash { hash: String },
}

// =============================================================================
// Cart Error
// =============================================================================

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// A field failed validation (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An update targeted a hash with no item behind it.
    ///
    /// ## When This Occurs
    /// - `update_item` for an id that was never added (or was removed)
    /// - `update_item_by_hash` with a stale or malformed hash
    ///
    /// Removal and lookup never raise this; deleting or reading an absent
    /// item is a no-op / `None`.
    #[error("no item in the cart for hash {hash:?}")]
    ItemNotFound { hash: String },

    /// The configured item factory could not produce an item.
    ///
    /// The default factory only fails validation; this variant exists for
    /// injected [`ItemFactory`](crate::ItemFactory) implementations that can
    /// refuse construction outright.
    #[error("item factory could not produce an item: {reason}")]
    Factory { reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
