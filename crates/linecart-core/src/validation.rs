//! # Validation Module
//!
//! Field validation rules for cart items.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: The type system                                              │
//! │  ├── name is a String, quantity an integer, options a JSON map        │
//! │  └── whole classes of bad input cannot be expressed                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── id character set, cost range, quantity floor, hash format        │
//! │  └── runs in full BEFORE any cart or item state changes               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use linecart_core::validation::{validate_id, validate_quantity};
//! use linecart_core::ItemId;
//!
//! assert!(validate_id(&ItemId::from("abc123")).is_ok());
//! assert!(validate_quantity(5).is_ok());
//! ```

use crate::error::ValidationError;
use crate::identity;
use crate::item::ItemId;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates an item id.
///
/// ## Rules
/// - Numeric ids are always valid
/// - Textual ids must be non-empty ASCII alphanumeric (no spaces, no
///   punctuation, no hyphens)
///
/// ## Example
/// ```rust
/// use linecart_core::validation::validate_id;
/// use linecart_core::ItemId;
///
/// assert!(validate_id(&ItemId::from("abc123")).is_ok());
/// assert!(validate_id(&ItemId::from(433u64)).is_ok());
/// assert!(validate_id(&ItemId::from("invalid id")).is_err());
/// ```
pub fn validate_id(id: &ItemId) -> ValidationResult<()> {
    match id {
        ItemId::Number(_) => Ok(()),
        ItemId::Text(text) => {
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric()) {
                Ok(())
            } else {
                Err(ValidationError::InvalidId { id: text.clone() })
            }
        }
    }
}

/// Validates a cart-assigned identity hash.
///
/// ## Rules
/// - Must be a 64-character lowercase hex digest, the exact format
///   [`identity::item_hash`] produces
pub fn validate_item_hash(hash: &str) -> ValidationResult<()> {
    if identity::is_item_hash(hash) {
        Ok(())
    } else {
        Err(ValidationError::InvalidItemHash {
            hash: hash.to_string(),
        })
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit cost and converts it to [`Money`].
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative; zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use linecart_core::validation::validate_cost;
/// use linecart_core::Money;
///
/// assert_eq!(validate_cost(2.51).unwrap(), Money::from_cents(251));
/// assert!(validate_cost(0.0).is_ok());
/// assert!(validate_cost(-0.01).is_err());
/// assert!(validate_cost(f64::NAN).is_err());
/// ```
pub fn validate_cost(cost: f64) -> ValidationResult<Money> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(ValidationError::InvalidCost { cost });
    }

    Money::try_from_float(cost).ok_or(ValidationError::InvalidCost { cost })
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::InvalidQuantity { quantity });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
