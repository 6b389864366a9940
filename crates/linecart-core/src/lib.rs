//! # linecart-core: In-Memory Shopping-Cart Line Items
//!
//! This crate is the **heart** of linecart. It tracks the line items of a
//! single shopping session as pure, synchronous logic with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      linecart Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Owning Application                             │   │
//! │  │   storage, presentation, currency rules, checkout flow         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ one Cart per session                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ linecart-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │   item    │  │   money   │  │ validation│  │   │
//! │  │   │   Cart    │  │   Item    │  │   Money   │  │   rules   │  │   │
//! │  │   │ ItemUpdate│  │  CartItem │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The [`Cart`] collection and its operations
//! - [`item`] - The [`CartItem`] capability trait and the default [`Item`]
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`identity`] - Deterministic identity hashing for storage keys
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic and synchronous
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: Monetary values are stored in minor units (i64),
//!    so every derived total is exact at 2-decimal precision
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Fail Fast**: Validation completes before any mutation; no operation
//!    leaves the cart partially updated
//!
//! ## Example Usage
//!
//! ```rust
//! use linecart_core::{Cart, ItemUpdate, Money};
//!
//! let mut cart = Cart::new();
//!
//! cart.add_item("abc123", "item 1", 5.0, 1)?;
//! cart.add_item(433u64, "item 2", 2.51, 1)?;
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.total_cost(), Money::from_cents(751));
//!
//! // Partial update: only the provided fields change
//! cart.update_item("abc123", ItemUpdate::new().quantity(3))?;
//! assert_eq!(cart.total_quantity(), 4);
//! # Ok::<(), linecart_core::CartError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod identity;
pub mod item;
pub mod money;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use linecart_core::Cart` instead of
// `use linecart_core::cart::Cart`

pub use cart::{Cart, CartTotals, ItemUpdate};
pub use error::{CartError, CartResult, ValidationError};
pub use item::{BoxedItem, CartItem, Item, ItemFactory, ItemId, Options};
pub use money::Money;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of an item identity hash in characters.
///
/// Identity hashes are lowercase hex SHA-256 digests of the item id, so the
/// storage key format is fixed at 64 characters. [`item::CartItem::set_item_hash`]
/// rejects anything else.
pub const ITEM_HASH_LEN: usize = 64;
