//! # Line Items
//!
//! The item side of the cart: the external identity type, the capability
//! trait every cart entry satisfies, the built-in [`Item`], and the factory
//! seam that lets an application substitute its own item implementation.
//!
//! ## Capability Substitution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Item Capability Seam                                 │
//! │                                                                         │
//! │   Cart ──────► dyn ItemFactory ──────► dyn CartItem                    │
//! │                      │                      ▲                           │
//! │                      │ default              │                           │
//! │                      ▼                      │                           │
//! │              DefaultItemFactory ────────► Item                          │
//! │                                                                         │
//! │   The cart depends only on the trait pair, never on the concrete       │
//! │   Item type. Inject a factory at construction to swap the item         │
//! │   implementation for every subsequent add.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CartResult;
use crate::money::Money;
use crate::validation::{self, ValidationResult};

/// Arbitrary per-item key/value pairs. Never validated, replaced wholesale.
pub type Options = Map<String, Value>;

// =============================================================================
// Item Id
// =============================================================================

/// The externally supplied identity of an item.
///
/// Ids are either plain integers or alphanumeric text. Both forms share one
/// canonical string rendering, which is what the identity hash is derived
/// from, so `433u64` and `"433"` name the same item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    /// A numeric id. Always valid.
    Number(u64),
    /// A textual id. Must be non-empty ASCII alphanumeric.
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        ItemId::Text(value)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        ItemId::Number(value)
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        ItemId::Number(value as u64)
    }
}

// =============================================================================
// CartItem Capability Trait
// =============================================================================

/// The capability set every cart entry provides.
///
/// [`Cart`](crate::Cart) depends only on this trait. Setters that enforce a
/// rule are fallible; implementations validate BEFORE storing so an entry is
/// never observable with a stale or invalid field. In particular, the
/// derived total must be recomputed whenever cost or quantity changes.
pub trait CartItem {
    /// The cart-assigned identity hash, or `None` while the item lives
    /// outside a cart.
    fn item_hash(&self) -> Option<&str>;

    /// Assigns the identity hash. Fails with
    /// [`ValidationError::InvalidItemHash`](crate::error::ValidationError::InvalidItemHash) unless the value has the
    /// 64-character lowercase hex digest format.
    fn set_item_hash(&mut self, hash: String) -> ValidationResult<()>;

    /// The externally supplied id.
    fn id(&self) -> &ItemId;

    /// Replaces the id. Fails with [`ValidationError::InvalidId`](crate::error::ValidationError::InvalidId) unless the
    /// id is numeric or non-empty alphanumeric text.
    fn set_id(&mut self, id: ItemId) -> ValidationResult<()>;

    /// The display name.
    fn name(&self) -> &str;

    /// Replaces the name. The built-in item accepts any string; custom
    /// implementations may reject with [`ValidationError::InvalidName`](crate::error::ValidationError::InvalidName).
    fn set_name(&mut self, name: String) -> ValidationResult<()>;

    /// The unit cost.
    fn cost(&self) -> Money;

    /// Replaces the unit cost and recomputes the total. Fails with
    /// [`ValidationError::InvalidCost`](crate::error::ValidationError::InvalidCost) on negative or non-finite input.
    fn set_cost(&mut self, cost: f64) -> ValidationResult<()>;

    /// The quantity.
    fn quantity(&self) -> i64;

    /// Replaces the quantity and recomputes the total. Fails with
    /// [`ValidationError::InvalidQuantity`](crate::error::ValidationError::InvalidQuantity) below 1.
    fn set_quantity(&mut self, quantity: i64) -> ValidationResult<()>;

    /// The options mapping.
    fn options(&self) -> &Options;

    /// Replaces the options mapping wholesale. No validation.
    fn set_options(&mut self, options: Options);

    /// The derived line total (cost × quantity). Side-effect-free; always
    /// consistent with the current cost and quantity.
    fn total(&self) -> Money;
}

/// A cart entry behind the capability trait.
pub type BoxedItem = Box<dyn CartItem + Send + Sync>;

// =============================================================================
// Default Item
// =============================================================================

/// The built-in line item.
///
/// ## Example
/// ```rust
/// use linecart_core::{CartItem, Item, Money, Options};
///
/// let item = Item::new("abc123", "item 1", 2.51, 3, Options::new())?;
/// assert_eq!(item.total(), Money::from_cents(753));
/// # Ok::<(), linecart_core::ValidationError>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    id: ItemId,
    item_hash: Option<String>,
    name: String,
    cost: Money,
    quantity: i64,
    options: Options,
    total: Money,
    added_at: DateTime<Utc>,
}

impl Item {
    /// Creates a validated item.
    ///
    /// Validates the id, cost, and quantity, then computes the total. The
    /// identity hash stays unset until a cart inserts the item.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        cost: f64,
        quantity: i64,
        options: Options,
    ) -> ValidationResult<Self> {
        let id = id.into();
        validation::validate_id(&id)?;
        let cost = validation::validate_cost(cost)?;
        validation::validate_quantity(quantity)?;

        Ok(Item {
            id,
            item_hash: None,
            name: name.into(),
            cost,
            quantity,
            options,
            total: cost * quantity,
            added_at: Utc::now(),
        })
    }

    /// When the item was created.
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    fn recalculate_total(&mut self) {
        self.total = self.cost * self.quantity;
    }
}

impl CartItem for Item {
    fn item_hash(&self) -> Option<&str> {
        self.item_hash.as_deref()
    }

    fn set_item_hash(&mut self, hash: String) -> ValidationResult<()> {
        validation::validate_item_hash(&hash)?;
        self.item_hash = Some(hash);
        Ok(())
    }

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn set_id(&mut self, id: ItemId) -> ValidationResult<()> {
        validation::validate_id(&id)?;
        self.id = id;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) -> ValidationResult<()> {
        self.name = name;
        Ok(())
    }

    fn cost(&self) -> Money {
        self.cost
    }

    fn set_cost(&mut self, cost: f64) -> ValidationResult<()> {
        self.cost = validation::validate_cost(cost)?;
        self.recalculate_total();
        Ok(())
    }

    fn quantity(&self) -> i64 {
        self.quantity
    }

    fn set_quantity(&mut self, quantity: i64) -> ValidationResult<()> {
        validation::validate_quantity(quantity)?;
        self.quantity = quantity;
        self.recalculate_total();
        Ok(())
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    fn total(&self) -> Money {
        self.total
    }
}

// =============================================================================
// Item Factory
// =============================================================================

/// Constructs cart entries on behalf of a [`Cart`](crate::Cart).
///
/// The cart calls the configured factory for every add, so injecting one at
/// construction substitutes the item implementation wholesale. A factory
/// that cannot produce an item reports
/// [`CartError::Factory`](crate::error::CartError::Factory); validation
/// failures pass through as validation errors.
pub trait ItemFactory {
    fn create(
        &self,
        id: ItemId,
        name: String,
        cost: f64,
        quantity: i64,
        options: Options,
    ) -> CartResult<BoxedItem>;
}

/// The factory behind [`Cart::new`](crate::Cart::new); builds [`Item`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultItemFactory;

impl ItemFactory for DefaultItemFactory {
    fn create(
        &self,
        id: ItemId,
        name: String,
        cost: f64,
        quantity: i64,
        options: Options,
    ) -> CartResult<BoxedItem> {
        let item = Item::new(id, name, cost, quantity, options)?;
        Ok(Box::new(item))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
