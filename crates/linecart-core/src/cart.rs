//! # Cart
//!
//! The owning collection of line items for one shopping session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart Operations                                     │
//! │                                                                         │
//! │  Caller Action            Cart Operation          State Change          │
//! │  ─────────────            ──────────────          ────────────          │
//! │                                                                         │
//! │  Add product ────────────► add_item() ──────────► insert or upsert     │
//! │                                                                         │
//! │  Change fields ──────────► update_item() ───────► provided fields only │
//! │                                                                         │
//! │  Remove line ────────────► remove_item() ───────► delete (idempotent)  │
//! │                                                                         │
//! │  Empty basket ───────────► clear() ─────────────► items wiped          │
//! │                                                                         │
//! │  Read totals ────────────► total_*() ───────────► (read only, O(n))    │
//! │                                                                         │
//! │  Every write validates in full BEFORE mutating. A failed call leaves   │
//! │  the cart exactly as it was.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Items are keyed by `identity::item_hash(id)`, so the same id can never
//! occupy two slots: adding an id that is already present updates the
//! existing line instead. Iteration follows insertion order.
//!
//! ## Thread Safety
//! None inside the cart. One cart belongs to one session; an application
//! that shares a cart across threads wraps it in its own mutex.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CartError, CartResult};
use crate::identity;
use crate::item::{BoxedItem, CartItem, DefaultItemFactory, ItemFactory, ItemId, Options};
use crate::money::Money;
use crate::validation;

// =============================================================================
// Item Update
// =============================================================================

/// A partial update for one line item.
///
/// `None` fields are left untouched; `Some` fields are validated and
/// applied. Absence is explicit, so zero-like values are real updates:
/// `cost(0.0)` makes an item free and `options(Options::new())` clears its
/// options.
///
/// ## Example
/// ```rust
/// use linecart_core::ItemUpdate;
///
/// let update = ItemUpdate::new().quantity(5).cost(9.99);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    name: Option<String>,
    cost: Option<f64>,
    quantity: Option<i64>,
    options: Option<Options>,
}

impl ItemUpdate {
    /// An update that changes nothing until fields are set on it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new unit cost.
    pub fn cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Sets the new quantity.
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the replacement options mapping.
    pub fn options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an insertion-ordered mapping of identity hash to
/// line item.
///
/// ## Invariants
/// - Every key equals the identity hash of that item's id
/// - No two items share an id
/// - Aggregates are folded on demand, never cached
///
/// ## Example
/// ```rust
/// use linecart_core::{Cart, Money};
///
/// let mut cart = Cart::new();
/// cart.add_item("abc123", "item 1", 5.0, 1)?;
/// cart.add_item(433u64, "item 2", 2.51, 1)?;
///
/// assert_eq!(cart.total_cost(), Money::from_cents(751));
/// # Ok::<(), linecart_core::CartError>(())
/// ```
pub struct Cart {
    /// Identity hash → item, iteration in insertion order.
    items: IndexMap<String, BoxedItem>,

    /// Constructs entries for every add. Defaults to the built-in item.
    factory: Box<dyn ItemFactory + Send + Sync>,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart backed by the built-in [`Item`](crate::Item).
    pub fn new() -> Self {
        Self::with_factory(Box::new(DefaultItemFactory))
    }

    /// Creates an empty cart that builds entries through the given factory.
    ///
    /// Every subsequent [`add_item`](Cart::add_item) goes through the
    /// factory, so this is the substitution point for custom
    /// [`CartItem`] implementations.
    pub fn with_factory(factory: Box<dyn ItemFactory + Send + Sync>) -> Self {
        Cart {
            items: IndexMap::new(),
            factory,
            created_at: Utc::now(),
        }
    }

    /// Adds an item with no options.
    ///
    /// See [`add_item_with_options`](Cart::add_item_with_options).
    pub fn add_item(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        cost: f64,
        quantity: i64,
    ) -> CartResult<()> {
        self.add_item_with_options(id, name, cost, quantity, Options::new())
    }

    /// Adds an item, or updates the existing line when the id is already
    /// present (upsert, never an error and never a duplicate).
    ///
    /// ## Behavior
    /// 1. Validates id, cost, and quantity
    /// 2. Id already in the cart: applies all given fields to that line
    /// 3. Otherwise: builds an entry via the factory, assigns the identity
    ///    hash, inserts at the end of the iteration order
    pub fn add_item_with_options(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        cost: f64,
        quantity: i64,
        options: Options,
    ) -> CartResult<()> {
        let id = id.into();
        let name = name.into();

        validation::validate_id(&id)?;
        validation::validate_cost(cost)?;
        validation::validate_quantity(quantity)?;

        let hash = identity::item_hash(&id);
        if self.items.contains_key(&hash) {
            debug!(id = %id, hash = %hash, "id already in cart, updating in place");
            return self.update_item_by_hash(
                &hash,
                ItemUpdate::new()
                    .name(name)
                    .cost(cost)
                    .quantity(quantity)
                    .options(options),
            );
        }

        debug!(id = %id, hash = %hash, quantity = quantity, "adding item");
        let mut item = self.factory.create(id, name, cost, quantity, options)?;
        item.set_item_hash(hash.clone())?;
        self.items.insert(hash, item);

        Ok(())
    }

    /// Applies a partial update to the item with the given id.
    ///
    /// The id is always validated; each provided field is validated before
    /// anything is written. Fails with [`CartError::ItemNotFound`] when the
    /// id resolves to no line in the cart.
    ///
    /// ## Example
    /// ```rust
    /// use linecart_core::{Cart, CartItem, ItemUpdate, Money};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item("x1", "n", 10.0, 3)?;
    ///
    /// cart.update_item("x1", ItemUpdate::new().quantity(5))?;
    ///
    /// let item = cart.get_item("x1").unwrap();
    /// assert_eq!(item.quantity(), 5);
    /// assert_eq!(item.total(), Money::from_cents(5000));
    /// # Ok::<(), linecart_core::CartError>(())
    /// ```
    pub fn update_item(&mut self, id: impl Into<ItemId>, update: ItemUpdate) -> CartResult<()> {
        let id = id.into();
        validation::validate_id(&id)?;

        let hash = identity::item_hash(&id);
        self.update_item_by_hash(&hash, update)
    }

    /// Applies a partial update to the item stored under an explicit
    /// identity hash.
    ///
    /// Useful when the hash is already at hand (for example from
    /// [`items`](Cart::items) iteration). A hash that matches no line fails
    /// with [`CartError::ItemNotFound`].
    pub fn update_item_by_hash(&mut self, hash: &str, update: ItemUpdate) -> CartResult<()> {
        // Validate every provided field before touching the item, so a bad
        // update is all-or-nothing.
        if let Some(cost) = update.cost {
            validation::validate_cost(cost)?;
        }
        if let Some(quantity) = update.quantity {
            validation::validate_quantity(quantity)?;
        }

        let item = self
            .items
            .get_mut(hash)
            .ok_or_else(|| CartError::ItemNotFound {
                hash: hash.to_string(),
            })?;

        if let Some(name) = update.name {
            item.set_name(name)?;
        }
        if let Some(cost) = update.cost {
            item.set_cost(cost)?;
        }
        if let Some(quantity) = update.quantity {
            item.set_quantity(quantity)?;
        }
        if let Some(options) = update.options {
            item.set_options(options);
        }

        debug!(hash = %hash, "updated item");
        Ok(())
    }

    /// Removes the item with the given id.
    ///
    /// Fails only on a malformed id. Removing an id that is not in the cart
    /// is a no-op, not an error (delete is idempotent).
    pub fn remove_item(&mut self, id: impl Into<ItemId>) -> CartResult<()> {
        let id = id.into();
        validation::validate_id(&id)?;

        let hash = identity::item_hash(&id);
        if self.items.shift_remove(&hash).is_some() {
            debug!(id = %id, hash = %hash, "removed item");
        }

        Ok(())
    }

    /// Empties the cart and refreshes its creation timestamp.
    pub fn clear(&mut self) {
        debug!(items = self.items.len(), "clearing cart");
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Looks up an item by id. Absent or malformed ids are `None`, never an
    /// error.
    pub fn get_item(&self, id: impl Into<ItemId>) -> Option<&dyn CartItem> {
        let hash = identity::item_hash(&id.into());
        self.get_item_by_hash(&hash)
    }

    /// Looks up an item by its identity hash.
    pub fn get_item_by_hash(&self, hash: &str) -> Option<&dyn CartItem> {
        self.items.get(hash).map(|item| item.as_ref() as &dyn CartItem)
    }

    /// Iterates over `(identity hash, item)` pairs in insertion order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &dyn CartItem)> + '_ {
        self.items
            .iter()
            .map(|(hash, item)| (hash.as_str(), item.as_ref() as &dyn CartItem))
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.values().map(|item| item.quantity()).sum()
    }

    /// Number of lines in the cart.
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Sum of every line total.
    pub fn total_cost(&self) -> Money {
        self.items
            .values()
            .map(|item| item.total())
            .fold(Money::zero(), |acc, total| acc + total)
    }

    /// Checks if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// The factory is a trait object without Debug, so the derive is off the
// table; show the observable state instead.
impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("items", &self.items.len())
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart aggregate summary for callers that hand totals onward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub total_items: usize,
    pub total_quantity: i64,
    pub total_cost: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            total_items: cart.total_items(),
            total_quantity: cart.total_quantity(),
            total_cost: cart.total_cost(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::item::Item;
    use crate::validation::ValidationResult;
    use serde_json::Value;

    /// Ten lines covering both id forms and costs that exercise the float
    /// boundary conversion.
    fn sample_items() -> Vec<(ItemId, &'static str, f64, i64)> {
        vec![
            (ItemId::from("abc123"), "item 1", 5.0, 1),
            (ItemId::from(433u64), "item 2", 2.51, 1),
            (ItemId::from("123abc"), "item 3", 3.0, 1),
            (ItemId::from(435u64), "item 4", 6.1, 1),
            (ItemId::from("a1b2c3"), "item 5", 2.0, 1),
            (ItemId::from(437u64), "item 6", 4.65, 1),
            (ItemId::from("1a2b3c"), "item 7", 1.0, 1),
            (ItemId::from(439u64), "item 8", 5.2, 1),
            (ItemId::from(440u64), "item 9", 3.45, 1),
            (ItemId::from(441u64), "item 0", 2.0, 1),
        ]
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        for (id, name, cost, quantity) in sample_items() {
            cart.add_item(id, name, cost, quantity).unwrap();
        }
        cart
    }

    #[test]
    fn test_add_then_get_returns_normalized_values() {
        let cart = filled_cart();

        for (id, name, cost, quantity) in sample_items() {
            let hash = identity::item_hash(&id);
            let item = cart.get_item(id.clone()).expect("item should be present");

            assert_eq!(item.id(), &id);
            assert_eq!(item.name(), name);
            assert_eq!(item.cost(), Money::try_from_float(cost).unwrap());
            assert_eq!(item.quantity(), quantity);
            assert_eq!(item.total(), Money::try_from_float(cost).unwrap() * quantity);
            assert_eq!(item.item_hash(), Some(hash.as_str()));

            // Lookup by hash resolves to the same line
            assert!(cart.get_item_by_hash(&hash).is_some());
        }
    }

    #[test]
    fn test_add_rejects_invalid_arguments() {
        let mut cart = Cart::new();

        assert!(matches!(
            cart.add_item("£$%", "valid name", 10.0, 5),
            Err(CartError::Validation(ValidationError::InvalidId { .. }))
        ));
        assert!(matches!(
            cart.add_item("abc123", "valid name", f64::NAN, 5),
            Err(CartError::Validation(ValidationError::InvalidCost { .. }))
        ));
        assert!(matches!(
            cart.add_item(432u64, "valid name", 10.0, 0),
            Err(CartError::Validation(ValidationError::InvalidQuantity { .. }))
        ));
        assert!(matches!(
            cart.add_item(432u64, "valid name", -10.0, 5),
            Err(CartError::Validation(ValidationError::InvalidCost { .. }))
        ));

        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_quantity(), 0);

        let mut expected = 0;
        for (id, name, cost, quantity) in sample_items() {
            cart.add_item(id, name, cost, quantity).unwrap();
            expected += quantity;
        }

        assert_eq!(cart.total_quantity(), expected);
    }

    #[test]
    fn test_total_items() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_items(), 0);

        for (count, (id, name, cost, quantity)) in sample_items().into_iter().enumerate() {
            cart.add_item(id, name, cost, quantity).unwrap();
            assert_eq!(cart.total_items(), count + 1);
        }
    }

    #[test]
    fn test_total_cost() {
        let mut cart = Cart::new();
        assert!(cart.total_cost().is_zero());

        let mut expected = Money::zero();
        for (id, name, cost, quantity) in sample_items() {
            cart.add_item(id, name, cost, quantity).unwrap();
            expected += Money::try_from_float(cost).unwrap() * quantity;
        }

        assert_eq!(cart.total_cost(), expected);
        assert_eq!(cart.total_cost(), Money::from_cents(3491));
    }

    #[test]
    fn test_two_line_example() {
        let mut cart = Cart::new();
        cart.add_item("abc123", "item 1", 5.0, 1).unwrap();
        cart.add_item(433u64, "item 2", 2.51, 1).unwrap();

        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total_cost(), Money::from_cents(751));
    }

    #[test]
    fn test_clear() {
        let mut cart = filled_cart();
        assert!(!cart.is_empty());

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_quantity(), 0);
        assert!(cart.total_cost().is_zero());
    }

    #[test]
    fn test_add_same_id_updates_in_place() {
        let mut cart = Cart::new();
        cart.add_item("abc123", "item 1", 5.0, 1).unwrap();
        cart.add_item("abc123", "item 1b", 2.0, 3).unwrap();

        assert_eq!(cart.total_items(), 1);

        let item = cart.get_item("abc123").unwrap();
        assert_eq!(item.name(), "item 1b");
        assert_eq!(item.cost(), Money::from_cents(200));
        assert_eq!(item.quantity(), 3);
        assert_eq!(item.total(), Money::from_cents(600));
    }

    #[test]
    fn test_upsert_equivalent_to_add_then_update() {
        let mut upserted = Cart::new();
        upserted.add_item("abc123", "item 1", 5.0, 1).unwrap();
        upserted.add_item("abc123", "item 1b", 2.0, 3).unwrap();

        let mut updated = Cart::new();
        updated.add_item("abc123", "item 1", 5.0, 1).unwrap();
        updated
            .update_item(
                "abc123",
                ItemUpdate::new().name("item 1b").cost(2.0).quantity(3),
            )
            .unwrap();

        let a = upserted.get_item("abc123").unwrap();
        let b = updated.get_item("abc123").unwrap();
        assert_eq!(a.name(), b.name());
        assert_eq!(a.cost(), b.cost());
        assert_eq!(a.quantity(), b.quantity());
        assert_eq!(a.total(), b.total());
    }

    #[test]
    fn test_update_applies_only_provided_fields() {
        let mut cart = Cart::new();
        cart.add_item("x1", "n", 10.0, 3).unwrap();

        cart.update_item("x1", ItemUpdate::new().quantity(5)).unwrap();

        let item = cart.get_item("x1").unwrap();
        assert_eq!(item.name(), "n");
        assert_eq!(item.cost(), Money::from_cents(1000));
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.total(), Money::from_cents(5000));
    }

    #[test]
    fn test_update_zero_values_are_real_updates() {
        let mut options = Options::new();
        options.insert("gift".to_string(), Value::from(true));

        let mut cart = Cart::new();
        cart.add_item_with_options("x1", "n", 10.0, 3, options).unwrap();

        cart.update_item("x1", ItemUpdate::new().cost(0.0).options(Options::new()))
            .unwrap();

        let item = cart.get_item("x1").unwrap();
        assert!(item.cost().is_zero());
        assert!(item.total().is_zero());
        assert!(item.options().is_empty());
        assert_eq!(item.quantity(), 3);
    }

    #[test]
    fn test_update_absent_id_fails() {
        let mut cart = Cart::new();

        assert!(matches!(
            cart.update_item("zz9", ItemUpdate::new().quantity(2)),
            Err(CartError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_update_with_junk_hash_fails() {
        let mut cart = filled_cart();

        assert!(matches!(
            cart.update_item_by_hash(
                "wehnuiefh322i239092q1rejhq893trhs",
                ItemUpdate::new().quantity(2),
            ),
            Err(CartError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn test_update_validates_id_before_lookup() {
        let mut cart = Cart::new();

        assert!(matches!(
            cart.update_item("invalid id", ItemUpdate::new().quantity(2)),
            Err(CartError::Validation(ValidationError::InvalidId { .. }))
        ));
    }

    #[test]
    fn test_update_invalid_field_changes_nothing() {
        let mut cart = Cart::new();
        cart.add_item("x1", "n", 10.0, 3).unwrap();

        let result = cart.update_item(
            "x1",
            ItemUpdate::new().name("renamed").quantity(0),
        );
        assert!(matches!(
            result,
            Err(CartError::Validation(ValidationError::InvalidQuantity { .. }))
        ));

        // Validation runs before application, so even the valid name did
        // not land
        let item = cart.get_item("x1").unwrap();
        assert_eq!(item.name(), "n");
        assert_eq!(item.quantity(), 3);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item("x1", "n", 1.0, 1).unwrap();

        cart.remove_item("x1").unwrap();
        assert!(cart.get_item("x1").is_none());
        assert!(cart.is_empty());

        // Removing an absent id is a quiet no-op
        cart.remove_item("x1").unwrap();
        cart.remove_item("neveradded").unwrap();

        // A malformed id is still rejected
        assert!(matches!(
            cart.remove_item("invalid id"),
            Err(CartError::Validation(ValidationError::InvalidId { .. }))
        ));
    }

    #[test]
    fn test_get_item_malformed_id_is_none() {
        let cart = filled_cart();

        assert!(cart.get_item("invalid id").is_none());
        assert!(cart.get_item_by_hash("no such hash").is_none());
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item("one1", "a", 1.0, 1).unwrap();
        cart.add_item("two2", "b", 1.0, 1).unwrap();
        cart.add_item("three3", "c", 1.0, 1).unwrap();

        let names: Vec<_> = cart.items().map(|(_, item)| item.name()).collect();
        assert_eq!(names, ["a", "b", "c"]);

        // Removal keeps the order of the remaining lines; re-adding an id
        // appends at the end
        cart.remove_item("two2").unwrap();
        cart.add_item("two2", "b2", 1.0, 1).unwrap();

        let names: Vec<_> = cart.items().map(|(_, item)| item.name()).collect();
        assert_eq!(names, ["a", "c", "b2"]);

        // Updating never reorders
        cart.update_item("one1", ItemUpdate::new().quantity(9)).unwrap();
        let names: Vec<_> = cart.items().map(|(_, item)| item.name()).collect();
        assert_eq!(names, ["a", "c", "b2"]);
    }

    #[test]
    fn test_keys_match_identity_hashes() {
        let cart = filled_cart();

        for (hash, item) in cart.items() {
            assert_eq!(hash, identity::item_hash(item.id()));
            assert_eq!(item.item_hash(), Some(hash));
        }
    }

    #[test]
    fn test_cart_totals_summary() {
        let cart = filled_cart();
        let totals = CartTotals::from(&cart);

        assert_eq!(totals.total_items, 10);
        assert_eq!(totals.total_quantity, 10);
        assert_eq!(totals.total_cost, Money::from_cents(3491));

        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["total_items"], 10);
        assert_eq!(json["total_cost"], 3491);
    }

    // -------------------------------------------------------------------------
    // Capability substitution
    // -------------------------------------------------------------------------

    /// An item variant that refuses blank names.
    struct StrictNameItem(Item);

    impl CartItem for StrictNameItem {
        fn item_hash(&self) -> Option<&str> {
            self.0.item_hash()
        }

        fn set_item_hash(&mut self, hash: String) -> ValidationResult<()> {
            self.0.set_item_hash(hash)
        }

        fn id(&self) -> &ItemId {
            self.0.id()
        }

        fn set_id(&mut self, id: ItemId) -> ValidationResult<()> {
            self.0.set_id(id)
        }

        fn name(&self) -> &str {
            self.0.name()
        }

        fn set_name(&mut self, name: String) -> ValidationResult<()> {
            if name.trim().is_empty() {
                return Err(ValidationError::InvalidName { name });
            }
            self.0.set_name(name)
        }

        fn cost(&self) -> Money {
            self.0.cost()
        }

        fn set_cost(&mut self, cost: f64) -> ValidationResult<()> {
            self.0.set_cost(cost)
        }

        fn quantity(&self) -> i64 {
            self.0.quantity()
        }

        fn set_quantity(&mut self, quantity: i64) -> ValidationResult<()> {
            self.0.set_quantity(quantity)
        }

        fn options(&self) -> &Options {
            self.0.options()
        }

        fn set_options(&mut self, options: Options) {
            self.0.set_options(options)
        }

        fn total(&self) -> Money {
            self.0.total()
        }
    }

    struct StrictNameFactory;

    impl ItemFactory for StrictNameFactory {
        fn create(
            &self,
            id: ItemId,
            name: String,
            cost: f64,
            quantity: i64,
            options: Options,
        ) -> CartResult<BoxedItem> {
            if name.trim().is_empty() {
                return Err(ValidationError::InvalidName { name }.into());
            }
            let inner = Item::new(id, name, cost, quantity, options)?;
            Ok(Box::new(StrictNameItem(inner)))
        }
    }

    struct RefusingFactory;

    impl ItemFactory for RefusingFactory {
        fn create(
            &self,
            _id: ItemId,
            _name: String,
            _cost: f64,
            _quantity: i64,
            _options: Options,
        ) -> CartResult<BoxedItem> {
            Err(CartError::Factory {
                reason: "catalog unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_custom_factory_substitutes_item_type() {
        let mut cart = Cart::with_factory(Box::new(StrictNameFactory));

        cart.add_item("x1", "named", 5.0, 2).unwrap();
        assert_eq!(cart.total_cost(), Money::from_cents(1000));

        // The variant's own rule surfaces through the normal error path
        assert!(matches!(
            cart.add_item("x2", "  ", 5.0, 2),
            Err(CartError::Validation(ValidationError::InvalidName { .. }))
        ));
        assert!(matches!(
            cart.update_item("x1", ItemUpdate::new().name("")),
            Err(CartError::Validation(ValidationError::InvalidName { .. }))
        ));
    }

    #[test]
    fn test_refusing_factory_surfaces_factory_error() {
        let mut cart = Cart::with_factory(Box::new(RefusingFactory));

        assert!(matches!(
            cart.add_item("x1", "n", 1.0, 1),
            Err(CartError::Factory { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_item_with_options_stores_them() {
        let mut options = Options::new();
        options.insert("size".to_string(), Value::from("L"));
        options.insert("qty_step".to_string(), Value::from(2));

        let mut cart = Cart::new();
        cart.add_item_with_options("x1", "n", 1.0, 1, options).unwrap();

        let item = cart.get_item("x1").unwrap();
        assert_eq!(item.options().len(), 2);
        assert_eq!(item.options()["size"], Value::from("L"));
    }
}
