//! Session shopping cart.
//!
//! The cart is a mapping from melon ID to quantity and nothing more; prices
//! are looked up from the catalog whenever the cart is displayed, so a price
//! change is reflected immediately.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ubermelon_core::MelonId;

/// Melon quantities chosen by one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<MelonId, u32>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `id`, returning the new quantity.
    pub fn add(&mut self, id: MelonId) -> u32 {
        let quantity = self.items.entry(id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Quantity of `id` in the cart (zero when absent).
    #[must_use]
    pub fn quantity(&self, id: &MelonId) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    /// Total number of melons across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .values()
            .fold(0_u32, |acc, qty| acc.saturating_add(*qty))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines in melon ID order.
    pub fn iter(&self) -> impl Iterator<Item = (&MelonId, u32)> {
        self.items.iter().map(|(id, qty)| (id, *qty))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> MelonId {
        MelonId::parse(s).unwrap()
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new();
        assert!(cart.is_empty());

        assert_eq!(cart.add(id("cren")), 1);
        assert_eq!(cart.add(id("cren")), 2);
        assert_eq!(cart.add(id("musk")), 1);

        assert_eq!(cart.quantity(&id("cren")), 2);
        assert_eq!(cart.quantity(&id("musk")), 1);
        assert_eq!(cart.quantity(&id("nope")), 0);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_iter_is_ordered_by_id() {
        let mut cart = Cart::new();
        cart.add(id("yellow"));
        cart.add(id("casaba"));
        cart.add(id("musk"));

        let ids: Vec<&str> = cart.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["casaba", "musk", "yellow"]);
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart: Cart = serde_json::from_str(r#"{"cren": 4294967295}"#).unwrap();
        assert_eq!(cart.add(id("cren")), u32::MAX);
        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_session_json_shape() {
        let mut cart = Cart::new();
        cart.add(id("cren"));
        cart.add(id("cren"));

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json, serde_json::json!({ "cren": 2 }));

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
