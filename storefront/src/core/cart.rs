//! Cart state and its reducer.
//!
//! Every mutation recomputes the derived fields (`subtotal`,
//! `discount_amount`, `total`, `item_count`) so the state is always
//! internally consistent. Persistence is the caller's concern.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// A single cart line: the product snapshot plus quantity and discount
/// bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: u32,
    pub name: String,
    /// Unit price in EUR at the time the line was created.
    pub price: f64,
    pub image: String,
    pub description: String,
    pub category: String,
    /// Always >= 1; a quantity reaching zero removes the line instead.
    pub quantity: u32,
    /// Pre-discount unit price, recorded when the line is created.
    pub original_price: Option<f64>,
    /// Percentage discount applied to this line, if any.
    pub discount_applied: Option<f64>,
}

impl CartItem {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            quantity: 1,
            original_price: Some(product.price),
            discount_applied: None,
        }
    }

    fn unit_price(&self) -> f64 {
        self.original_price.unwrap_or(self.price)
    }
}

/// The authoritative in-memory cart.
///
/// Derived fields are recomputed atomically by every mutating operation and
/// must never be edited directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CartState {
    pub items: Vec<CartItem>,
    /// Sum of pre-discount unit price x quantity.
    pub subtotal: f64,
    /// subtotal x membership_discount / 100.
    pub discount_amount: f64,
    /// subtotal - discount_amount, floored at zero.
    pub total: f64,
    /// Sum of all line quantities.
    pub item_count: u32,
    /// Membership discount percentage currently applied, if any.
    pub membership_discount: Option<f64>,
    /// Whether the VIP membership upsell is selected. Display-only until
    /// checkout; has no effect on cart pricing.
    pub vip_membership_selected: bool,
}

impl CartState {
    /// Insert `product` with quantity 1, or bump the quantity of an existing
    /// line with the same id. Always succeeds.
    pub fn add_item(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(CartItem::from_product(product)),
        }
        self.recompute();
    }

    /// Remove the line with `id`. No-op when absent.
    pub fn remove_item(&mut self, id: u32) {
        self.items.retain(|item| item.id != id);
        self.recompute();
    }

    /// Set the quantity of line `id` exactly. A quantity of zero (or a call
    /// for a missing id) behaves like [`CartState::remove_item`].
    pub fn update_quantity(&mut self, id: u32, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
        self.recompute();
    }

    /// Apply a membership discount percentage and recompute totals.
    pub fn apply_membership_discount(&mut self, percentage: f64) {
        self.membership_discount = Some(percentage);
        self.recompute();
    }

    /// Clear any membership discount; total reverts to the subtotal.
    pub fn remove_membership_discount(&mut self) {
        self.membership_discount = None;
        self.recompute();
    }

    /// Toggle the VIP membership upsell flag. No pricing side effect.
    pub fn set_vip_membership(&mut self, selected: bool) {
        self.vip_membership_selected = selected;
    }

    /// Reset to an empty cart.
    pub fn clear(&mut self) {
        *self = CartState::default();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute(&mut self) {
        self.subtotal = self
            .items
            .iter()
            .map(|item| item.unit_price() * f64::from(item.quantity))
            .sum();
        self.discount_amount = match self.membership_discount {
            Some(percentage) => self.subtotal * percentage / 100.0,
            None => 0.0,
        };
        self.total = (self.subtotal - self.discount_amount).max(0.0);
        self.item_count = self.items.iter().map(|item| item.quantity).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::product;

    /// item_count always equals the sum of line quantities.
    #[test]
    fn add_item_keeps_item_count_in_sync() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 10.0));
        cart.add_item(&product(2, 5.0));
        cart.add_item(&product(1, 10.0));

        let quantities: u32 = cart.items.iter().map(|item| item.quantity).sum();
        assert_eq!(cart.item_count, quantities);
        assert_eq!(cart.item_count, 3);
    }

    /// Adding the same product id twice increments quantity rather than
    /// duplicating the line.
    #[test]
    fn add_item_merges_duplicate_ids() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 10.0));
        cart.add_item(&product(1, 10.0));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.subtotal, 20.0);
    }

    #[test]
    fn add_item_records_original_price() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 12.5));
        assert_eq!(cart.items[0].original_price, Some(12.5));
    }

    #[test]
    fn remove_item_is_noop_for_missing_id() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 10.0));
        let before = cart.clone();

        cart.remove_item(99);
        assert_eq!(cart, before);
    }

    /// update_quantity(id, 0) produces the same state as remove_item(id).
    #[test]
    fn update_quantity_zero_equals_remove() {
        let mut removed = CartState::default();
        removed.add_item(&product(1, 10.0));
        removed.add_item(&product(2, 5.0));
        let mut zeroed = removed.clone();

        removed.remove_item(1);
        zeroed.update_quantity(1, 0);
        assert_eq!(removed, zeroed);
    }

    /// update_quantity sets the quantity exactly, not incrementally.
    #[test]
    fn update_quantity_sets_exact_value() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 10.0));
        cart.update_quantity(1, 5);

        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.subtotal, 50.0);
        assert_eq!(cart.item_count, 5);
    }

    /// 25% of 100.00 yields discount 25.00 and total 75.00; removal restores
    /// the total to the subtotal exactly.
    #[test]
    fn membership_discount_applies_and_reverts() {
        let mut cart = CartState::default();
        for _ in 0..10 {
            cart.add_item(&product(1, 10.0));
        }
        assert_eq!(cart.subtotal, 100.0);

        cart.apply_membership_discount(25.0);
        assert_eq!(cart.discount_amount, 25.0);
        assert_eq!(cart.total, 75.0);

        cart.remove_membership_discount();
        assert_eq!(cart.discount_amount, 0.0);
        assert_eq!(cart.total, cart.subtotal);
    }

    /// Total is clamped at zero no matter the discount percentage.
    #[test]
    fn total_never_goes_negative() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 10.0));
        cart.apply_membership_discount(250.0);

        assert!(cart.total >= 0.0);
        assert_eq!(cart.total, 0.0);
    }

    /// Discounts recompute against the current subtotal as items change.
    #[test]
    fn discount_tracks_subtotal_changes() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 100.0));
        cart.apply_membership_discount(25.0);
        assert_eq!(cart.total, 75.0);

        cart.add_item(&product(2, 100.0));
        assert_eq!(cart.subtotal, 200.0);
        assert_eq!(cart.discount_amount, 50.0);
        assert_eq!(cart.total, 150.0);
    }

    #[test]
    fn set_vip_membership_does_not_touch_pricing() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 10.0));
        let total_before = cart.total;

        cart.set_vip_membership(true);
        assert!(cart.vip_membership_selected);
        assert_eq!(cart.total, total_before);
    }

    #[test]
    fn clear_resets_to_default() {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 10.0));
        cart.apply_membership_discount(25.0);
        cart.set_vip_membership(true);

        cart.clear();
        assert_eq!(cart, CartState::default());
    }
}
