//! Cart session: the in-memory cart plus its persistence.
//!
//! Construction loads any previously persisted state; every mutation
//! persists the full resulting state. Storage write failures are logged and
//! swallowed so cart operations never fail.

use tracing::warn;

use crate::catalog::Product;
use crate::core::cart::CartState;
use crate::io::storage::{CART_KEY, ClientStore};

pub struct CartSession {
    store: ClientStore,
    state: CartState,
}

impl CartSession {
    /// Open the cart, reloading persisted state. A malformed record is
    /// discarded whole and the session starts empty.
    pub fn load(store: ClientStore) -> Self {
        let state = store.load_json_or_default(CART_KEY);
        Self { store, state }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn add_item(&mut self, product: &Product) {
        self.state.add_item(product);
        self.persist();
    }

    pub fn remove_item(&mut self, id: u32) {
        self.state.remove_item(id);
        self.persist();
    }

    pub fn update_quantity(&mut self, id: u32, quantity: u32) {
        self.state.update_quantity(id, quantity);
        self.persist();
    }

    pub fn apply_membership_discount(&mut self, percentage: f64) {
        self.state.apply_membership_discount(percentage);
        self.persist();
    }

    pub fn remove_membership_discount(&mut self) {
        self.state.remove_membership_discount();
        self.persist();
    }

    pub fn set_vip_membership(&mut self, selected: bool) {
        self.state.set_vip_membership(selected);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.state.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.store.save_json(CART_KEY, &self.state) {
            warn!(error = %format!("{err:#}"), "failed to persist cart");
        }
    }
}
