//! Pure, deterministic storefront logic.
//!
//! No I/O lives here: cart arithmetic, membership transitions, pricing, and
//! checkout validation are plain state transforms, fully testable in
//! isolation. Side effects (storage, HTTP) live in [`crate::io`].

pub mod cart;
pub mod checkout;
pub mod membership;
pub mod pricing;
