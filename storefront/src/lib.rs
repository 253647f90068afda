//! Client-side storefront for digital copywriting courses.
//!
//! Product catalog, cart, membership subscriptions, and a simulated
//! checkout, all backed by a keyed JSON store standing in for browser local
//! storage. There is no real backend: payments and authentication are
//! deliberately simulated. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (cart arithmetic, membership
//!   transitions, pricing, checkout validation). No I/O, fully testable in
//!   isolation.
//! - **[`io`]**: Side-effecting operations (client store, config file,
//!   exchange-rate fetch). Isolated to enable mocking in tests.
//!
//! Service modules ([`cart`], [`membership`], [`currency`], [`checkout`],
//! [`auth`], [`prefs`]) coordinate core logic with I/O to implement the CLI
//! commands.

pub mod auth;
pub mod blog;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod currency;
pub mod io;
pub mod logging;
pub mod membership;
pub mod prefs;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
