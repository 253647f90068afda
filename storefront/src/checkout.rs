//! Checkout flow: validation, order construction, and the simulated
//! payment gateway.
//!
//! The gateway is a demo stand-in. A submitted order enters a processing
//! state that never settles: polling reports `Processing` forever, with no
//! timeout and no terminal transition. No charge is ever made.

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::cart::CartState;
use crate::core::checkout::{CaptchaChallenge, CheckoutForm, Order, build_order, validate_form};
use crate::core::membership::MembershipStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// The only status the simulated gateway ever reports.
    Processing,
}

/// Receipt for a submitted order. Poll as often as you like; the answer
/// does not change.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentTicket {
    order: Order,
    submitted_at: DateTime<Utc>,
}

impl PaymentTicket {
    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn poll(&self) -> PaymentStatus {
        PaymentStatus::Processing
    }
}

/// Boundary to whatever processes payments. The only implementation here is
/// simulated; nothing behind this trait reaches a real gateway.
pub trait PaymentGateway {
    fn submit(&self, order: Order) -> Result<PaymentTicket>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGateway;

impl PaymentGateway for SimulatedGateway {
    fn submit(&self, order: Order) -> Result<PaymentTicket> {
        Ok(PaymentTicket {
            order,
            submitted_at: Utc::now(),
        })
    }
}

/// Validate the form and submit the cart as an order.
///
/// Validation failures abort before any state is touched; a non-empty cart
/// is required. On success the returned ticket is permanently in
/// [`PaymentStatus::Processing`].
pub fn place_order(
    gateway: &dyn PaymentGateway,
    cart: &CartState,
    form: &CheckoutForm,
    captcha: &CaptchaChallenge,
    captcha_answer: &str,
    agreed_to_terms: bool,
    membership_status: MembershipStatus,
    membership_monthly_price: f64,
) -> Result<PaymentTicket> {
    if cart.is_empty() {
        bail!("cart is empty");
    }
    validate_form(form, captcha, captcha_answer, agreed_to_terms).map_err(|msg| anyhow!(msg))?;
    let order = build_order(cart, membership_status, membership_monthly_price, Utc::now());
    gateway.submit(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{filled_form, product};

    fn captcha() -> CaptchaChallenge {
        CaptchaChallenge {
            question: "3 × 3 = ?".to_string(),
            answer: 9,
        }
    }

    fn cart() -> CartState {
        let mut cart = CartState::default();
        cart.add_item(&product(1, 29.99));
        cart
    }

    #[test]
    fn valid_order_enters_processing_and_stays_there() {
        let ticket = place_order(
            &SimulatedGateway,
            &cart(),
            &filled_form(),
            &captcha(),
            "9",
            true,
            MembershipStatus::None,
            19.99,
        )
        .expect("place order");

        assert_eq!(ticket.poll(), PaymentStatus::Processing);
        assert_eq!(ticket.poll(), PaymentStatus::Processing);
        assert_eq!(ticket.order().total, 29.99);
    }

    #[test]
    fn empty_cart_is_rejected() {
        let err = place_order(
            &SimulatedGateway,
            &CartState::default(),
            &filled_form(),
            &captcha(),
            "9",
            true,
            MembershipStatus::None,
            19.99,
        )
        .expect_err("empty cart");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn validation_failure_aborts_submission() {
        let mut form = filled_form();
        form.email = "nope".to_string();
        assert!(
            place_order(
                &SimulatedGateway,
                &cart(),
                &form,
                &captcha(),
                "9",
                true,
                MembershipStatus::None,
                19.99,
            )
            .is_err()
        );
    }

    #[test]
    fn selected_upsell_is_priced_into_the_order() {
        let mut cart = cart();
        cart.set_vip_membership(true);
        let ticket = place_order(
            &SimulatedGateway,
            &cart,
            &filled_form(),
            &captcha(),
            "9",
            true,
            MembershipStatus::None,
            19.99,
        )
        .expect("place order");

        assert!(ticket.order().has_vip_membership);
        assert_eq!(ticket.order().membership_price, 19.99);
        assert_eq!(ticket.order().total, 49.98);
    }
}
