//! Checkout form validation and order construction.
//!
//! Validation is all-or-nothing: the first failing rule aborts with an
//! inline message and no state is mutated anywhere. Order construction is a
//! pure snapshot of the cart plus membership pricing.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::cart::{CartItem, CartState};
use crate::core::membership::MembershipStatus;
use crate::core::pricing::round_cents;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Billing and payment details collected at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckoutForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub name_on_card: String,
}

/// Arithmetic human check shown on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptchaChallenge {
    pub question: String,
    pub answer: i64,
}

impl CaptchaChallenge {
    /// Random `a op b` over operands 1..=10 with op in {+, -, x}.
    /// Subtraction uses the absolute difference so the answer is never
    /// negative.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let a: i64 = rng.gen_range(1..=10);
        let b: i64 = rng.gen_range(1..=10);
        let (symbol, answer) = match rng.gen_range(0..3) {
            0 => ("+", a + b),
            1 => ("-", (a - b).abs()),
            _ => ("×", a * b),
        };
        Self {
            question: format!("{a} {symbol} {b} = ?"),
            answer,
        }
    }
}

/// Validate the checkout form against the required-field, captcha, terms,
/// email, and card-number rules. The first violated rule aborts.
pub fn validate_form(
    form: &CheckoutForm,
    captcha: &CaptchaChallenge,
    captcha_answer: &str,
    agreed_to_terms: bool,
) -> Result<(), String> {
    let required = [
        (&form.email, "email"),
        (&form.first_name, "first name"),
        (&form.last_name, "last name"),
        (&form.country, "country"),
        (&form.card_number, "card number"),
        (&form.expiry_date, "expiry date"),
        (&form.cvv, "cvv"),
        (&form.name_on_card, "name on card"),
    ];
    for (value, label) in required {
        if value.trim().is_empty() {
            return Err(format!("please fill in all required fields: {label}"));
        }
    }

    let answered: Option<i64> = captcha_answer.trim().parse().ok();
    if answered != Some(captcha.answer) {
        return Err("please solve the security verification correctly".to_string());
    }

    if !agreed_to_terms {
        return Err("please agree to the terms and conditions to proceed".to_string());
    }

    if !EMAIL_RE.is_match(&form.email) {
        return Err("please enter a valid email address".to_string());
    }

    let digits: String = form.card_number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() < 13 || digits.len() > 19 {
        return Err("please enter a valid card number".to_string());
    }

    Ok(())
}

/// Disclaimer carried on every order record.
pub const DEMO_NOTE: &str = "demo transaction - no real payment processing occurs";

/// Snapshot of a validated checkout, handed to the payment gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub membership_discount_percentage: f64,
    pub membership_discount_amount: f64,
    /// Monthly membership price added when the VIP upsell was selected.
    pub membership_price: f64,
    pub has_vip_membership: bool,
    pub membership_status: MembershipStatus,
    pub total: f64,
    pub timestamp: DateTime<Utc>,
    pub note: String,
}

/// Build the order record for `cart`.
///
/// The order total adds the membership monthly price on top of the
/// discounted cart total when the upsell is selected.
pub fn build_order(
    cart: &CartState,
    membership_status: MembershipStatus,
    membership_monthly_price: f64,
    now: DateTime<Utc>,
) -> Order {
    let membership_price = if cart.vip_membership_selected {
        membership_monthly_price
    } else {
        0.0
    };
    Order {
        items: cart.items.clone(),
        subtotal: cart.subtotal,
        membership_discount_percentage: cart.membership_discount.unwrap_or(0.0),
        membership_discount_amount: cart.discount_amount,
        membership_price,
        has_vip_membership: cart.vip_membership_selected,
        membership_status,
        total: round_cents(cart.subtotal - cart.discount_amount + membership_price),
        timestamp: now,
        note: DEMO_NOTE.to_string(),
    }
}
