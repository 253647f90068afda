//! Test-only helpers for constructing storefront records.

use chrono::{DateTime, Utc};

use crate::catalog::Product;
use crate::core::checkout::CheckoutForm;
use crate::core::membership::{
    MembershipPlan, MembershipStatus, MembershipSubscription, PlanTerms,
};
use crate::core::pricing::Currency;

/// Minimal in-stock product with a deterministic shape.
pub fn product(id: u32, price: f64) -> Product {
    Product {
        id,
        name: format!("Course {id}"),
        price,
        image: format!("/images/img_{id}.jpg"),
        images: vec![format!("/images/img_{id}.jpg")],
        video: None,
        videos: None,
        description: format!("Course {id} description"),
        detailed_description: format!("Course {id} detailed description"),
        category: "Copywriting Basics".to_string(),
        features: vec!["feature".to_string()],
        specifications: Default::default(),
        in_stock: true,
    }
}

/// Standard VIP plan terms (19.99 EUR monthly, 3 trial days).
pub fn vip_terms() -> PlanTerms {
    PlanTerms {
        monthly_price: 19.99,
        currency: Currency::Eur,
        trial_days: 3,
    }
}

/// Fresh trial subscription started at `now`.
pub fn trial_subscription(now: DateTime<Utc>) -> MembershipSubscription {
    MembershipSubscription::start(MembershipPlan::Vip, vip_terms(), now)
}

/// Subscription that has converted from trial to active billing.
pub fn active_subscription(now: DateTime<Utc>) -> MembershipSubscription {
    let mut sub = trial_subscription(now);
    sub.status = MembershipStatus::Active;
    sub
}

/// Checkout form with every required field populated and valid.
pub fn filled_form() -> CheckoutForm {
    CheckoutForm {
        email: "buyer@example.com".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        address: "1 Analytical Way".to_string(),
        city: "London".to_string(),
        state: "".to_string(),
        zip_code: "N1".to_string(),
        country: "United Kingdom".to_string(),
        card_number: "4242424242424242".to_string(),
        expiry_date: "12/30".to_string(),
        cvv: "123".to_string(),
        name_on_card: "Ada Lovelace".to_string(),
    }
}
