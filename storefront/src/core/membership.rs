//! Membership subscription record and its state machine.
//!
//! Transition rules:
//!
//! - `start`: the only transition that constructs a new identifier. Valid
//!   when no trial/active subscription exists.
//! - `cancel`: valid from trial or active; terminal. Re-subscribing creates a
//!   new record, it never revives a cancelled one.
//! - `pause`: valid from active only. Paused is a sub-state of active
//!   (`paused_at` set, `auto_renew` false), not a distinct status.
//! - `resume`: valid whenever `paused_at` is set.
//!
//! Invariant: `paused_at.is_some()` implies `auto_renew == false`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::pricing::Currency;

/// Days between the end of the trial and the first billing date.
const BILLING_CYCLE_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipPlan {
    Vip,
}

impl MembershipPlan {
    pub fn as_str(self) -> &'static str {
        match self {
            MembershipPlan::Vip => "vip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    None,
    Trial,
    Active,
    Cancelled,
    Expired,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MembershipStatus::None => "none",
            MembershipStatus::Trial => "trial",
            MembershipStatus::Active => "active",
            MembershipStatus::Cancelled => "cancelled",
            MembershipStatus::Expired => "expired",
        }
    }
}

/// Commercial terms a new subscription is created under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanTerms {
    pub monthly_price: f64,
    pub currency: Currency,
    pub trial_days: i64,
}

/// A subscription record. Never hard-deleted, only status-transitioned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MembershipSubscription {
    pub id: String,
    pub plan: MembershipPlan,
    pub status: MembershipStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub next_billing_date: Option<DateTime<Utc>>,
    pub trial_end_date: Option<DateTime<Utc>>,
    pub monthly_price: f64,
    pub currency: Currency,
    pub auto_renew: bool,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub paused_at: Option<DateTime<Utc>>,
}

impl MembershipSubscription {
    /// Create a fresh trial subscription starting at `now`.
    ///
    /// Trial runs for `terms.trial_days`; the first billing date is the trial
    /// end plus one billing cycle.
    pub fn start(plan: MembershipPlan, terms: PlanTerms, now: DateTime<Utc>) -> Self {
        let trial_end = now + Duration::days(terms.trial_days);
        Self {
            id: format!("sub_{}", now.timestamp_millis()),
            plan,
            status: MembershipStatus::Trial,
            start_date: now,
            end_date: None,
            next_billing_date: Some(trial_end + Duration::days(BILLING_CYCLE_DAYS)),
            trial_end_date: Some(trial_end),
            monthly_price: terms.monthly_price,
            currency: terms.currency,
            auto_renew: true,
            cancelled_at: None,
            paused_at: None,
        }
    }

    /// Cancel the subscription. Valid from trial or active.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), String> {
        match self.status {
            MembershipStatus::Trial | MembershipStatus::Active => {
                self.status = MembershipStatus::Cancelled;
                self.cancelled_at = Some(now);
                self.auto_renew = false;
                Ok(())
            }
            other => Err(format!("cannot cancel a {} subscription", other.as_str())),
        }
    }

    /// Pause billing. Valid from active only; pausing a trial or cancelled
    /// subscription is rejected.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), String> {
        if self.status != MembershipStatus::Active {
            return Err(format!("cannot pause a {} subscription", self.status.as_str()));
        }
        if self.paused_at.is_some() {
            return Err("subscription is already paused".to_string());
        }
        self.paused_at = Some(now);
        self.auto_renew = false;
        Ok(())
    }

    /// Resume a paused subscription.
    pub fn resume(&mut self) -> Result<(), String> {
        if self.paused_at.is_none() {
            return Err("subscription is not paused".to_string());
        }
        self.paused_at = None;
        self.auto_renew = true;
        Ok(())
    }

    /// A member is anyone on trial or with an active subscription.
    pub fn is_member(&self) -> bool {
        matches!(self.status, MembershipStatus::Trial | MembershipStatus::Active)
    }

    pub fn is_on_trial(&self) -> bool {
        self.status == MembershipStatus::Trial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{active_subscription, trial_subscription, vip_terms};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    /// start yields a trial with trial_end = start + trial_days and
    /// next_billing = trial_end + 30 days.
    #[test]
    fn start_creates_trial_with_billing_schedule() {
        let sub = MembershipSubscription::start(MembershipPlan::Vip, vip_terms(), now());

        assert_eq!(sub.status, MembershipStatus::Trial);
        assert_eq!(sub.start_date, now());
        assert_eq!(sub.trial_end_date, Some(now() + Duration::days(3)));
        assert_eq!(
            sub.next_billing_date,
            Some(now() + Duration::days(3) + Duration::days(30))
        );
        assert!(sub.auto_renew);
        assert!(sub.is_member());
        assert!(sub.is_on_trial());
    }

    #[test]
    fn start_derives_id_from_timestamp() {
        let sub = MembershipSubscription::start(MembershipPlan::Vip, vip_terms(), now());
        assert_eq!(sub.id, format!("sub_{}", now().timestamp_millis()));
    }

    /// cancel from trial: cancelled, auto_renew false, cancelled_at set,
    /// membership predicate turns false.
    #[test]
    fn cancel_from_trial() {
        let mut sub = trial_subscription(now());
        sub.cancel(now()).expect("cancel");

        assert_eq!(sub.status, MembershipStatus::Cancelled);
        assert_eq!(sub.cancelled_at, Some(now()));
        assert!(!sub.auto_renew);
        assert!(!sub.is_member());
    }

    #[test]
    fn cancel_from_active() {
        let mut sub = active_subscription(now());
        sub.cancel(now()).expect("cancel");
        assert_eq!(sub.status, MembershipStatus::Cancelled);
    }

    /// Cancelled is terminal.
    #[test]
    fn cancel_twice_is_rejected() {
        let mut sub = trial_subscription(now());
        sub.cancel(now()).expect("cancel");
        let err = sub.cancel(now()).expect_err("second cancel");
        assert!(err.contains("cancelled"));
    }

    /// pause + resume restores auto_renew and paused_at with no other field
    /// changes.
    #[test]
    fn pause_then_resume_round_trips() {
        let mut sub = active_subscription(now());
        let before = sub.clone();

        sub.pause(now()).expect("pause");
        assert_eq!(sub.paused_at, Some(now()));
        assert!(!sub.auto_renew);

        sub.resume().expect("resume");
        assert_eq!(sub, before);
    }

    /// Pause is enforced from active only; the trial state rejects it.
    #[test]
    fn pause_from_trial_is_rejected() {
        let mut sub = trial_subscription(now());
        let err = sub.pause(now()).expect_err("pause trial");
        assert!(err.contains("trial"));
    }

    #[test]
    fn pause_after_cancel_is_rejected() {
        let mut sub = active_subscription(now());
        sub.cancel(now()).expect("cancel");
        assert!(sub.pause(now()).is_err());
    }

    #[test]
    fn resume_without_pause_is_rejected() {
        let mut sub = active_subscription(now());
        assert!(sub.resume().is_err());
    }

    /// paused_at set and auto_renew=true never coexist.
    #[test]
    fn pause_clears_auto_renew() {
        let mut sub = active_subscription(now());
        sub.pause(now()).expect("pause");
        assert!(sub.paused_at.is_some());
        assert!(!sub.auto_renew);
    }
}
