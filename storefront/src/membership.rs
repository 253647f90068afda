//! Membership service: subscription lifecycle over the client store.
//!
//! The service is the single writer for the subscription record. A
//! transition is applied to a copy, persisted, and only then installed in
//! memory, so a failed persist leaves the in-memory record untouched (no
//! retry, no partial state). Callers can observe the `loading` flag around
//! each transition.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use tracing::debug;

use crate::core::membership::{MembershipPlan, MembershipStatus, MembershipSubscription};
use crate::io::config::MembershipConfig;
use crate::io::storage::{ClientStore, SUBSCRIPTION_KEY};

/// What the VIP upsell advertises to non-members.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipUpsell {
    pub show: bool,
    pub discount_percentage: f64,
    pub trial_days: i64,
    pub monthly_price: f64,
    pub features: Vec<String>,
}

pub struct MembershipService {
    store: ClientStore,
    config: MembershipConfig,
    subscription: Option<MembershipSubscription>,
    loading: bool,
}

impl MembershipService {
    /// Open the service, reloading any persisted subscription. A malformed
    /// record is discarded whole.
    pub fn load(store: ClientStore, config: MembershipConfig) -> Self {
        let subscription = store.load_json_opt(SUBSCRIPTION_KEY);
        Self {
            store,
            config,
            subscription,
            loading: false,
        }
    }

    pub fn subscription(&self) -> Option<&MembershipSubscription> {
        self.subscription.as_ref()
    }

    pub fn config(&self) -> &MembershipConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> MembershipStatus {
        self.subscription
            .as_ref()
            .map_or(MembershipStatus::None, |sub| sub.status)
    }

    pub fn is_member(&self) -> bool {
        self.subscription.as_ref().is_some_and(|sub| sub.is_member())
    }

    pub fn is_on_trial(&self) -> bool {
        self.subscription.as_ref().is_some_and(|sub| sub.is_on_trial())
    }

    /// The upsell is shown to anyone who is not currently a member.
    pub fn upsell(&self) -> MembershipUpsell {
        MembershipUpsell {
            show: !self.is_member(),
            discount_percentage: self.config.discount_percentage,
            trial_days: self.config.trial_days,
            monthly_price: self.config.monthly_price,
            features: self.config.features.clone(),
        }
    }

    /// Start a new trial subscription.
    ///
    /// Rejected while a trial or active subscription exists. A cancelled or
    /// expired record is replaced by a brand-new one; the old record is not
    /// revived.
    pub fn subscribe(&mut self, plan: MembershipPlan) -> Result<&MembershipSubscription> {
        self.loading = true;
        let result = self.subscribe_inner(plan);
        self.loading = false;
        result?;
        self.subscription
            .as_ref()
            .context("subscription missing after subscribe")
    }

    fn subscribe_inner(&mut self, plan: MembershipPlan) -> Result<()> {
        if self.is_member() {
            bail!("a trial or active subscription already exists");
        }
        let subscription =
            MembershipSubscription::start(plan, self.config.terms(), Utc::now());
        self.store
            .save_json(SUBSCRIPTION_KEY, &subscription)
            .context("persist subscription")?;
        debug!(id = %subscription.id, "subscription started");
        self.subscription = Some(subscription);
        Ok(())
    }

    /// Cancel the current subscription. Terminal.
    pub fn cancel(&mut self) -> Result<()> {
        self.transition("cancel", |sub| sub.cancel(Utc::now()))
    }

    /// Pause billing. Valid from active only.
    pub fn pause(&mut self) -> Result<()> {
        self.transition("pause", |sub| sub.pause(Utc::now()))
    }

    /// Resume a paused subscription.
    pub fn resume(&mut self) -> Result<()> {
        self.transition("resume", |sub| sub.resume())
    }

    fn transition<F>(&mut self, name: &str, apply: F) -> Result<()>
    where
        F: FnOnce(&mut MembershipSubscription) -> Result<(), String>,
    {
        self.loading = true;
        let result = (|| {
            let mut updated = self
                .subscription
                .clone()
                .ok_or_else(|| anyhow!("no subscription to {name}"))?;
            apply(&mut updated).map_err(|msg| anyhow!(msg))?;
            self.store
                .save_json(SUBSCRIPTION_KEY, &updated)
                .with_context(|| format!("persist subscription after {name}"))?;
            debug!(id = %updated.id, status = updated.status.as_str(), "subscription updated");
            self.subscription = Some(updated);
            Ok(())
        })();
        self.loading = false;
        result
    }
}
