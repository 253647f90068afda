//! Storefront configuration stored under `.storefront/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::membership::PlanTerms;
use crate::core::pricing::Currency;

/// Storefront configuration (TOML).
///
/// Missing fields default to the standard plan terms; a missing file yields
/// the full default configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub membership: MembershipConfig,
    pub test_user: TestUserConfig,
    /// Support mailbox shown on marketing pages and order confirmations.
    pub support_email: String,
}

/// Commercial terms of the single VIP plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MembershipConfig {
    pub name: String,
    pub monthly_price: f64,
    pub trial_days: i64,
    /// Percentage taken off the cart subtotal for members.
    pub discount_percentage: f64,
    pub currency: Currency,
    pub features: Vec<String>,
}

/// Credentials of the single static user accepted by the simulated login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestUserConfig {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            name: "VIP Membership".to_string(),
            monthly_price: 19.99,
            trial_days: 3,
            discount_percentage: 25.0,
            currency: Currency::Eur,
            features: vec![
                "25% discount on all courses".to_string(),
                "Exclusive premium content".to_string(),
                "Priority customer support".to_string(),
                "Early access to new courses".to_string(),
                "Unlimited course downloads".to_string(),
                "Certificate of completion for all courses".to_string(),
            ],
        }
    }
}

impl Default for TestUserConfig {
    fn default() -> Self {
        Self {
            email: "test@test.com".to_string(),
            password: "12345".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            membership: MembershipConfig::default(),
            test_user: TestUserConfig::default(),
            support_email: "support@copywriting-ecourses.com".to_string(),
        }
    }
}

impl MembershipConfig {
    pub fn terms(&self) -> PlanTerms {
        PlanTerms {
            monthly_price: self.monthly_price,
            currency: self.currency,
            trial_days: self.trial_days,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.membership.monthly_price <= 0.0 {
            return Err(anyhow!("membership.monthly_price must be > 0"));
        }
        if self.membership.trial_days <= 0 {
            return Err(anyhow!("membership.trial_days must be > 0"));
        }
        if !(0.0..=100.0).contains(&self.membership.discount_percentage) {
            return Err(anyhow!(
                "membership.discount_percentage must be between 0 and 100"
            ));
        }
        if self.test_user.email.trim().is_empty() {
            return Err(anyhow!("test_user.email must not be empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `StoreConfig::default()`.
pub fn load_config(path: &Path) -> Result<StoreConfig> {
    if !path.exists() {
        let cfg = StoreConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: StoreConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &StoreConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf).with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, StoreConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        let cfg = StoreConfig::default();
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn default_terms_match_the_published_plan() {
        let cfg = MembershipConfig::default();
        assert_eq!(cfg.monthly_price, 19.99);
        assert_eq!(cfg.trial_days, 3);
        assert_eq!(cfg.discount_percentage, 25.0);
        assert_eq!(cfg.currency, Currency::Eur);
    }

    #[test]
    fn validate_rejects_out_of_range_discount() {
        let mut cfg = StoreConfig::default();
        cfg.membership.discount_percentage = 150.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_trial() {
        let mut cfg = StoreConfig::default();
        cfg.membership.trial_days = 0;
        assert!(cfg.validate().is_err());
    }
}
