//! Exchange-rate sources.
//!
//! The storefront prices in EUR and converts at display time using rates
//! fetched from a public endpoint. Fetch failures are expected and
//! tolerated; callers keep the static fallback table.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Where EUR-based rates come from. Injected so the currency service can be
/// tested without network access.
pub trait RateSource {
    /// Fetch the current EUR-based rate map, keyed by ISO code.
    fn fetch_eur_rates(&self) -> Result<HashMap<String, f64>>;
}

const RATES_ENDPOINT: &str = "https://api.exchangerate-api.com/v4/latest/EUR";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// Rate source backed by the public exchangerate-api endpoint.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    endpoint: String,
}

impl Default for HttpRateSource {
    fn default() -> Self {
        Self {
            endpoint: RATES_ENDPOINT.to_string(),
        }
    }
}

impl HttpRateSource {
    /// Point at a non-default endpoint (used by tests against a local server).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl RateSource for HttpRateSource {
    fn fetch_eur_rates(&self) -> Result<HashMap<String, f64>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .context("build http client")?;
        let response = client
            .get(&self.endpoint)
            .send()
            .with_context(|| format!("fetch rates from {}", self.endpoint))?
            .error_for_status()
            .context("rates endpoint returned an error status")?;
        let body: RatesResponse = response.json().context("parse rates response")?;
        Ok(body.rates)
    }
}

/// Fixed in-memory rates for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    pub rates: HashMap<String, f64>,
}

impl RateSource for StaticRateSource {
    fn fetch_eur_rates(&self) -> Result<HashMap<String, f64>> {
        Ok(self.rates.clone())
    }
}

/// Rate source that always fails, for exercising the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableRateSource;

impl RateSource for UnreachableRateSource {
    fn fetch_eur_rates(&self) -> Result<HashMap<String, f64>> {
        anyhow::bail!("rate source unavailable")
    }
}
