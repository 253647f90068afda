//! Currency service: selected display currency plus a cached rate table.
//!
//! Constructed explicitly with an injected [`RateSource`] rather than held
//! as a global. Fetch failures are logged and swallowed; the static
//! fallback rates stay in effect. A minimum refresh interval keeps the
//! public endpoint from being polled on every conversion.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::core::pricing::{Currency, RateTable, convert_price, format_price};
use crate::io::rates::RateSource;
use crate::io::storage::{CURRENCY_KEY, ClientStore};

/// Minimum time between two rate fetches.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

pub struct CurrencyService {
    store: ClientStore,
    source: Box<dyn RateSource>,
    rates: RateTable,
    current: Currency,
    last_fetch: Option<Instant>,
}

impl CurrencyService {
    /// Build the service: restores the persisted currency preference
    /// (defaulting to EUR on a missing or unknown value) and attempts an
    /// initial rate refresh.
    pub fn new(store: ClientStore, source: Box<dyn RateSource>) -> Self {
        let current = store
            .load_string(CURRENCY_KEY)
            .and_then(|code| Currency::from_code(&code))
            .unwrap_or(Currency::Eur);
        let mut service = Self {
            store,
            source,
            rates: RateTable::default(),
            current,
            last_fetch: None,
        };
        service.refresh_rates();
        service
    }

    pub fn currency(&self) -> Currency {
        self.current
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Switch the display currency, persist the preference, and try a rate
    /// refresh. Persistence failures are logged, not surfaced.
    pub fn set_currency(&mut self, currency: Currency) {
        self.current = currency;
        if let Err(err) = self.store.save_string(CURRENCY_KEY, currency.code()) {
            warn!(error = %format!("{err:#}"), "failed to persist currency preference");
        }
        self.refresh_rates();
    }

    /// Fetch fresh rates unless a fetch happened within [`REFRESH_INTERVAL`].
    /// Failures keep the current table.
    pub fn refresh_rates(&mut self) {
        if let Some(last) = self.last_fetch {
            if last.elapsed() < REFRESH_INTERVAL {
                return;
            }
        }
        match self.source.fetch_eur_rates() {
            Ok(fetched) => {
                self.rates.merge(&fetched);
                self.last_fetch = Some(Instant::now());
                debug!(count = fetched.len(), "exchange rates refreshed");
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "rate fetch failed, keeping fallback rates");
            }
        }
    }

    /// Ignore the interval gate and refresh now.
    pub fn force_refresh(&mut self) {
        self.last_fetch = None;
        self.refresh_rates();
    }

    /// Convert an EUR price into the selected currency.
    pub fn convert(&self, price_eur: f64) -> f64 {
        convert_price(price_eur, self.current, &self.rates)
    }

    /// Format an EUR price in the selected currency.
    pub fn format(&self, price_eur: f64) -> String {
        format_price(price_eur, self.current, &self.rates)
    }

    /// Format an EUR price in an explicit currency.
    pub fn format_in(&self, price_eur: f64, currency: Currency) -> String {
        format_price(price_eur, currency, &self.rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rates::{StaticRateSource, UnreachableRateSource};
    use std::collections::HashMap;

    fn store() -> (tempfile::TempDir, ClientStore) {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = ClientStore::new(temp.path().join("state"));
        (temp, store)
    }

    #[test]
    fn defaults_to_eur_without_a_saved_preference() {
        let (_temp, store) = store();
        let service = CurrencyService::new(store, Box::new(UnreachableRateSource));
        assert_eq!(service.currency(), Currency::Eur);
        assert_eq!(service.format(10.0), "10.00 €");
    }

    #[test]
    fn fetch_failure_keeps_fallback_rates() {
        let (_temp, store) = store();
        let service = CurrencyService::new(store, Box::new(UnreachableRateSource));
        assert_eq!(service.rates().rate(Currency::Usd), 1.08);
    }

    #[test]
    fn fetched_rates_override_fallbacks() {
        let (_temp, store) = store();
        let source = StaticRateSource {
            rates: HashMap::from([("USD".to_string(), 1.25)]),
        };
        let service = CurrencyService::new(store, Box::new(source));
        assert_eq!(service.rates().rate(Currency::Usd), 1.25);
        assert_eq!(service.rates().rate(Currency::Gbp), 0.86);
    }

    #[test]
    fn set_currency_persists_the_preference() {
        let (temp, store) = store();
        let mut service = CurrencyService::new(store, Box::new(UnreachableRateSource));
        service.set_currency(Currency::Usd);
        assert_eq!(service.format(10.0), "10.80 $");

        let reopened = CurrencyService::new(
            ClientStore::new(temp.path().join("state")),
            Box::new(UnreachableRateSource),
        );
        assert_eq!(reopened.currency(), Currency::Usd);
    }

    #[test]
    fn unknown_saved_preference_falls_back_to_eur() {
        let (_temp, store) = store();
        store.save_string(CURRENCY_KEY, "DOGE").expect("save");
        let service = CurrencyService::new(store, Box::new(UnreachableRateSource));
        assert_eq!(service.currency(), Currency::Eur);
    }

    /// A successful fetch arms the interval gate; the next refresh inside
    /// the window does not hit the source again.
    #[test]
    fn refresh_is_gated_by_the_interval() {
        let (_temp, store) = store();
        let source = StaticRateSource {
            rates: HashMap::from([("USD".to_string(), 1.25)]),
        };
        let mut service = CurrencyService::new(store, Box::new(source));
        assert!(service.last_fetch.is_some());
        let armed = service.last_fetch;

        service.refresh_rates();
        assert_eq!(service.last_fetch, armed);
    }
}
