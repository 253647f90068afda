//! Currency codes, exchange-rate table, and price formatting.
//!
//! All catalog prices are EUR; conversion multiplies by a cached rate and
//! rounds to two decimals. The rate table ships with static fallbacks so
//! pricing keeps working when the rate API is unreachable.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "CHF")]
    Chf,
    #[serde(rename = "SEK")]
    Sek,
    #[serde(rename = "NOK")]
    Nok,
    #[serde(rename = "DKK")]
    Dkk,
    #[serde(rename = "PLN")]
    Pln,
    #[serde(rename = "CZK")]
    Czk,
    #[serde(rename = "CAD")]
    Cad,
}

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Gbp,
        Currency::Chf,
        Currency::Sek,
        Currency::Nok,
        Currency::Dkk,
        Currency::Pln,
        Currency::Czk,
        Currency::Cad,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Dkk => "DKK",
            Currency::Pln => "PLN",
            Currency::Czk => "CZK",
            Currency::Cad => "CAD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Chf => "Fr",
            Currency::Sek | Currency::Nok | Currency::Dkk => "kr",
            Currency::Pln => "zł",
            Currency::Czk => "Kč",
            Currency::Cad => "C$",
        }
    }

    /// Parse an upper-case ISO code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Currency> {
        Currency::ALL.iter().copied().find(|c| c.code() == code)
    }

    /// Static EUR-based rate used when no fetched rate is available.
    fn fallback_rate(self) -> f64 {
        match self {
            Currency::Eur => 1.0,
            Currency::Usd => 1.08,
            Currency::Gbp => 0.86,
            Currency::Chf => 0.97,
            Currency::Sek => 11.50,
            Currency::Nok => 11.80,
            Currency::Dkk => 7.45,
            Currency::Pln => 4.35,
            Currency::Czk => 25.20,
            Currency::Cad => 1.48,
        }
    }
}

/// EUR-based exchange rates for every supported currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<Currency, f64>,
}

impl Default for RateTable {
    /// Table seeded with the static fallback rates.
    fn default() -> Self {
        let rates = Currency::ALL
            .iter()
            .map(|&c| (c, c.fallback_rate()))
            .collect();
        Self { rates }
    }
}

impl RateTable {
    /// Rate for `currency`. EUR is pinned at 1.0.
    pub fn rate(&self, currency: Currency) -> f64 {
        if currency == Currency::Eur {
            return 1.0;
        }
        self.rates
            .get(&currency)
            .copied()
            .unwrap_or_else(|| currency.fallback_rate())
    }

    /// Merge fetched rates keyed by ISO code. Unknown codes and non-positive
    /// values are ignored; currencies missing from `fetched` keep their
    /// current rate. EUR stays 1.0.
    pub fn merge(&mut self, fetched: &HashMap<String, f64>) {
        for (code, &rate) in fetched {
            if !rate.is_finite() || rate <= 0.0 {
                continue;
            }
            match Currency::from_code(code) {
                Some(Currency::Eur) | None => {}
                Some(currency) => {
                    self.rates.insert(currency, rate);
                }
            }
        }
    }
}

/// Round to two decimal places.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Convert an EUR price to `currency` using `rates`, rounded to cents.
pub fn convert_price(price_eur: f64, currency: Currency, rates: &RateTable) -> f64 {
    round_cents(price_eur * rates.rate(currency))
}

/// Format an EUR price in `currency`: two decimals followed by the symbol.
pub fn format_price(price_eur: f64, currency: Currency, rates: &RateTable) -> String {
    format!(
        "{:.2} {}",
        convert_price(price_eur, currency, rates),
        currency.symbol()
    )
}
