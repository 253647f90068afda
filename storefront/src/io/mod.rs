//! Side-effecting operations: the keyed client store, the TOML
//! configuration file, and the exchange-rate fetch.

pub mod config;
pub mod rates;
pub mod storage;
