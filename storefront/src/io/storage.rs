//! Keyed client-side durable storage.
//!
//! Each key is a file under the state directory (default `.storefront/`).
//! Writes are atomic (temp file + rename). Loads fail closed: a missing,
//! unreadable, or malformed file yields the default record, logged but never
//! surfaced as an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Serialized [`crate::core::cart::CartState`].
pub const CART_KEY: &str = "cart.json";
/// Serialized [`crate::core::membership::MembershipSubscription`].
pub const SUBSCRIPTION_KEY: &str = "membership_subscription.json";
/// Serialized [`crate::auth::User`].
pub const USER_KEY: &str = "static_user.json";
/// Raw language code string.
pub const LANGUAGE_KEY: &str = "selected_language";
/// Raw currency code string.
pub const CURRENCY_KEY: &str = "selected_currency";

/// Handle to the keyed JSON store rooted at a state directory.
#[derive(Debug, Clone)]
pub struct ClientStore {
    root: PathBuf,
}

impl ClientStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Atomically serialize `value` under `key`.
    pub fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut buf = serde_json::to_string_pretty(value)
            .with_context(|| format!("serialize {key}"))?;
        buf.push('\n');
        self.write_atomic(key, &buf)
    }

    /// Strict load: `Ok(None)` when the key is absent, `Err` on read or
    /// parse failure.
    pub fn try_load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?;
        let value: T = serde_json::from_str(&contents)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(Some(value))
    }

    /// Fail-closed load: any failure is logged and yields the default
    /// record. A record that does not deserialize cleanly is discarded
    /// whole, never partially trusted.
    pub fn load_json_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.try_load_json(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(err) => {
                warn!(key, error = %format!("{err:#}"), "discarding malformed record");
                T::default()
            }
        }
    }

    /// Fail-closed load for records with no meaningful default.
    pub fn load_json_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load_json(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %format!("{err:#}"), "discarding malformed record");
                None
            }
        }
    }

    /// Store a raw string value (used for the language/currency keys).
    pub fn save_string(&self, key: &str, value: &str) -> Result<()> {
        self.write_atomic(key, value)
    }

    pub fn load_string(&self, key: &str) -> Option<String> {
        let path = self.path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim().to_string()),
            Err(err) => {
                warn!(key, error = %err, "failed to read stored value");
                None
            }
        }
    }

    /// Delete the value under `key`. Missing keys are fine.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        }
        Ok(())
    }

    fn write_atomic(&self, key: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("create directory {}", self.root.display()))?;
        let path = self.path(key);
        let tmp_path = self.root.join(format!("{key}.tmp"));
        fs::write(&tmp_path, contents)
            .with_context(|| format!("write temp {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("replace {}", path.display()))?;
        debug!(key, "stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Record {
        value: u32,
    }

    fn store() -> (tempfile::TempDir, ClientStore) {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = ClientStore::new(temp.path().join("state"));
        (temp, store)
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_temp, store) = store();
        let record = Record { value: 7 };
        store.save_json("record.json", &record).expect("save");
        assert_eq!(store.try_load_json("record.json").expect("load"), Some(record));
    }

    #[test]
    fn missing_key_loads_as_none() {
        let (_temp, store) = store();
        let loaded: Option<Record> = store.try_load_json("missing.json").expect("load");
        assert_eq!(loaded, None);
    }

    /// Corrupt JSON is discarded whole and replaced with the default.
    #[test]
    fn malformed_record_falls_back_to_default() {
        let (_temp, store) = store();
        fs::create_dir_all(store.root()).expect("mkdir");
        fs::write(store.root().join("record.json"), "{not json").expect("write");

        let loaded: Record = store.load_json_or_default("record.json");
        assert_eq!(loaded, Record::default());
    }

    /// A record with the wrong shape is rejected, not field-merged.
    #[test]
    fn wrong_shape_is_rejected_whole() {
        let (_temp, store) = store();
        fs::create_dir_all(store.root()).expect("mkdir");
        fs::write(store.root().join("record.json"), r#"{"value": "seven"}"#).expect("write");

        let loaded: Record = store.load_json_or_default("record.json");
        assert_eq!(loaded, Record::default());
    }

    #[test]
    fn string_values_round_trip() {
        let (_temp, store) = store();
        store.save_string(CURRENCY_KEY, "USD").expect("save");
        assert_eq!(store.load_string(CURRENCY_KEY).as_deref(), Some("USD"));
    }

    #[test]
    fn remove_is_noop_for_missing_key() {
        let (_temp, store) = store();
        store.remove("missing.json").expect("remove");
    }

    #[test]
    fn remove_deletes_the_value() {
        let (_temp, store) = store();
        store.save_string(LANGUAGE_KEY, "en").expect("save");
        store.remove(LANGUAGE_KEY).expect("remove");
        assert_eq!(store.load_string(LANGUAGE_KEY), None);
    }
}
