//! Persisted UI preferences: the interface language.
//!
//! The currency preference lives with [`crate::currency::CurrencyService`];
//! this module covers the language toggle.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::io::storage::{ClientStore, LANGUAGE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
    Es,
    De,
    It,
    Pt,
    Nl,
    Pl,
    Ru,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::En,
        Language::Fr,
        Language::Es,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Nl,
        Language::Pl,
        Language::Ru,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Nl => "nl",
            Language::Pl => "pl",
            Language::Ru => "ru",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "Français",
            Language::Es => "Español",
            Language::De => "Deutsch",
            Language::It => "Italiano",
            Language::Pt => "Português",
            Language::Nl => "Nederlands",
            Language::Pl => "Polski",
            Language::Ru => "Русский",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.iter().copied().find(|l| l.code() == code)
    }
}

pub struct Preferences {
    store: ClientStore,
}

impl Preferences {
    pub fn new(store: ClientStore) -> Self {
        Self { store }
    }

    /// The saved language. Missing or unknown values fall back to English.
    pub fn language(&self) -> Language {
        self.store
            .load_string(LANGUAGE_KEY)
            .and_then(|code| Language::from_code(&code))
            .unwrap_or(Language::En)
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.store.save_string(LANGUAGE_KEY, language.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs() -> (tempfile::TempDir, Preferences) {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = ClientStore::new(temp.path().join("state"));
        (temp, Preferences::new(store))
    }

    #[test]
    fn defaults_to_english() {
        let (_temp, prefs) = prefs();
        assert_eq!(prefs.language(), Language::En);
    }

    #[test]
    fn set_language_round_trips() {
        let (_temp, prefs) = prefs();
        prefs.set_language(Language::Ru).expect("set");
        assert_eq!(prefs.language(), Language::Ru);
    }

    #[test]
    fn unknown_saved_code_falls_back_to_english() {
        let (_temp, prefs) = prefs();
        prefs.store.save_string(LANGUAGE_KEY, "xx").expect("save");
        assert_eq!(prefs.language(), Language::En);
    }

    #[test]
    fn codes_round_trip() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
    }
}
