//! Translation catalog.
//!
//! Each locale owns a flat `key -> text` table. Keys such as `"nav.home"`
//! are opaque: the dots are part of the name, not a path.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use super::Locale;

/// Catalog built from the tables compiled into the binary.
static EMBEDDED: Lazy<Catalog> = Lazy::new(Catalog::load_embedded);

/// Immutable per-locale translation tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<Locale, HashMap<String, String>>,
}

impl Catalog {
    /// The catalog shipped with the client.
    pub fn embedded() -> &'static Catalog {
        &EMBEDDED
    }

    /// Build a catalog from already parsed tables.
    pub fn from_tables(tables: HashMap<Locale, HashMap<String, String>>) -> Self {
        Self { tables }
    }

    fn load_embedded() -> Self {
        let sources = [
            (Locale::En, include_str!("en.json")),
            (Locale::Hi, include_str!("hi.json")),
            (Locale::Or, include_str!("or.json")),
            (Locale::Bn, include_str!("bn.json")),
        ];

        let mut tables = HashMap::new();
        for (locale, json) in sources {
            match serde_json::from_str::<HashMap<String, String>>(json) {
                Ok(table) => {
                    debug!("Loaded {} translations for {}", table.len(), locale);
                    tables.insert(locale, table);
                }
                Err(e) => {
                    // Lookups for this locale fall through to English (or the key).
                    warn!("Failed to parse translations for {}: {}", locale, e);
                }
            }
        }

        Self::from_tables(tables)
    }

    /// Resolve `key` for `locale`.
    ///
    /// Tries the locale's table, then the default locale's table, and
    /// finally returns the key itself. Never fails.
    pub fn resolve<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.lookup(locale, key)
            .or_else(|| self.lookup(Locale::DEFAULT, key))
            .unwrap_or(key)
    }

    /// Exact lookup without any fallback.
    pub fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        self.tables
            .get(&locale)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Canonical key space (keys of the default locale), sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .tables
            .get(&Locale::DEFAULT)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Canonical keys that `locale` does not translate, sorted.
    pub fn missing_keys(&self, locale: Locale) -> Vec<&str> {
        self.keys()
            .into_iter()
            .filter(|key| self.lookup(locale, key).is_none())
            .collect()
    }
}
