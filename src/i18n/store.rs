//! Active-language state.
//!
//! [`LocaleStore`] is the single owner of the client's current locale.
//! Clones share the same state, so the store is handed to every consumer
//! instead of living in a global. Only [`LocaleStore::set_active`] writes;
//! subscribers are notified on the writer's task before it returns.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::{Catalog, Locale};
use crate::storage::KeyValueStore;

/// Storage key under which the selected language is persisted.
pub const LOCALE_STORAGE_KEY: &str = "medibot-language";

type Listener = Arc<dyn Fn(Locale) + Send + Sync>;

/// Handle returned by [`LocaleStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Inner {
    active: RwLock<Locale>,
    storage: Arc<dyn KeyValueStore>,
    catalog: &'static Catalog,
    listeners: Mutex<Vec<(Subscription, Listener)>>,
    next_id: AtomicU64,
}

/// Shared, persisted, observable current locale.
#[derive(Clone)]
pub struct LocaleStore {
    inner: Arc<Inner>,
}

impl LocaleStore {
    /// Create the store, adopting the persisted locale if it is valid.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_catalog(storage, Catalog::embedded())
    }

    /// Like [`LocaleStore::load`] but resolving text against `catalog`.
    pub fn with_catalog(storage: Arc<dyn KeyValueStore>, catalog: &'static Catalog) -> Self {
        let active = match storage.get(LOCALE_STORAGE_KEY) {
            Some(saved) => match Locale::from_code(&saved) {
                Some(locale) => locale,
                None => {
                    warn!("Ignoring persisted language {:?}, using {}", saved, Locale::DEFAULT);
                    Locale::DEFAULT
                }
            },
            None => Locale::DEFAULT,
        };
        info!("Active language: {}", active);

        Self {
            inner: Arc::new(Inner {
                active: RwLock::new(active),
                storage,
                catalog,
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Current locale.
    pub fn get_active(&self) -> Locale {
        *self.inner.active.read()
    }

    /// Make `locale` the active locale.
    ///
    /// Persists the choice (failures are logged, not returned), updates the
    /// shared state and notifies every subscriber before returning.
    pub fn set_active(&self, locale: Locale) {
        let previous = {
            // Persist under the write guard so disk and memory agree on the last writer.
            let mut active = self.inner.active.write();
            if let Err(e) = self.inner.storage.set(LOCALE_STORAGE_KEY, locale.code()) {
                warn!("Failed to persist language {}: {}", locale, e);
            }
            std::mem::replace(&mut *active, locale)
        };
        debug!("Language changed {} -> {}", previous, locale);

        // Snapshot so listeners may call back into the store.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(locale);
        }
    }

    /// Untyped setter for codes coming from user input.
    ///
    /// Unknown codes leave the state untouched and return `None`.
    pub fn set_active_code(&self, code: &str) -> Option<Locale> {
        match Locale::from_code(code) {
            Some(locale) => {
                self.set_active(locale);
                Some(locale)
            }
            None => {
                warn!("Rejected unsupported language code {:?}", code);
                None
            }
        }
    }

    /// Register `listener` to be called with every newly set locale.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Locale) + Send + Sync + 'static,
    {
        let id = Subscription(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }

    /// Resolve `key` in the active locale.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.inner.catalog.resolve(self.get_active(), key)
    }

    /// Catalog the store resolves against.
    pub fn catalog(&self) -> &'static Catalog {
        self.inner.catalog
    }
}

impl fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleStore")
            .field("active", &self.get_active())
            .field("listeners", &self.inner.listeners.lock().len())
            .finish()
    }
}
