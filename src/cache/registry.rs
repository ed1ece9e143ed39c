//! Cache registry - one place that owns every named cache.

use std::any::Any;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::{CacheConfig, TypedCache};

/// Errors raised by the registry.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache '{name}' already exists as {existing}, requested {requested}")]
    TypeMismatch {
        name: String,
        existing: &'static str,
        requested: &'static str,
    },
}

/// Type-erased registry entry.
struct CacheEntry {
    cache: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// Registry of named typed caches.
///
/// Repositories ask for their cache by name, so two repositories backed by
/// the same collection share entries and invalidations.
#[derive(Clone, Default)]
pub struct CacheRegistry {
    caches: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cache registered as `name`, creating it with `config` if absent.
    ///
    /// # Errors
    /// Returns [`CacheError::TypeMismatch`] if `name` is registered with
    /// different key or value types.
    pub fn get_or_create<K, V>(
        &self,
        name: &str,
        config: CacheConfig,
    ) -> Result<TypedCache<K, V>, CacheError>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let mut caches = self.caches.write();

        if let Some(entry) = caches.get(name) {
            return entry
                .cache
                .downcast_ref::<TypedCache<K, V>>()
                .cloned()
                .ok_or_else(|| CacheError::TypeMismatch {
                    name: name.to_string(),
                    existing: entry.type_name,
                    requested: std::any::type_name::<TypedCache<K, V>>(),
                });
        }

        debug!("Creating cache: {}", name);
        let cache = TypedCache::<K, V>::new(name, config);
        caches.insert(
            name.to_string(),
            CacheEntry {
                cache: Box::new(cache.clone()),
                type_name: std::any::type_name::<TypedCache<K, V>>(),
            },
        );
        Ok(cache)
    }

    /// Names of every registered cache, sorted.
    pub fn cache_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.caches.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("cache_names", &self.cache_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_shares_entries() {
        let registry = CacheRegistry::new();
        let a: TypedCache<String, u32> = registry.get_or_create("hits", CacheConfig::default()).unwrap();
        let b: TypedCache<String, u32> = registry.get_or_create("hits", CacheConfig::default()).unwrap();

        a.insert("x".to_string(), 7);
        assert_eq!(b.get(&"x".to_string()), Some(7));
        assert_eq!(registry.cache_names(), vec!["hits".to_string()]);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let registry = CacheRegistry::new();
        let _: TypedCache<String, u32> = registry.get_or_create("hits", CacheConfig::default()).unwrap();

        let result = registry.get_or_create::<u64, String>("hits", CacheConfig::default());
        assert!(matches!(result, Err(CacheError::TypeMismatch { .. })));
    }
}
