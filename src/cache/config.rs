//! Cache configuration.

use std::time::Duration;

/// Configuration for a cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Time-to-live for cache entries.
    pub ttl: Option<Duration>,

    /// Time-to-idle for cache entries.
    pub tti: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1_000,
            ttl: Some(Duration::from_secs(300)), // 5 minutes
            tti: None,
        }
    }
}

impl CacheConfig {
    /// Hospital search results.
    /// The directory changes rarely, but a search term is seldom repeated
    /// for long, so entries also expire when idle.
    pub fn hospital_search() -> Self {
        Self {
            max_capacity: 500,
            ttl: Some(Duration::from_secs(600)), // 10 minutes
            tti: Some(Duration::from_secs(120)), // 2 minutes idle
        }
    }

    /// Account lookups by e-mail during sign-in.
    pub fn accounts() -> Self {
        Self {
            max_capacity: 100,
            ttl: Some(Duration::from_secs(60)), // 1 minute
            tti: None,
        }
    }
}
