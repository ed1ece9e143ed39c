//! Cache module - named Moka caches shared through a registry.
//!
//! - `CacheRegistry` - owns every named cache
//! - `TypedCache` - typed wrapper over a Moka cache
//! - `CacheConfig` - capacity and expiry settings
//!
//! ```rust,ignore
//! let results: TypedCache<String, Vec<Hospital>> =
//!     registry.get_or_create("hospital_search", CacheConfig::hospital_search())?;
//! results.insert(term, hospitals);
//! ```

mod config;
mod registry;
mod typed;

pub use config::CacheConfig;
pub use registry::{CacheError, CacheRegistry};
pub use typed::TypedCache;
