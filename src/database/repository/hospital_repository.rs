//! Hospital directory backed by MongoDB.
//!
//! Search results are cached per (term, limit), since the same district or
//! pincode tends to be searched repeatedly in a short window.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use tracing::debug;

use crate::cache::{CacheConfig, CacheError, CacheRegistry, TypedCache};
use crate::database::models::Hospital;
use crate::database::{Database, DatabaseError};
use crate::hospitals::{DirectoryError, HospitalDirectory, normalize_term};
use crate::utils::escape_regex;

/// Repository for the `hospitals` collection.
pub struct MongoHospitalDirectory {
    collection: Collection<Hospital>,
    /// (normalized term, limit) -> matching hospitals
    search_cache: TypedCache<(String, usize), Vec<Hospital>>,
}

impl MongoHospitalDirectory {
    /// # Errors
    /// Fails if the search cache name is already taken by another type.
    pub fn new(db: &Database, cache: &CacheRegistry) -> Result<Self, CacheError> {
        Ok(Self {
            collection: db.collection(Database::HOSPITALS),
            search_cache: cache.get_or_create("hospital_search", CacheConfig::hospital_search())?,
        })
    }

    async fn find(&self, filter: Document, limit: usize) -> Result<Vec<Hospital>, DatabaseError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let cursor = self
            .collection
            .find(filter)
            .limit(limit)
            .sort(doc! { "name": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

/// `$or` filter matching `needle` anywhere in name, district or pincode.
fn search_filter(needle: &str) -> Document {
    let pattern = escape_regex(needle);
    let field = |name: &str| {
        let mut clause = Document::new();
        clause.insert(name, doc! { "$regex": pattern.as_str(), "$options": "i" });
        clause
    };
    doc! { "$or": [field("pincode"), field("district"), field("name")] }
}

#[async_trait]
impl HospitalDirectory for MongoHospitalDirectory {
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<Hospital>, DirectoryError> {
        let needle = normalize_term(term).ok_or(DirectoryError::EmptyTerm)?;
        let key = (needle, limit);

        if let Some(hit) = self.search_cache.get(&key) {
            debug!("Hospital search cache hit for {:?}", key.0);
            return Ok(hit);
        }

        let hospitals = self.find(search_filter(&key.0), limit).await?;
        debug!("Hospital search {:?} returned {} rows", key.0, hospitals.len());
        self.search_cache.insert(key, hospitals.clone());
        Ok(hospitals)
    }

    async fn list(&self, limit: usize) -> Result<Vec<Hospital>, DirectoryError> {
        Ok(self.find(doc! {}, limit).await?)
    }
}
