//! Account repository backed by MongoDB.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::debug;

use crate::auth::{AccountStore, AuthError};
use crate::cache::{CacheConfig, CacheError, CacheRegistry, TypedCache};
use crate::database::models::Account;
use crate::database::{Database, DatabaseError};

/// MongoDB duplicate key error code.
const DUPLICATE_KEY: i32 = 11000;

/// Repository for the `accounts` collection.
pub struct MongoAccountStore {
    collection: Collection<Account>,
    /// email -> account
    cache: TypedCache<String, Account>,
}

impl MongoAccountStore {
    /// # Errors
    /// Fails if the account cache name is already taken by another type.
    pub fn new(db: &Database, cache: &CacheRegistry) -> Result<Self, CacheError> {
        Ok(Self {
            collection: db.collection(Database::ACCOUNTS),
            cache: cache.get_or_create("accounts_by_email", CacheConfig::accounts())?,
        })
    }

    /// Create the unique e-mail index if it does not exist yet.
    ///
    /// # Errors
    /// Returns error if the index cannot be created.
    pub async fn ensure_indexes(&self) -> Result<(), DatabaseError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        debug!("Ensured unique email index on accounts");
        Ok(())
    }
}

fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl AccountStore for MongoAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        if let Some(account) = self.cache.get(&email.to_string()) {
            return Ok(Some(account));
        }

        let account = self
            .collection
            .find_one(doc! { "email": email })
            .await
            .map_err(DatabaseError::from)?;

        if let Some(account) = &account {
            self.cache.insert(account.email.clone(), account.clone());
        }
        Ok(account)
    }

    async fn insert(&self, account: &Account) -> Result<(), AuthError> {
        match self.collection.insert_one(account).await {
            Ok(_) => {
                self.cache.insert(account.email.clone(), account.clone());
                debug!("Inserted account {}", account.user_id);
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => {
                self.cache.invalidate(&account.email);
                Err(AuthError::EmailTaken)
            }
            Err(e) => Err(DatabaseError::from(e).into()),
        }
    }
}
