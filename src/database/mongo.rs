//! MongoDB database wrapper.

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::info;

/// Errors from the hosted database.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("database request failed: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// Handle to the MediBot database.
#[derive(Debug, Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Hospital directory collection.
    pub const HOSPITALS: &'static str = "hospitals";

    /// Account collection.
    pub const ACCOUNTS: &'static str = "accounts";

    /// Connect and verify the server answers a ping.
    ///
    /// # Errors
    /// Returns error if the URI is invalid or the server is unreachable.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, DatabaseError> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("medibot".to_string());
        let client = Client::with_options(options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Connected to MongoDB database {}", db_name);

        Ok(Self {
            db: client.database(db_name),
        })
    }

    /// Get a typed collection from the database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
