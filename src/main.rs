//! MediBot - multilingual health companion client
//!
//! A terminal client that answers health questions in the user's language
//! and helps find nearby hospitals.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `i18n` - Translation catalog and the active-locale store
//! - `storage` - Durable key-value storage for preferences
//! - `chat` - Message log, reply selection and the chat session
//! - `auth` - Form validation, identity provider and current session
//! - `hospitals` - Hospital directory and card rendering
//! - `database` - MongoDB integration
//! - `cache` - LRU-based caching with Moka
//! - `console` - Terminal front end
//! - `utils` - Utility functions

mod auth;
mod cache;
mod chat;
mod config;
mod console;
mod database;
mod hospitals;
mod i18n;
mod storage;
mod utils;

use std::sync::Arc;

use tokio::io::BufReader;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use auth::{AccountIdentityProvider, AuthService, IdentityProvider, MemoryAccountStore};
use cache::CacheRegistry;
use chat::{ChatSession, ResponseSelector};
use config::Config;
use console::{Console, HospitalLimits};
use database::{Database, MongoAccountStore, MongoHospitalDirectory};
use hospitals::{HospitalDirectory, MemoryHospitalDirectory};
use i18n::{Locale, LocaleStore};
use storage::{FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the console on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("medibot=info,mongodb=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting MediBot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    let storage: Arc<dyn KeyValueStore> = match &config.storage_path {
        Some(path) => {
            let store = FileStore::open(path);
            info!("Preferences stored at {}", store.path().display());
            Arc::new(store)
        }
        None => {
            warn!("No data directory found, language choice will not be saved");
            Arc::new(MemoryStore::new())
        }
    };

    let locale = LocaleStore::load(storage);
    for language in Locale::ALL {
        let missing = locale.catalog().missing_keys(language);
        if !missing.is_empty() {
            debug!("{} falls back to English for {} keys", language, missing.len());
        }
    }

    let (provider, hospitals) = match &config.mongodb_uri {
        Some(uri) => {
            info!("Connecting to MongoDB...");
            let db = Database::connect(uri, &config.mongodb_database).await?;
            let cache = CacheRegistry::new();

            let accounts = MongoAccountStore::new(&db, &cache)?;
            if let Err(e) = accounts.ensure_indexes().await {
                warn!("Could not ensure account indexes: {}", e);
            }
            let provider: Arc<dyn IdentityProvider> =
                Arc::new(AccountIdentityProvider::new(accounts));
            let hospitals: Arc<dyn HospitalDirectory> =
                Arc::new(MongoHospitalDirectory::new(&db, &cache)?);
            info!("Database connected, caches: {:?}", cache.cache_names());
            (provider, hospitals)
        }
        None => {
            let directory = MemoryHospitalDirectory::with_samples();
            if directory.is_empty() {
                warn!("No bundled hospitals loaded, the hospital finder will be empty");
            }
            info!(
                "MONGODB_URI not set, running offline with {} sample hospitals",
                directory.len()
            );
            let provider: Arc<dyn IdentityProvider> =
                Arc::new(AccountIdentityProvider::new(MemoryAccountStore::new()));
            let hospitals: Arc<dyn HospitalDirectory> = Arc::new(directory);
            (provider, hospitals)
        }
    };

    let chat = ChatSession::new(locale.clone(), ResponseSelector::default(), config.reply_delay);
    let auth = AuthService::new(provider);
    let limits = HospitalLimits {
        search: config.search_limit,
        initial: config.initial_hospitals,
    };

    let mut console = Console::new(locale, chat, auth, hospitals, limits, tokio::io::stdout());
    console.run(BufReader::new(tokio::io::stdin())).await?;

    info!("MediBot stopped");
    Ok(())
}
