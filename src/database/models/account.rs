//! User account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

/// A registered user (stored in `accounts` collection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable user identifier handed out in sessions.
    pub user_id: String,

    /// E-mail address, lowercased. Unique.
    pub email: String,

    /// Argon2id PHC string (salt and parameters included).
    pub password_hash: String,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub preferred_language: Locale,

    pub created_at: DateTime<Utc>,
}
