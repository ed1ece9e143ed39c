//! Identity and access.
//!
//! Accounts live in an external service reached through
//! [`IdentityProvider`]. [`AuthService`] keeps the current session and
//! broadcasts changes; [`chat_access`] decides whether the chat view may be
//! shown.

mod gate;
mod memory;
mod password;
mod provider;
mod service;
mod validation;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::database::{Account, DatabaseError};
use crate::i18n::Locale;

pub use gate::{ChatAccess, chat_access};
pub use memory::MemoryAccountStore;
pub use provider::AccountIdentityProvider;
pub use service::AuthService;
pub use validation::{FormErrors, validate_credentials};

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub preferred_language: Locale,
}

impl Session {
    pub(crate) fn from_account(account: &Account) -> Self {
        Self {
            user_id: account.user_id.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            preferred_language: account.preferred_language,
        }
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

/// Extra fields collected at sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub full_name: Option<String>,
    pub preferred_language: Locale,
}

/// Authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid form input")]
    Validation(FormErrors),

    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("an account with this e-mail already exists")]
    EmailTaken,

    #[error("password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),

    #[error(transparent)]
    Backend(#[from] DatabaseError),
}

/// Account persistence used by [`AccountIdentityProvider`].
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by lowercased e-mail.
    ///
    /// # Errors
    /// Returns an error if the backend query fails.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;

    /// Store a new account.
    ///
    /// # Errors
    /// [`AuthError::EmailTaken`] if the e-mail is registered already.
    async fn insert(&self, account: &Account) -> Result<(), AuthError>;
}

/// External identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    /// [`AuthError::InvalidCredentials`] on unknown e-mail or wrong password.
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> Result<Session, AuthError>;

    /// # Errors
    /// [`AuthError::EmailTaken`] if the e-mail is registered already.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<Session, AuthError>;
}
