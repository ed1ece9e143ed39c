//! Password identity provider over an [`AccountStore`].

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::{AccountStore, AuthError, IdentityProvider, Profile, Session};
use crate::database::Account;

/// E-mail + password authentication.
#[derive(Debug)]
pub struct AccountIdentityProvider<S> {
    store: S,
}

impl<S: AccountStore> AccountIdentityProvider<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: AccountStore> IdentityProvider for AccountIdentityProvider<S> {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let email = email.trim().to_lowercase();
        let account = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash) {
            debug!("Wrong password for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        info!("User {} signed in", account.user_id);
        Ok(Session::from_account(&account))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<Session, AuthError> {
        let email = email.trim().to_lowercase();
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let account = Account {
            user_id: Uuid::new_v4().to_string(),
            password_hash: hash_password(password).map_err(AuthError::Hashing)?,
            email,
            full_name: profile
                .full_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            preferred_language: profile.preferred_language,
            created_at: Utc::now(),
        };
        self.store.insert(&account).await?;

        info!("Registered user {}", account.user_id);
        Ok(Session::from_account(&account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryAccountStore;
    use crate::i18n::Locale;

    fn provider() -> AccountIdentityProvider<MemoryAccountStore> {
        AccountIdentityProvider::new(MemoryAccountStore::new())
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let provider = provider();
        let profile = Profile {
            full_name: Some("  Asha Das ".to_string()),
            preferred_language: Locale::Or,
        };
        let created = provider.sign_up("Asha@Example.com", "secret1", profile).await.unwrap();
        assert_eq!(created.email, "asha@example.com");
        assert_eq!(created.full_name.as_deref(), Some("Asha Das"));
        assert_eq!(created.preferred_language, Locale::Or);

        let session = provider
            .sign_in_with_password("asha@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(session, created);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let provider = provider();
        provider
            .sign_up("asha@example.com", "secret1", Profile::default())
            .await
            .unwrap();

        assert!(matches!(
            provider.sign_in_with_password("asha@example.com", "secret2").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            provider.sign_in_with_password("ravi@example.com", "secret1").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let provider = provider();
        provider
            .sign_up("asha@example.com", "secret1", Profile::default())
            .await
            .unwrap();
        assert!(matches!(
            provider.sign_up("ASHA@example.com", "other12", Profile::default()).await,
            Err(AuthError::EmailTaken)
        ));
    }
}
