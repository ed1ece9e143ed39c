//! Current-session holder.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use super::{AuthError, IdentityProvider, Profile, Session, validate_credentials};

/// Owns the client's session and publishes every change.
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    session: Arc<watch::Sender<Option<Session>>>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            provider,
            session: Arc::new(session),
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    /// Receiver that observes every session change.
    pub fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    /// # Errors
    /// [`AuthError::Validation`] for malformed input, otherwise whatever the
    /// provider reports.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        validate_credentials(email, password).map_err(AuthError::Validation)?;
        let session = self.provider.sign_in_with_password(email, password).await?;
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// # Errors
    /// [`AuthError::Validation`] for malformed input, otherwise whatever the
    /// provider reports.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: Profile,
    ) -> Result<Session, AuthError> {
        validate_credentials(email, password).map_err(AuthError::Validation)?;
        let session = self.provider.sign_up(email, password, profile).await?;
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    pub fn sign_out(&self) {
        if let Some(previous) = self.session.send_replace(None) {
            info!("User {} signed out", previous.user_id);
        }
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("session", &self.current_session().map(|s| s.user_id))
            .finish()
    }
}
