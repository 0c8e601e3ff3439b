//! The hosted backend's authentication surface.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use campana_core::ProfileId;

/// An authenticated backend session: the bearer token plus the identity it
/// belongs to. The token is opaque to this application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessSession {
    pub access_token: String,
    pub user_id: ProfileId,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthApiError {
    /// The service rejected the attempt; the message is the service's own
    /// wording, classified later by the login taxonomy.
    #[error("sign-in rejected: {0}")]
    Rejected(String),

    /// The bearer token does not map to a live session.
    #[error("invalid session")]
    InvalidSession,

    #[error("transport error: {0}")]
    Transport(String),
}

/// Sign-in/session operations against the hosted identity service.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<AccessSession, AuthApiError>;

    /// Resolve the identity behind a bearer token.
    async fn user_for_token(&self, token: &str) -> Result<ProfileId, AuthApiError>;

    /// Best-effort session teardown.
    async fn sign_out(&self, token: &str) -> Result<(), AuthApiError>;
}

#[async_trait]
impl<A> AuthApi for Arc<A>
where
    A: AuthApi + ?Sized,
{
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccessSession, AuthApiError> {
        (**self).sign_in(email, password).await
    }

    async fn user_for_token(&self, token: &str) -> Result<ProfileId, AuthApiError> {
        (**self).user_for_token(token).await
    }

    async fn sign_out(&self, token: &str) -> Result<(), AuthApiError> {
        (**self).sign_out(token).await
    }
}
