//! Session manager: login, resume, logout, and per-request resolution.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use campana_auth::{LoginError, Viewer};
use campana_backend::{AccessSession, AuthApi, AuthApiError, Backend, Query};
use campana_domain::Profile;

use crate::state::{CurrentUser, SessionState};

const PROFILES_TABLE: &str = "profiles";

/// Session-level failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Sign-in was rejected or never reached the service.
    #[error("{0}")]
    Login(LoginError),

    /// The session authenticated but its profile could not be resolved.
    /// Fatal to the session: the caller is signed out.
    #[error("profile resolution failed: {0}")]
    Profile(String),
}

impl SessionError {
    /// The Spanish copy shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::Login(err) => err.user_message(),
            SessionError::Profile(_) => {
                "Tu perfil no está disponible. Contacta al administrador de la campaña."
            }
        }
    }
}

/// Owns one session lifecycle against the hosted backend.
///
/// State changes are published on a watch channel so observers (handlers,
/// background work) always see the latest resolved state and never a
/// half-authenticated one.
pub struct SessionManager<B: ?Sized> {
    backend: Arc<B>,
    state: watch::Sender<SessionState>,
}

impl<B> SessionManager<B>
where
    B: Backend + AuthApi + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self { backend, state }
    }

    /// Current state, resolved. `Loading` only before `initialize`.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Resolve the stored session (if any) and leave `Loading`.
    ///
    /// A token whose profile cannot be resolved is signed out rather than
    /// surfaced as an authenticated-but-roleless session.
    pub async fn initialize(&self, stored_token: Option<&str>) -> SessionState {
        let next = match stored_token {
            None => SessionState::Anonymous,
            Some(token) => match self.resolve_token(token).await {
                Ok(user) => SessionState::Authenticated(user),
                Err(err) => {
                    tracing::info!(error = %err, "stored session could not be resumed");
                    self.backend.sign_out(token).await.ok();
                    SessionState::Anonymous
                }
            },
        };
        self.state.send_replace(next.clone());
        next
    }

    /// Authenticate with credentials.
    ///
    /// Never retried. The state only becomes `Authenticated` once the profile
    /// (and therefore the role) is resolved; any profile failure signs the
    /// fresh session out again.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser, SessionError> {
        let session = match self.backend.sign_in(email, password).await {
            Ok(session) => session,
            Err(err) => {
                let login_err = classify_auth_error(err);
                tracing::info!(error = %login_err, "sign-in failed");
                self.state.send_replace(SessionState::Anonymous);
                return Err(SessionError::Login(login_err));
            }
        };

        match self.resolve_profile(&session).await {
            Ok(user) => {
                self.state
                    .send_replace(SessionState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile resolution failed; signing out");
                self.backend.sign_out(&session.access_token).await.ok();
                self.state.send_replace(SessionState::Anonymous);
                Err(err)
            }
        }
    }

    /// Best-effort backend sign-out; the local state always drops to
    /// `Anonymous`.
    pub async fn logout(&self) {
        if let SessionState::Authenticated(user) = self.state() {
            self.backend.sign_out(&user.session.access_token).await.ok();
        }
        self.state.send_replace(SessionState::Anonymous);
    }

    /// Invalidate one bearer token (request-scoped logout). The lifecycle
    /// state is untouched.
    pub async fn revoke(&self, token: &str) {
        self.backend.sign_out(token).await.ok();
    }

    /// Request-scoped resolution of a bearer token. Does not touch the
    /// lifecycle state; the same profile invariant applies.
    pub async fn resolve_token(&self, token: &str) -> Result<CurrentUser, SessionError> {
        let user_id = self
            .backend
            .user_for_token(token)
            .await
            .map_err(|err| SessionError::Login(classify_auth_error(err)))?;
        self.resolve_profile(&AccessSession {
            access_token: token.to_string(),
            user_id,
        })
        .await
    }

    async fn resolve_profile(
        &self,
        session: &AccessSession,
    ) -> Result<CurrentUser, SessionError> {
        let query = Query::unscoped()
            .and_eq("id", session.user_id.to_string())
            .limit(1);
        let rows = self
            .backend
            .select(PROFILES_TABLE, &query)
            .await
            .map_err(|err| SessionError::Profile(err.to_string()))?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| SessionError::Profile("profile not found".to_string()))?;

        // An unknown role string fails the deserialization and therefore the
        // whole resolution; there is no roleless fallback.
        let profile: Profile = serde_json::from_value(row)
            .map_err(|err| SessionError::Profile(err.to_string()))?;

        Ok(CurrentUser {
            viewer: Viewer::new(profile.id, profile.role),
            display_name: profile.display_name,
            session: session.clone(),
        })
    }
}

fn classify_auth_error(err: AuthApiError) -> LoginError {
    match err {
        AuthApiError::Rejected(message) => LoginError::from_backend_message(&message),
        AuthApiError::InvalidSession => LoginError::InvalidCredentials,
        AuthApiError::Transport(message) => LoginError::Other(message),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use campana_auth::Role;
    use campana_backend::MemoryBackend;
    use campana_core::ProfileId;

    use super::*;

    fn seed_profile(backend: &MemoryBackend, id: ProfileId, name: &str, role: &str) {
        backend.seed_row(
            PROFILES_TABLE,
            json!({
                "id": id.to_string(),
                "display_name": name,
                "role": role,
                "created_by": null,
                "created_at": "2025-03-01T12:00:00Z",
            }),
        );
    }

    fn manager_with_user(role: &str) -> (SessionManager<MemoryBackend>, ProfileId) {
        let backend = MemoryBackend::new();
        let user_id = ProfileId::new();
        backend.register_user("ana@campana.co", "secret", user_id);
        seed_profile(&backend, user_id, "Ana Rivera", role);
        (SessionManager::new(Arc::new(backend)), user_id)
    }

    #[tokio::test]
    async fn initialize_without_a_token_is_anonymous() {
        let (manager, _) = manager_with_user("candidato");
        assert_eq!(manager.state(), SessionState::Loading);
        assert_eq!(manager.initialize(None).await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn login_resolves_the_profile_before_authenticating() {
        let (manager, user_id) = manager_with_user("candidato");
        manager.initialize(None).await;

        let user = manager.login("ana@campana.co", "secret").await.unwrap();
        assert_eq!(user.viewer.id, user_id);
        assert_eq!(user.viewer.role, Role::Candidato);
        assert_eq!(user.display_name, "Ana Rivera");
        assert!(manager.state().is_authenticated());
    }

    #[tokio::test]
    async fn invalid_credentials_keep_the_session_anonymous() {
        let (manager, _) = manager_with_user("candidato");
        manager.initialize(None).await;

        let err = manager
            .login("ana@campana.co", "wrong")
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::Login(LoginError::InvalidCredentials));
        assert_eq!(
            err.user_message(),
            "Credenciales incorrectas. Verifica tu correo y contraseña."
        );
        assert_eq!(manager.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn missing_profile_forces_sign_out() {
        let backend = Arc::new(MemoryBackend::new());
        let user_id = ProfileId::new();
        backend.register_user("sin-perfil@campana.co", "secret", user_id);
        // No profile row seeded.
        let manager = SessionManager::new(Arc::clone(&backend));
        manager.initialize(None).await;

        let err = manager
            .login("sin-perfil@campana.co", "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Profile(_)));
        assert_eq!(manager.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn unknown_role_string_forces_sign_out() {
        let (manager, _) = manager_with_user("superadmin");
        manager.initialize(None).await;

        let err = manager.login("ana@campana.co", "secret").await.unwrap_err();
        assert!(matches!(err, SessionError::Profile(_)));
        assert_eq!(manager.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn a_resumed_token_restores_the_authenticated_state() {
        let backend = Arc::new(MemoryBackend::new());
        let user_id = ProfileId::new();
        backend.register_user("ana@campana.co", "secret", user_id);
        seed_profile(&backend, user_id, "Ana Rivera", "master");

        let manager = SessionManager::new(Arc::clone(&backend));
        let user = manager.login("ana@campana.co", "secret").await.unwrap();

        let resumed = SessionManager::new(Arc::clone(&backend));
        let state = resumed
            .initialize(Some(&user.session.access_token))
            .await;
        assert!(state.is_authenticated());
        assert_eq!(state.viewer().unwrap().role, Role::Master);
    }

    #[tokio::test]
    async fn logout_returns_to_anonymous_and_invalidates_the_token() {
        let (manager, _) = manager_with_user("votante");
        let user = manager.login("ana@campana.co", "secret").await.unwrap();
        let token = user.session.access_token.clone();

        manager.logout().await;
        assert_eq!(manager.state(), SessionState::Anonymous);
        assert!(manager.resolve_token(&token).await.is_err());
    }

    #[tokio::test]
    async fn state_changes_are_published_to_subscribers() {
        let (manager, _) = manager_with_user("lider");
        let mut rx = manager.subscribe();
        assert_eq!(*rx.borrow(), SessionState::Loading);

        manager.initialize(None).await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), SessionState::Anonymous);

        manager.login("ana@campana.co", "secret").await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_authenticated());
    }
}
