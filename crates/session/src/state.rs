//! Session lifecycle states.

use campana_auth::Viewer;
use campana_backend::AccessSession;

/// A fully resolved authenticated user: permission identity, display name,
/// and the backend session it rides on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub viewer: Viewer,
    pub display_name: String,
    pub session: AccessSession,
}

/// The session lifecycle. No state is terminal; a session can always fall
/// back to `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Startup: the stored session (if any) has not been checked yet.
    /// Privileged UI must not render in this state.
    #[default]
    Loading,
    Anonymous,
    Authenticated(CurrentUser),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Loading | SessionState::Anonymous => None,
        }
    }

    /// The viewer for permission decisions; `None` while loading or
    /// anonymous, so every filter and capability resolves fail-closed.
    pub fn viewer(&self) -> Option<&Viewer> {
        self.current_user().map(|user| &user.viewer)
    }
}
