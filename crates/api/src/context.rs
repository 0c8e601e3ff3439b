//! Per-request session context.

use campana_ai::PromptContext;
use campana_auth::Viewer;
use campana_session::CurrentUser;

/// The resolved session for one request.
///
/// Inserted by the auth middleware only after profile resolution succeeded,
/// so a handler holding one of these always has a valid role to work with.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user: CurrentUser,
}

impl SessionContext {
    pub fn new(user: CurrentUser) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn viewer(&self) -> &Viewer {
        &self.user.viewer
    }

    pub fn prompt_context(&self, campaign_name: &str) -> PromptContext {
        PromptContext {
            display_name: self.user.display_name.clone(),
            role: self.user.viewer.role,
            campaign_name: campaign_name.to_string(),
        }
    }
}
