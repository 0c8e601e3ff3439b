//! Service wiring shared by every handler.

use std::sync::Arc;

use campana_access::DataAccess;
use campana_ai::AiGateway;
use campana_backend::{AuthApi, Backend};
use campana_session::SessionManager;

/// The store + identity surface the service runs on. The production backend
/// is the hosted REST service; tests swap in the in-memory twin.
pub trait ServiceBackend: Backend + AuthApi {}

impl<T: Backend + AuthApi> ServiceBackend for T {}

/// Everything a handler needs, built once at startup.
pub struct AppServices {
    pub session: SessionManager<dyn ServiceBackend>,
    pub data: DataAccess<dyn ServiceBackend>,
    pub ai: AiGateway,
    pub campaign_name: String,
}

impl AppServices {
    pub fn new(
        backend: Arc<dyn ServiceBackend>,
        ai: AiGateway,
        campaign_name: impl Into<String>,
    ) -> Self {
        Self {
            session: SessionManager::new(Arc::clone(&backend)),
            data: DataAccess::new(backend),
            ai,
            campaign_name: campaign_name.into(),
        }
    }
}
