use std::sync::Arc;

use crate::config::Settings;
use crate::proxy::ResourceProxy;
use crate::session::SessionStore;
use crate::upstream::{ClasseVivaConnector, ClientHandle, UpstreamConnector};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore<ClientHandle>>,
    pub connector: Arc<dyn UpstreamConnector>,
    pub proxy: ResourceProxy,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings, connector: Arc<dyn UpstreamConnector>) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(settings.session_ttl())),
            connector,
            proxy: ResourceProxy::new(settings.upstream_timeout()),
            settings: Arc::new(settings),
        }
    }

    /// State wired to the real ClasseViva upstream.
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        let connector = ClasseVivaConnector::new(settings.client_config())?;
        Ok(Self::new(settings, Arc::new(connector)))
    }
}
