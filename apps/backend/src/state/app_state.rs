use std::sync::Arc;

use actix::Addr;

use crate::config::GameConfig;
use crate::services::director::GameDirector;
use crate::ws::hub::ObserverRegistry;

/// Shared handles for request handlers and websocket sessions.
#[derive(Clone)]
pub struct AppState {
    /// Sole owner of the live session.
    pub director: Addr<GameDirector>,
    pub hub: Arc<ObserverRegistry>,
    pub config: GameConfig,
}

impl AppState {
    pub fn new(director: Addr<GameDirector>, hub: Arc<ObserverRegistry>, config: GameConfig) -> Self {
        Self {
            director,
            hub,
            config,
        }
    }

    pub fn hub(&self) -> Arc<ObserverRegistry> {
        self.hub.clone()
    }
}
