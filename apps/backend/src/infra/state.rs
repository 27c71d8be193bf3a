use std::sync::Arc;

use actix::Actor;

use crate::config::GameConfig;
use crate::domain::random::TurnRng;
use crate::error::AppError;
use crate::services::director::GameDirector;
use crate::state::app_state::AppState;
use crate::ws::hub::ObserverRegistry;

/// Builder for creating AppState instances (used in both tests and main).
///
/// `build` starts the director actor, so it must run inside an actix system.
#[derive(Default)]
pub struct StateBuilder {
    config: Option<GameConfig>,
    rng: Option<Box<dyn TurnRng>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_rng(mut self, rng: Box<dyn TurnRng>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let config = match self.config {
            Some(config) => config,
            None => GameConfig::from_env()?,
        };
        let hub = Arc::new(ObserverRegistry::new());
        let director = match self.rng {
            Some(rng) => GameDirector::with_rng(config.clone(), rng, hub.clone()),
            None => GameDirector::new(config.clone(), hub.clone()),
        };
        Ok(AppState::new(director.start(), hub, config))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
