use actix::prelude::*;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::snapshot::SessionSnapshot;
use crate::services::events::GameEvent;

/// Connected observers plus the last published session snapshot.
///
/// The director is the only broadcaster; each recipient's mailbox preserves
/// send order, so every observer sees the same event sequence.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: DashMap<Uuid, Recipient<GameEvent>>,
    latest: RwLock<Option<SessionSnapshot>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, recipient: Recipient<GameEvent>) -> Uuid {
        let token = Uuid::new_v4();
        self.observers.insert(token, recipient);
        debug!(conn_id = %token, total = self.observers.len(), "observer registered");
        token
    }

    pub fn unregister(&self, token: Uuid) {
        if self.observers.remove(&token).is_some() {
            debug!(conn_id = %token, total = self.observers.len(), "observer unregistered");
        }
    }

    pub fn broadcast(&self, event: &GameEvent) {
        for recipient in self.observers.iter() {
            recipient.value().do_send(event.clone());
        }
    }

    pub fn active_connections_count(&self) -> usize {
        self.observers.len()
    }

    pub fn latest_snapshot(&self) -> Option<SessionSnapshot> {
        self.latest.read().clone()
    }

    pub fn publish_snapshot(&self, snapshot: Option<SessionSnapshot>) {
        *self.latest.write() = snapshot;
    }

    /// Whether a session exists and has not ended.
    pub fn session_active(&self) -> bool {
        self.latest
            .read()
            .as_ref()
            .is_some_and(|s| s.game_over.is_none())
    }
}
