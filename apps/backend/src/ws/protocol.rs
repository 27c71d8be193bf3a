use serde::{Deserialize, Serialize};

use crate::domain::nomination::Nomination;
use crate::domain::outcome::GameOverReason;
use crate::domain::snapshot::{SessionSnapshot, StateUpdate};
use crate::domain::state::AgentId;
use crate::services::events::GameEvent;

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello {
        protocol: i32,
    },
    Start {
        participants: usize,
        #[serde(default)]
        hard: bool,
        #[serde(default)]
        human: Option<bool>,
    },
    /// `choice` stays a raw string so an unknown token reaches the game as
    /// invalid human input instead of failing to parse.
    HumanChoice {
        choice: String,
        #[serde(default)]
        nominate: Option<AgentId>,
    },
    Stop,
    Snapshot,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
    },

    StateUpdate(StateUpdate),

    AwaitingHuman {
        speaker_index: AgentId,
    },

    NextSpeaker(Nomination),

    GameOver {
        round: u32,
        duration_seconds: f64,
        reason: GameOverReason,
        message: &'static str,
    },

    Snapshot(SessionSnapshot),

    Error {
        code: &'static str,
        message: String,
    },
}

impl From<GameEvent> for ServerMsg {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::StateUpdate(update) => ServerMsg::StateUpdate(update),
            GameEvent::AwaitingHuman { speaker_index } => ServerMsg::AwaitingHuman { speaker_index },
            GameEvent::NextSpeaker(nomination) => ServerMsg::NextSpeaker(nomination),
            GameEvent::GameOver(summary) => ServerMsg::GameOver {
                round: summary.round,
                duration_seconds: summary.duration_seconds,
                reason: summary.reason,
                message: summary.reason.message(),
            },
        }
    }
}
