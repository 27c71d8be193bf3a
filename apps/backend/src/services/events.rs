use actix::Message;

use crate::domain::nomination::Nomination;
use crate::domain::outcome::GameSummary;
use crate::domain::snapshot::StateUpdate;
use crate::domain::state::AgentId;

/// Observer-facing notification. Every observer receives the same sequence.
#[derive(Message, Debug, Clone, PartialEq)]
#[rtype(result = "()")]
pub enum GameEvent {
    StateUpdate(StateUpdate),
    AwaitingHuman { speaker_index: AgentId },
    NextSpeaker(Nomination),
    GameOver(GameSummary),
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::StateUpdate(_) => "state_update",
            GameEvent::AwaitingHuman { .. } => "awaiting_human",
            GameEvent::NextSpeaker(_) => "next_speaker",
            GameEvent::GameOver(_) => "game_over",
        }
    }
}
