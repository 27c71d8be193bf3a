//! Immutable views handed to the transport and presentation layers.

use serde::Serialize;

use crate::domain::outcome::GameSummary;
use crate::domain::state::{Agent, AgentId, Phase, Session};
use crate::domain::utterance::Utterance;

/// Agent as the browser renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentView {
    pub id: AgentId,
    pub state: Utterance,
    pub is_user: bool,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            state: agent.utterance,
            is_user: agent.is_human,
        }
    }
}

/// Payload of the `state_update` event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateUpdate {
    pub agents: Vec<AgentView>,
    pub round: u32,
}

impl StateUpdate {
    pub fn of(session: &Session) -> Self {
        Self {
            agents: session.agents().iter().map(AgentView::from).collect(),
            round: session.round(),
        }
    }
}

/// Full public state, for late joiners and the REST query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub agents: Vec<AgentView>,
    pub round: u32,
    pub phase: Phase,
    pub current_speaker: AgentId,
    pub previous_speaker: Option<AgentId>,
    pub hard_mode: bool,
    pub human_index: Option<AgentId>,
    /// Unix epoch milliseconds.
    pub started_at_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<GameSummary>,
}

pub fn snapshot(session: &Session) -> SessionSnapshot {
    SessionSnapshot {
        agents: session.agents().iter().map(AgentView::from).collect(),
        round: session.round(),
        phase: session.phase(),
        current_speaker: session.current_speaker(),
        previous_speaker: session.previous_speaker(),
        hard_mode: session.hard_mode(),
        human_index: session.human_index(),
        started_at_ms: (session.started_at().unix_timestamp_nanos() / 1_000_000) as i64,
        game_over: session.summary().cloned(),
    }
}
