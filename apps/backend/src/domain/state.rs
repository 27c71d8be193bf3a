//! Session data model: the agent ring, phase and speaker history.

use time::OffsetDateTime;

use crate::domain::outcome::GameSummary;
use crate::domain::random::TurnRng;
use crate::domain::rules::validate_participant_count;
use crate::domain::utterance::Utterance;
use crate::errors::domain::DomainError;

/// Ring position, `0..N`.
pub type AgentId = u8;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Created; the first turn has not been revealed yet.
    Idle,
    /// The human is speaking; no turn timers are armed.
    AwaitingHuman,
    /// Autonomous loop running (reveal or think delay pending).
    Resolving,
    /// Terminal. No further utterance or nomination.
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: AgentId,
    pub utterance: Utterance,
    pub is_human: bool,
}

/// One game. Created by [`initialize`], then mutated only by the turn
/// engine and the nomination policy.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) agents: Vec<Agent>,
    pub(crate) current_speaker: AgentId,
    /// `None` until the first nomination.
    pub(crate) previous_speaker: Option<AgentId>,
    /// Resolved rounds so far; the first resolved round is 1.
    pub(crate) round: u32,
    pub(crate) hard_mode: bool,
    pub(crate) phase: Phase,
    pub(crate) human_index: Option<AgentId>,
    pub(crate) started_at: OffsetDateTime,
    /// Speaking token of the most recent resolved round.
    pub(crate) last_uttered: Option<Utterance>,
    pub(crate) summary: Option<GameSummary>,
}

/// Build a fresh session.
///
/// Draw order from `rng`: the human slot first (only when `with_human`),
/// then the initial speaker.
pub fn initialize(
    participant_count: usize,
    hard_mode: bool,
    with_human: bool,
    rng: &mut dyn TurnRng,
    now: OffsetDateTime,
) -> Result<Session, DomainError> {
    validate_participant_count(participant_count)?;

    let human_index = with_human.then(|| rng.index_below(participant_count) as AgentId);
    let agents = (0..participant_count)
        .map(|i| Agent {
            id: i as AgentId,
            utterance: Utterance::None,
            is_human: human_index == Some(i as AgentId),
        })
        .collect();
    let current_speaker = rng.index_below(participant_count) as AgentId;

    Ok(Session {
        agents,
        current_speaker,
        previous_speaker: None,
        round: 0,
        hard_mode,
        phase: Phase::Idle,
        human_index,
        started_at: now,
        last_uttered: None,
        summary: None,
    })
}

impl Session {
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn current_speaker(&self) -> AgentId {
        self.current_speaker
    }

    pub fn previous_speaker(&self) -> Option<AgentId> {
        self.previous_speaker
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn human_index(&self) -> Option<AgentId> {
        self.human_index
    }

    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    pub fn last_uttered(&self) -> Option<Utterance> {
        self.last_uttered
    }

    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_human(&self, id: AgentId) -> bool {
        self.human_index == Some(id)
    }

    pub fn contains(&self, id: AgentId) -> bool {
        (id as usize) < self.agents.len()
    }

    pub fn utterance_of(&self, id: AgentId) -> Option<Utterance> {
        self.agents.get(id as usize).map(|a| a.utterance)
    }

    /// Seconds since `started_at`, never negative.
    pub fn elapsed_seconds(&self, now: OffsetDateTime) -> f64 {
        (now - self.started_at).as_seconds_f64().max(0.0)
    }

    pub(crate) fn clear_utterances(&mut self) {
        for agent in &mut self.agents {
            agent.utterance = Utterance::None;
        }
    }

    pub(crate) fn set_utterance(&mut self, id: AgentId, utterance: Utterance) {
        if let Some(agent) = self.agents.get_mut(id as usize) {
            agent.utterance = utterance;
        }
    }
}

/// Ring helpers. Clockwise is +1.
#[inline]
pub fn seat_offset(seat: AgentId, delta: i8, ring_len: usize) -> AgentId {
    let len = ring_len as i16;
    ((seat as i16 + delta as i16).rem_euclid(len)) as AgentId
}

/// Counter-clockwise and clockwise neighbors of `seat`.
#[inline]
pub fn neighbors(seat: AgentId, ring_len: usize) -> (AgentId, AgentId) {
    (
        seat_offset(seat, -1, ring_len),
        seat_offset(seat, 1, ring_len),
    )
}
