//! Turn scheduler: drives the engine from timer fires and human input.
//!
//! The scheduler owns the single live session and decides which events
//! observers see and which delay to arm next. It never sleeps or spawns;
//! the director actor turns each [`TimerRequest`] into a real timer and
//! feeds the fire back through [`Scheduler::on_timer`]. Every request
//! carries a fresh token, and only the most recent token is honored, so a
//! fire that belongs to a replaced or ended session does nothing.

use std::time::Duration;

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::domain::engine::{self, TurnOutcome};
use crate::domain::nomination;
use crate::domain::outcome::GameOverReason;
use crate::domain::random::TurnRng;
use crate::domain::snapshot::{self, SessionSnapshot, StateUpdate};
use crate::domain::state::{self as game_state, AgentId, Phase, Session};
use crate::domain::utterance::Utterance;
use crate::errors::domain::{DomainError, ProtocolKind};
use crate::services::events::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Resolve the current speaker's round.
    Reveal,
    /// Nominate the next speaker.
    Think,
    /// End the game if the human still has not answered.
    HumanDeadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub token: u64,
    pub kind: TimerKind,
    pub delay: Duration,
}

/// What one scheduler call produced.
#[derive(Debug, Default)]
pub struct Step {
    /// Events in broadcast order.
    pub events: Vec<GameEvent>,
    /// Timer to arm; any earlier timer is superseded either way.
    pub timer: Option<TimerRequest>,
    /// Set when the human's input itself was refused.
    pub rejection: Option<DomainError>,
}

impl Step {
    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.timer.is_none() && self.rejection.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartRequest {
    pub participants: usize,
    pub hard: bool,
    /// Overrides the configured human slot default.
    pub human: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanChoice {
    pub token: Utterance,
    pub nominate: Option<AgentId>,
}

pub struct Scheduler {
    config: GameConfig,
    rng: Box<dyn TurnRng>,
    session: Option<Session>,
    pending: Option<TimerRequest>,
    next_token: u64,
}

impl Scheduler {
    pub fn new(config: GameConfig, rng: Box<dyn TurnRng>) -> Self {
        Self {
            config,
            rng,
            session: None,
            pending: None,
            next_token: 0,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(snapshot::snapshot)
    }

    pub fn pending_timer(&self) -> Option<TimerRequest> {
        self.pending
    }

    /// Replace any session with a fresh one and arm the first reveal. A
    /// session that is still running ends first, so its `GameOver` precedes
    /// the new session's first `StateUpdate`.
    pub fn start(&mut self, request: StartRequest, now: OffsetDateTime) -> Result<Step, DomainError> {
        let with_human = request.human.unwrap_or(self.config.human_seat);
        let session = game_state::initialize(
            request.participants,
            request.hard,
            with_human,
            self.rng.as_mut(),
            now,
        )?;

        let mut step = Step::default();
        if let Some(old) = self.session.as_mut().filter(|s| !s.is_over()) {
            info!(round = old.round(), "replacing running session");
            let summary = engine::end_game(old, GameOverReason::SessionReplaced, now);
            step.push(GameEvent::GameOver(summary));
        }
        info!(
            participants = session.len(),
            hard = session.hard_mode(),
            human = ?session.human_index(),
            speaker = session.current_speaker(),
            "session started"
        );

        step.push(GameEvent::StateUpdate(StateUpdate::of(&session)));
        self.session = Some(session);
        step.timer = Some(self.arm(TimerKind::Reveal, self.config.reveal_delay));
        Ok(step)
    }

    /// Handle a timer fire. Stale tokens and ended sessions yield an empty step.
    pub fn on_timer(&mut self, token: u64, now: OffsetDateTime) -> Step {
        let Some(pending) = self.pending.filter(|p| p.token == token) else {
            debug!(token, "dropping stale timer");
            return Step::default();
        };
        self.pending = None;

        let Some(session) = self.session.as_mut().filter(|s| !s.is_over()) else {
            debug!(token, "timer fired after game over");
            return Step::default();
        };

        match pending.kind {
            TimerKind::Reveal => {
                let speaker = session.current_speaker();
                let outcome = engine::resolve_turn(session, speaker, now);
                self.after_outcome(outcome)
            }
            TimerKind::Think => {
                let nomination = nomination::nominate(session, self.rng.as_mut());
                debug!(previous = nomination.previous, next = nomination.next, "nominated");
                let mut step = Step::default();
                step.push(GameEvent::NextSpeaker(nomination));
                step.timer = Some(self.arm(TimerKind::Reveal, self.config.reveal_delay));
                step
            }
            TimerKind::HumanDeadline => {
                let mut step = Step::default();
                if session.phase() == Phase::AwaitingHuman {
                    let summary =
                        engine::end_game(session, GameOverReason::HumanTimedOut, now);
                    step.push(GameEvent::GameOver(summary));
                }
                step
            }
        }
    }

    /// Fold the human's choice into the suspended round.
    pub fn human_choice(
        &mut self,
        choice: HumanChoice,
        now: OffsetDateTime,
    ) -> Result<Step, DomainError> {
        let policy = self.config.choice_policy;
        let session = self.live_session_mut()?;
        let outcome =
            engine::apply_human_choice(session, choice.token, choice.nominate, policy, now);
        self.pending = None;

        match outcome {
            TurnOutcome::Resolved { .. } => {
                let mut step = Step::default();
                let Some(session) = self.session.as_mut() else {
                    return Ok(step);
                };
                step.push(GameEvent::StateUpdate(StateUpdate::of(session)));
                match choice.nominate {
                    Some(next) => {
                        let nomination = nomination::assign(session, next);
                        step.push(GameEvent::NextSpeaker(nomination));
                        step.timer = Some(self.arm(TimerKind::Reveal, self.config.reveal_delay));
                    }
                    None => {
                        let delay = self.config.think_delay_for(session.hard_mode());
                        step.timer = Some(self.arm(TimerKind::Think, delay));
                    }
                }
                Ok(step)
            }
            other => Ok(self.after_outcome(other)),
        }
    }

    /// End the session on request.
    pub fn stop(&mut self, now: OffsetDateTime) -> Result<Step, DomainError> {
        let session = self.live_session_mut()?;
        let summary = engine::stop(session, now)?;
        self.pending = None;
        let mut step = Step::default();
        step.push(GameEvent::GameOver(summary));
        Ok(step)
    }

    fn live_session_mut(&mut self) -> Result<&mut Session, DomainError> {
        match self.session.as_mut() {
            None => Err(DomainError::NoSession),
            Some(s) if s.is_over() => Err(DomainError::protocol(
                ProtocolKind::GameOver,
                "session has already ended",
            )),
            Some(s) => Ok(s),
        }
    }

    fn after_outcome(&mut self, outcome: TurnOutcome) -> Step {
        let mut step = Step::default();
        match outcome {
            TurnOutcome::Resolved { .. } => {
                let Some(session) = self.session.as_ref() else {
                    return step;
                };
                step.push(GameEvent::StateUpdate(StateUpdate::of(session)));
                let delay = self.config.think_delay_for(session.hard_mode());
                step.timer = Some(self.arm(TimerKind::Think, delay));
            }
            TurnOutcome::AwaitingHuman { speaker } => {
                step.push(GameEvent::AwaitingHuman {
                    speaker_index: speaker,
                });
                if let Some(timeout) = self.config.human_timeout {
                    step.timer = Some(self.arm(TimerKind::HumanDeadline, timeout));
                }
            }
            TurnOutcome::Ended(summary) => {
                step.push(GameEvent::GameOver(summary));
            }
            TurnOutcome::Rejected { summary, cause } => {
                step.push(GameEvent::GameOver(summary));
                step.rejection = Some(cause);
            }
            TurnOutcome::Ignored => {}
        }
        step
    }

    fn arm(&mut self, kind: TimerKind, delay: Duration) -> TimerRequest {
        self.next_token += 1;
        let request = TimerRequest {
            token: self.next_token,
            kind,
            delay,
        };
        self.pending = Some(request);
        request
    }
}
