//! Turn engine: resolves exactly one round for a given speaker.
//!
//! The engine is synchronous and never schedules anything. It mutates the
//! session and reports what happened; the scheduler decides what observers
//! are told and which timer to arm next.

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::nomination::validate_nominee;
use crate::domain::outcome::{GameOverReason, GameSummary};
use crate::domain::rules::{expected_utterance, judge_utterance};
use crate::domain::state::{neighbors, AgentId, Phase, Session};
use crate::domain::utterance::Utterance;
use crate::errors::domain::{DomainError, ProtocolKind};

/// Which tokens a human may submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HumanChoicePolicy {
    /// SEC or HACK only.
    #[default]
    Strict,
    /// SEC, HACK or 365. A 365 is accepted as input and then judged by the
    /// rules like any other token.
    Permissive,
}

impl HumanChoicePolicy {
    pub fn accepts(&self, token: Utterance) -> bool {
        match self {
            HumanChoicePolicy::Strict => token.is_speaking_token(),
            HumanChoicePolicy::Permissive => token != Utterance::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The speaker's token was applied.
    Resolved {
        speaker: AgentId,
        utterance: Utterance,
    },
    /// The speaker is the human; resolution is suspended.
    AwaitingHuman { speaker: AgentId },
    /// The round broke a rule and ended the game.
    Ended(GameSummary),
    /// The input itself was a protocol violation; the game ended.
    Rejected {
        summary: GameSummary,
        cause: DomainError,
    },
    /// Session already over; nothing changed.
    Ignored,
}

/// Resolve the round spoken by `speaker`.
pub fn resolve_turn(session: &mut Session, speaker: AgentId, now: OffsetDateTime) -> TurnOutcome {
    if session.is_over() || !session.contains(speaker) {
        return TurnOutcome::Ignored;
    }

    session.clear_utterances();
    session.round += 1;

    if session.is_human(speaker) {
        session.phase = Phase::AwaitingHuman;
        debug!(round = session.round, speaker, "awaiting human choice");
        return TurnOutcome::AwaitingHuman { speaker };
    }

    session.phase = Phase::Resolving;
    let token = expected_utterance(session.round);
    apply_utterance(session, speaker, token, now)
}

/// Fold the human's choice into the suspended round.
///
/// A choice that arrives while nobody is waiting, a token the policy does not
/// accept, or an invalid nominee all end the game as invalid human input.
pub fn apply_human_choice(
    session: &mut Session,
    choice: Utterance,
    nominee: Option<AgentId>,
    policy: HumanChoicePolicy,
    now: OffsetDateTime,
) -> TurnOutcome {
    if session.is_over() {
        return TurnOutcome::Ignored;
    }

    if session.phase != Phase::AwaitingHuman {
        return reject(
            session,
            DomainError::protocol(
                ProtocolKind::NotAwaitingHuman,
                format!("no human choice pending in phase {:?}", session.phase),
            ),
            now,
        );
    }

    if !policy.accepts(choice) {
        return reject(
            session,
            DomainError::protocol(
                ProtocolKind::InvalidChoice,
                format!("token '{choice}' is not accepted from the human"),
            ),
            now,
        );
    }

    if let Some(nominee) = nominee {
        if let Err(cause) = validate_nominee(session, nominee) {
            return reject(session, cause, now);
        }
    }

    session.phase = Phase::Resolving;
    let speaker = session.current_speaker;
    apply_utterance(session, speaker, choice, now)
}

/// End the game on an explicit stop request.
pub fn stop(session: &mut Session, now: OffsetDateTime) -> Result<GameSummary, DomainError> {
    if session.is_over() {
        return Err(DomainError::protocol(
            ProtocolKind::GameOver,
            "session has already ended",
        ));
    }
    Ok(end_game(session, GameOverReason::StoppedByParticipant, now))
}

/// Move to `GameOver` and record the summary. Idempotent: a session that is
/// already over keeps its first summary.
pub fn end_game(
    session: &mut Session,
    reason: GameOverReason,
    now: OffsetDateTime,
) -> GameSummary {
    if let Some(summary) = &session.summary {
        return summary.clone();
    }
    let summary = GameSummary {
        round: session.round,
        duration_seconds: session.elapsed_seconds(now),
        reason,
    };
    session.phase = Phase::GameOver;
    session.summary = Some(summary.clone());
    info!(
        round = summary.round,
        duration_seconds = summary.duration_seconds,
        reason = reason.message(),
        "game over"
    );
    summary
}

fn apply_utterance(
    session: &mut Session,
    speaker: AgentId,
    token: Utterance,
    now: OffsetDateTime,
) -> TurnOutcome {
    if let Err(reason) = judge_utterance(session.last_uttered, token, session.round) {
        return TurnOutcome::Ended(end_game(session, reason, now));
    }

    session.set_utterance(speaker, token);
    if token == Utterance::Hack {
        let (left, right) = neighbors(speaker, session.len());
        session.set_utterance(left, Utterance::I365);
        session.set_utterance(right, Utterance::I365);
    }
    session.last_uttered = Some(token);

    debug!(round = session.round, speaker, utterance = %token, "round resolved");
    TurnOutcome::Resolved {
        speaker,
        utterance: token,
    }
}

fn reject(session: &mut Session, cause: DomainError, now: OffsetDateTime) -> TurnOutcome {
    let summary = end_game(session, GameOverReason::InvalidHumanInput, now);
    TurnOutcome::Rejected { summary, cause }
}
