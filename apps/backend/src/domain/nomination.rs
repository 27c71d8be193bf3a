//! Speaker hand-over: random nomination and human nominee checks.

use serde::Serialize;

use crate::domain::random::TurnRng;
use crate::domain::state::{AgentId, Session};
use crate::errors::domain::{DomainError, ProtocolKind};

/// Speaker hand-over announced to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Nomination {
    pub previous: AgentId,
    pub next: AgentId,
}

/// Draw the next speaker uniformly, resampling until the draw differs from
/// the current speaker and, once a history exists, the previous speaker.
pub fn draw_nominee(session: &Session, rng: &mut dyn TurnRng) -> AgentId {
    let len = session.len();
    let current = session.current_speaker();
    let previous = session.previous_speaker();
    loop {
        let draw = rng.index_below(len) as AgentId;
        if draw != current && Some(draw) != previous {
            return draw;
        }
    }
}

/// Randomly nominate and shift the speaker history.
pub fn nominate(session: &mut Session, rng: &mut dyn TurnRng) -> Nomination {
    let next = draw_nominee(session, rng);
    assign(session, next)
}

/// Human nominees follow the same exclusions as [`draw_nominee`]: on the
/// ring, not the human, and not the speaker who handed over to them.
pub fn validate_nominee(session: &Session, nominee: AgentId) -> Result<(), DomainError> {
    if !session.contains(nominee) {
        return Err(DomainError::protocol(
            ProtocolKind::InvalidNominee,
            format!("nominee {nominee} is not on a ring of {}", session.len()),
        ));
    }
    if nominee == session.current_speaker() {
        return Err(DomainError::protocol(
            ProtocolKind::InvalidNominee,
            "the speaker cannot nominate themselves",
        ));
    }
    if Some(nominee) == session.previous_speaker() {
        return Err(DomainError::protocol(
            ProtocolKind::InvalidNominee,
            format!("nominee {nominee} spoke just before the current speaker"),
        ));
    }
    Ok(())
}

/// Shift `previous ← current`, `current ← next`.
pub(crate) fn assign(session: &mut Session, next: AgentId) -> Nomination {
    let previous = session.current_speaker;
    session.previous_speaker = Some(previous);
    session.current_speaker = next;
    Nomination { previous, next }
}
