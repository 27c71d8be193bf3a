//! Round parity, participant bounds and default pacing.

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::domain::outcome::GameOverReason;
use crate::domain::utterance::Utterance;
use crate::errors::domain::{ConfigurationKind, DomainError};

pub const MIN_PARTICIPANTS: usize = 4;
pub const MAX_PARTICIPANTS: usize = 10;

pub const REVEAL_DELAY: Duration = Duration::from_millis(500);
pub const THINK_DELAY: Duration = Duration::from_millis(2000);
pub const HARD_THINK_DELAY: Duration = Duration::from_millis(1000);

pub fn participant_range() -> RangeInclusive<usize> {
    MIN_PARTICIPANTS..=MAX_PARTICIPANTS
}

pub fn validate_participant_count(count: usize) -> Result<(), DomainError> {
    if participant_range().contains(&count) {
        Ok(())
    } else {
        Err(DomainError::configuration(
            ConfigurationKind::ParticipantCount,
            format!(
                "participant count must be between {MIN_PARTICIPANTS} and {MAX_PARTICIPANTS}, got {count}"
            ),
        ))
    }
}

/// Token the speaker of `round` must say. Rounds are 1-based.
///
/// Odd rounds → SEC, even rounds → HACK.
pub const fn expected_utterance(round: u32) -> Utterance {
    if round % 2 == 0 {
        Utterance::Hack
    } else {
        Utterance::Sec
    }
}

/// Judge a token actually uttered in `round`, given the token uttered in the
/// round before it (if any).
///
/// The repeat rule is checked first, so a human who repeats the previous
/// token is reported as a repeat even though the token is also off-parity.
pub fn judge_utterance(
    previous: Option<Utterance>,
    uttered: Utterance,
    round: u32,
) -> Result<(), GameOverReason> {
    if previous == Some(uttered) {
        return Err(GameOverReason::RepeatedToken);
    }
    if uttered != expected_utterance(round) {
        return Err(GameOverReason::WrongParity);
    }
    Ok(())
}
