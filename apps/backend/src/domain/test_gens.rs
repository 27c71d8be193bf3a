//! Proptest generators for ring sizes, seeds and human tokens.

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::random::ScriptedRng;
use crate::domain::rules::{MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use crate::domain::state::{initialize, Session};
use crate::domain::utterance::Utterance;

pub fn participants() -> impl Strategy<Value = usize> {
    MIN_PARTICIPANTS..=MAX_PARTICIPANTS
}

pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Tokens a strict-policy human can submit.
pub fn speaking_token() -> impl Strategy<Value = Utterance> {
    prop_oneof![Just(Utterance::Sec), Just(Utterance::Hack)]
}

/// Ring size with an in-range human slot and initial speaker.
pub fn ring_with_seats() -> impl Strategy<Value = (usize, usize, usize)> {
    participants().prop_flat_map(|n| (Just(n), 0..n, 0..n))
}

/// Build a session with exact seat assignment.
pub fn session_with(n: usize, human: Option<usize>, speaker: usize) -> Session {
    let draws: Vec<usize> = human.into_iter().chain(Some(speaker)).collect();
    let mut rng = ScriptedRng::new(draws);
    match initialize(n, false, human.is_some(), &mut rng, OffsetDateTime::UNIX_EPOCH) {
        Ok(session) => session,
        Err(err) => panic!("test session for {n} agents: {err}"),
    }
}
