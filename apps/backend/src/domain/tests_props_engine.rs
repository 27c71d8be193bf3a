//! Property tests for the turn engine (pure domain).
//!
//! Properties tested:
//! - Initialization yields ids 0..N with at most one human
//! - Each resolved round advances the counter by exactly one
//! - Autonomous speakers always say the parity token and never lose
//! - HACK marks exactly the two ring neighbors with 365
//! - A human who repeats the previous token ends the game on that round

use proptest::prelude::*;
use time::OffsetDateTime;

use crate::domain::engine::{apply_human_choice, resolve_turn, HumanChoicePolicy, TurnOutcome};
use crate::domain::nomination::nominate;
use crate::domain::outcome::GameOverReason;
use crate::domain::random::SeededRng;
use crate::domain::rules::expected_utterance;
use crate::domain::state::{initialize, neighbors};
use crate::domain::test_gens::{participants, ring_with_seats, seed, session_with, speaking_token};
use crate::domain::test_prelude;
use crate::domain::utterance::Utterance;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: ring ids are contiguous and at most one agent is human
    #[test]
    fn prop_initialize_shapes_the_ring(
        n in participants(),
        seed in seed(),
        with_human in any::<bool>(),
    ) {
        let mut rng = SeededRng::new(Some(seed));
        let session = initialize(n, false, with_human, &mut rng, OffsetDateTime::UNIX_EPOCH)
            .expect("count is in range");

        let ids: Vec<u8> = session.agents().iter().map(|a| a.id).collect();
        let expected: Vec<u8> = (0..n as u8).collect();
        prop_assert_eq!(ids, expected);

        let humans = session.agents().iter().filter(|a| a.is_human).count();
        prop_assert_eq!(humans, usize::from(with_human));
        prop_assert!(session.contains(session.current_speaker()));
        prop_assert!(session.agents().iter().all(|a| a.utterance == Utterance::None));
    }

    /// Property: an all-autonomous game follows the parity schedule forever
    #[test]
    fn prop_autonomous_game_never_ends(
        n in participants(),
        seed in seed(),
        rounds in 1usize..40,
    ) {
        let mut rng = SeededRng::new(Some(seed));
        let mut session = initialize(n, false, false, &mut rng, OffsetDateTime::UNIX_EPOCH)
            .expect("count is in range");

        for r in 1..=rounds {
            if r > 1 {
                nominate(&mut session, &mut rng);
            }
            let speaker = session.current_speaker();
            let outcome = resolve_turn(&mut session, speaker, OffsetDateTime::UNIX_EPOCH);

            let token = expected_utterance(r as u32);
            prop_assert_eq!(outcome, TurnOutcome::Resolved { speaker, utterance: token });
            prop_assert_eq!(session.round(), r as u32);
            prop_assert!(!session.is_over());
        }
    }

    /// Property: HACK writes 365 to both neighbors and nothing else
    #[test]
    fn prop_hack_marks_exactly_the_neighbors(
        (n, first, speaker) in ring_with_seats(),
    ) {
        let mut session = session_with(n, None, first);
        resolve_turn(&mut session, first as u8, OffsetDateTime::UNIX_EPOCH);
        resolve_turn(&mut session, speaker as u8, OffsetDateTime::UNIX_EPOCH);

        let speaker = speaker as u8;
        let (left, right) = neighbors(speaker, n);
        for agent in session.agents() {
            let expected = if agent.id == speaker {
                Utterance::Hack
            } else if agent.id == left || agent.id == right {
                Utterance::I365
            } else {
                Utterance::None
            };
            prop_assert_eq!(agent.utterance, expected, "seat {}", agent.id);
        }
    }

    /// Property: the game ends on the first human mistake, with the repeat
    /// rule taking precedence over parity
    #[test]
    fn prop_human_mistakes_end_the_game(
        n in participants(),
        choices in prop::collection::vec(speaking_token(), 1..12),
    ) {
        // Human at seat 0 speaks every round.
        let mut session = session_with(n, Some(0), 0);
        let mut previous: Option<Utterance> = None;

        for (i, choice) in choices.iter().copied().enumerate() {
            let round = i as u32 + 1;
            prop_assert_eq!(
                resolve_turn(&mut session, 0, OffsetDateTime::UNIX_EPOCH),
                TurnOutcome::AwaitingHuman { speaker: 0 }
            );
            let outcome = apply_human_choice(
                &mut session,
                choice,
                None,
                HumanChoicePolicy::Strict,
                OffsetDateTime::UNIX_EPOCH,
            );

            let expected_reason = if previous == Some(choice) {
                Some(GameOverReason::RepeatedToken)
            } else if choice != expected_utterance(round) {
                Some(GameOverReason::WrongParity)
            } else {
                None
            };

            match (outcome, expected_reason) {
                (TurnOutcome::Ended(summary), Some(reason)) => {
                    prop_assert_eq!(summary.reason, reason);
                    prop_assert_eq!(summary.round, round);
                    prop_assert!(session.is_over());
                    prop_assert_eq!(
                        resolve_turn(&mut session, 0, OffsetDateTime::UNIX_EPOCH),
                        TurnOutcome::Ignored
                    );
                    return Ok(());
                }
                (TurnOutcome::Resolved { utterance, .. }, None) => {
                    prop_assert_eq!(utterance, choice);
                }
                (other, reason) => {
                    prop_assert!(false, "round {}: got {:?}, expected {:?}", round, other, reason);
                }
            }
            previous = Some(choice);
        }
    }
}
