//! Property tests for random nomination.

use proptest::prelude::*;

use crate::domain::nomination::{nominate, Nomination};
use crate::domain::random::SeededRng;
use crate::domain::test_gens::{ring_with_seats, seed, session_with};
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: a nominee is never the current speaker nor, once a history
    /// exists, the previous one
    #[test]
    fn prop_nominee_excludes_current_and_previous(
        (n, _, speaker) in ring_with_seats(),
        seed in seed(),
        steps in 1usize..30,
    ) {
        let mut session = session_with(n, None, speaker);
        let mut rng = SeededRng::new(Some(seed));

        for _ in 0..steps {
            let current = session.current_speaker();
            let previous = session.previous_speaker();

            let Nomination { previous: handed_from, next } = nominate(&mut session, &mut rng);

            prop_assert_eq!(handed_from, current);
            prop_assert_ne!(next, current);
            prop_assert_ne!(Some(next), previous);
            prop_assert!(session.contains(next));
            prop_assert_eq!(session.current_speaker(), next);
            prop_assert_eq!(session.previous_speaker(), Some(current));
        }
    }
}
