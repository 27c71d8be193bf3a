use std::time::Duration;

use sechack_backend::config::GameConfig;
use sechack_backend::domain::nomination::Nomination;
use sechack_backend::domain::utterance::Utterance;
use sechack_backend::services::events::GameEvent;
use sechack_backend::services::scheduler::TimerKind;

use super::{autonomous, fire, scheduler, states, NOW};

#[test]
fn start_broadcasts_blank_ring_and_arms_reveal() {
    let mut s = scheduler(GameConfig::default(), [2]);
    let step = s.start(autonomous(4), NOW).unwrap();

    assert_eq!(step.events.len(), 1);
    assert_eq!(states(&step.events[0]), vec![Utterance::None; 4]);
    let timer = step.timer.expect("reveal armed");
    assert_eq!(timer.kind, TimerKind::Reveal);
    assert_eq!(timer.delay, Duration::from_millis(500));
    assert_eq!(s.session().unwrap().current_speaker(), 2);
}

#[test]
fn reveal_then_think_alternates_tokens() {
    // Speaker 0, then nominees 2, 1, 3 (each draw avoids current/previous).
    let mut s = scheduler(GameConfig::default(), [0, 2, 1, 3]);
    s.start(autonomous(4), NOW).unwrap();

    let step = fire(&mut s, TimerKind::Reveal);
    assert_eq!(
        states(&step.events[0]),
        vec![Utterance::Sec, Utterance::None, Utterance::None, Utterance::None]
    );
    assert_eq!(step.timer.unwrap().delay, Duration::from_millis(2000));

    let step = fire(&mut s, TimerKind::Think);
    assert_eq!(
        step.events,
        vec![GameEvent::NextSpeaker(Nomination {
            previous: 0,
            next: 2
        })]
    );

    let step = fire(&mut s, TimerKind::Reveal);
    assert_eq!(
        states(&step.events[0]),
        vec![Utterance::None, Utterance::I365, Utterance::Hack, Utterance::I365]
    );

    fire(&mut s, TimerKind::Think);
    let step = fire(&mut s, TimerKind::Reveal);
    assert_eq!(
        states(&step.events[0]),
        vec![Utterance::None, Utterance::Sec, Utterance::None, Utterance::None]
    );
    assert_eq!(s.session().unwrap().round(), 3);
}

#[test]
fn autonomous_ring_runs_until_stopped() {
    let mut s = scheduler(GameConfig::default(), [0]);
    s.start(autonomous(7), NOW).unwrap();

    for round in 1..=20u32 {
        let step = fire(&mut s, TimerKind::Reveal);
        match &step.events[..] {
            [GameEvent::StateUpdate(update)] => assert_eq!(update.round, round),
            other => panic!("round {round}: unexpected events {other:?}"),
        }
        fire(&mut s, TimerKind::Think);
    }

    assert!(!s.session().unwrap().is_over());
}

#[test]
fn hard_mode_shortens_the_think_delay() {
    let mut s = scheduler(GameConfig::default(), [1]);
    let mut request = autonomous(5);
    request.hard = true;
    s.start(request, NOW).unwrap();

    let step = fire(&mut s, TimerKind::Reveal);
    assert_eq!(step.timer.unwrap().delay, Duration::from_millis(1000));
}

#[test]
fn stale_timer_from_replaced_session_is_ignored() {
    let mut s = scheduler(GameConfig::default(), [0, 1]);
    let first = s.start(autonomous(4), NOW).unwrap().timer.unwrap();
    let second = s.start(autonomous(4), NOW).unwrap().timer.unwrap();
    assert_ne!(first.token, second.token);

    let step = s.on_timer(first.token, NOW);
    assert!(step.is_empty());
    assert_eq!(s.session().unwrap().round(), 0);
    assert_eq!(s.pending_timer(), Some(second));
}
