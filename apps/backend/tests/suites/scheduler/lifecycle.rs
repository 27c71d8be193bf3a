use sechack_backend::config::GameConfig;
use sechack_backend::domain::outcome::GameOverReason;
use sechack_backend::errors::domain::{ConfigurationKind, DomainError, ProtocolKind};
use sechack_backend::services::events::GameEvent;
use sechack_backend::services::scheduler::{StartRequest, TimerKind};

use super::{autonomous, fire, scheduler, NOW};

#[test]
fn out_of_range_count_creates_nothing() {
    let mut s = scheduler(GameConfig::default(), []);
    for participants in [3, 11] {
        assert!(matches!(
            s.start(autonomous(participants), NOW),
            Err(DomainError::Configuration(ConfigurationKind::ParticipantCount, _))
        ));
    }
    assert!(s.session().is_none());
    assert!(s.snapshot().is_none());
}

#[test]
fn configured_human_seat_can_be_overridden() {
    let config = GameConfig {
        human_seat: true,
        ..GameConfig::default()
    };
    let mut s = scheduler(config, [1, 2, 3]);

    let default = StartRequest {
        participants: 4,
        hard: false,
        human: None,
    };
    s.start(default, NOW).unwrap();
    assert_eq!(s.session().unwrap().human_index(), Some(1));

    s.start(autonomous(4), NOW).unwrap();
    assert_eq!(s.session().unwrap().human_index(), None);
}

#[test]
fn stop_ends_once_and_cancels_timers() {
    let mut s = scheduler(GameConfig::default(), [0]);
    s.start(autonomous(4), NOW).unwrap();
    fire(&mut s, TimerKind::Reveal);

    let step = s.stop(NOW).unwrap();
    assert!(matches!(
        &step.events[..],
        [GameEvent::GameOver(summary)]
            if summary.reason == GameOverReason::StoppedByParticipant && summary.round == 1
    ));
    assert_eq!(s.pending_timer(), None);
    assert!(matches!(
        s.stop(NOW),
        Err(DomainError::Protocol(ProtocolKind::GameOver, _))
    ));

    let snapshot = s.snapshot().unwrap();
    assert_eq!(
        snapshot.game_over.map(|g| g.reason),
        Some(GameOverReason::StoppedByParticipant)
    );
}

#[test]
fn commands_without_a_session_report_no_session() {
    let mut s = scheduler(GameConfig::default(), []);
    assert!(matches!(s.stop(NOW), Err(DomainError::NoSession)));
    assert!(s.on_timer(1, NOW).is_empty());
}

#[test]
fn restart_after_game_over_starts_fresh() {
    let mut s = scheduler(GameConfig::default(), [0, 1]);
    s.start(autonomous(4), NOW).unwrap();
    s.stop(NOW).unwrap();

    s.start(autonomous(6), NOW).unwrap();
    let session = s.session().unwrap();
    assert_eq!(session.len(), 6);
    assert_eq!(session.round(), 0);
    assert!(!session.is_over());
    assert_eq!(s.pending_timer().unwrap().kind, TimerKind::Reveal);
}

#[test]
fn replacing_a_running_session_ends_it_first() {
    let mut s = scheduler(GameConfig::default(), [0, 2]);
    s.start(autonomous(4), NOW).unwrap();
    fire(&mut s, TimerKind::Reveal);

    let step = s.start(autonomous(5), NOW).unwrap();

    match &step.events[..] {
        [GameEvent::GameOver(summary), GameEvent::StateUpdate(update)] => {
            assert_eq!(summary.reason, GameOverReason::SessionReplaced);
            assert_eq!(summary.round, 1);
            assert_eq!(update.round, 0);
            assert_eq!(update.agents.len(), 5);
        }
        other => panic!("expected game_over then state_update, got {other:?}"),
    }
    assert_eq!(s.session().unwrap().current_speaker(), 2);
}

#[test]
fn failed_restart_leaves_the_running_session_alone() {
    let mut s = scheduler(GameConfig::default(), [0]);
    s.start(autonomous(4), NOW).unwrap();
    let pending = s.pending_timer();

    assert!(s.start(autonomous(12), NOW).is_err());
    assert!(!s.session().unwrap().is_over());
    assert_eq!(s.pending_timer(), pending);
}
