// Unit tests for error mapping - pure domain logic without HTTP dependencies
use crate::errors::domain::{ConfigurationKind, DomainError, ProtocolKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_participant_count_to_400() {
    let de = DomainError::configuration(ConfigurationKind::ParticipantCount, "11 agents");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidParticipantCount);
    assert_eq!(app.status().as_u16(), 400);
    assert_eq!(app.detail(), "11 agents");
}

#[test]
fn maps_protocol_violations_to_409() {
    let cases = [
        (ProtocolKind::GameOver, "SESSION_ENDED"),
        (ProtocolKind::NotAwaitingHuman, "NOT_AWAITING_HUMAN"),
        (ProtocolKind::InvalidChoice, "INVALID_CHOICE"),
        (ProtocolKind::InvalidNominee, "INVALID_NOMINEE"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::protocol(kind, "nope").into();
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.status().as_u16(), 409);
    }
}

#[test]
fn maps_missing_session_to_404() {
    let app: AppError = DomainError::NoSession.into();
    assert_eq!(app.code(), ErrorCode::SessionNotFound);
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_validation_to_400() {
    let app: AppError = DomainError::validation("bad token").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn config_errors_are_internal() {
    let app = AppError::config("BACKEND_PORT must be a valid port number");
    assert_eq!(app.code(), ErrorCode::ConfigError);
    assert_eq!(app.status().as_u16(), 500);
}
