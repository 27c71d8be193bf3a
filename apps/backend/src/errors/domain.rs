//! Domain-level error type used by the engine, scheduler and director.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! Rule violations (a repeated or mis-parity token) are not errors: they end
//! the game through a normal `GameOverReason`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why a session could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationKind {
    ParticipantCount,
    Other(String),
}

/// Inbound events that arrived when the session could not accept them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProtocolKind {
    /// A choice arrived while nobody was waiting for one.
    NotAwaitingHuman,
    /// The submitted token is outside the accepted set.
    InvalidChoice,
    /// The human nominated themselves or an index outside the ring.
    InvalidNominee,
    /// The session has already reached its terminal phase.
    GameOver,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation (unparseable token, malformed payload)
    Validation(String),
    /// Session parameters outside the supported range
    Configuration(ConfigurationKind, String),
    /// Event arrived out of turn or for a finished session
    Protocol(ProtocolKind, String),
    /// No session has been started yet
    NoSession,
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::Configuration(kind, d) => write!(f, "configuration {kind:?}: {d}"),
            DomainError::Protocol(kind, d) => write!(f, "protocol {kind:?}: {d}"),
            DomainError::NoSession => write!(f, "no active session"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn configuration(kind: ConfigurationKind, detail: impl Into<String>) -> Self {
        Self::Configuration(kind, detail.into())
    }
    pub fn protocol(kind: ProtocolKind, detail: impl Into<String>) -> Self {
        Self::Protocol(kind, detail.into())
    }
}
