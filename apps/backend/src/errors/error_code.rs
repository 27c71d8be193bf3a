//! Error codes for the SEC/HACK backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses and websocket `error` frames.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Participant count outside 4..=10
    InvalidParticipantCount,
    /// Token not accepted for a human choice
    InvalidChoice,
    /// Nominee index not allowed
    InvalidNominee,
    /// Choice arrived while no human decision is pending
    NotAwaitingHuman,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Websocket client spoke an unsupported protocol or skipped `hello`
    BadProtocol,

    // Resource Not Found
    /// No session has been started
    SessionNotFound,
    /// General not found error
    NotFound,

    // Lifecycle Conflicts
    /// Session already reached game over
    SessionEnded,

    // System Errors
    /// Internal server error
    Internal,
    /// Internal server error (explicit problem code)
    InternalError,
    /// Configuration error
    ConfigError,
    /// Game director actor is not reachable
    DirectorUnavailable,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidParticipantCount => "INVALID_PARTICIPANT_COUNT",
            Self::InvalidChoice => "INVALID_CHOICE",
            Self::InvalidNominee => "INVALID_NOMINEE",
            Self::NotAwaitingHuman => "NOT_AWAITING_HUMAN",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::BadProtocol => "BAD_PROTOCOL",

            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::SessionEnded => "SESSION_ENDED",

            Self::Internal => "INTERNAL",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DirectorUnavailable => "DIRECTOR_UNAVAILABLE",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
