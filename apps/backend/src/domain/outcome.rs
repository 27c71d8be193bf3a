//! How a session ends.

use serde::{Deserialize, Serialize};

/// Why a session reached `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// Same speaking token in two consecutive rounds.
    RepeatedToken,
    /// Token does not match the parity of the round.
    WrongParity,
    /// Choice arrived out of turn, with a rejected token, or a bad nominee.
    InvalidHumanInput,
    /// The human did not decide before the configured deadline.
    HumanTimedOut,
    /// Explicit stop request.
    StoppedByParticipant,
    /// A new `start` arrived while this session was still running.
    SessionReplaced,
}

impl GameOverReason {
    /// Text shown to observers in the `game_over` event.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::RepeatedToken => "consecutive repeat of the same token is illegal",
            Self::WrongParity => "token does not match round parity",
            Self::InvalidHumanInput => "invalid human input",
            Self::HumanTimedOut => "human decision timed out",
            Self::StoppedByParticipant => "stopped by participant",
            Self::SessionReplaced => "replaced by a new game",
        }
    }
}

/// Terminal summary, emitted exactly once per session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub round: u32,
    pub duration_seconds: f64,
    pub reason: GameOverReason,
}
