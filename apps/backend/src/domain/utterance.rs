use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

/// What an agent is recorded as having said in the current round.
///
/// Wire strings follow the browser client: an agent with nothing to say
/// renders as `""`, and the neighbor token is the bare number `"365"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utterance {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "SEC")]
    Sec,
    #[serde(rename = "HACK")]
    Hack,
    #[serde(rename = "365")]
    I365,
}

impl Utterance {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Utterance::None => "",
            Utterance::Sec => "SEC",
            Utterance::Hack => "HACK",
            Utterance::I365 => "365",
        }
    }

    /// Tokens that advance the SEC/HACK alternation.
    pub const fn is_speaking_token(&self) -> bool {
        matches!(self, Utterance::Sec | Utterance::Hack)
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Utterance {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SEC" => Ok(Utterance::Sec),
            "HACK" => Ok(Utterance::Hack),
            "365" | "I365" => Ok(Utterance::I365),
            other => Err(DomainError::validation(format!(
                "unknown utterance token '{other}'"
            ))),
        }
    }
}
