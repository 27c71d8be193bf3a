use std::env;
use std::time::Duration;

use crate::domain::engine::HumanChoicePolicy;
use crate::domain::rules::{HARD_THINK_DELAY, REVEAL_DELAY, THINK_DELAY};
use crate::error::AppError;

/// Tunables for the turn scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Pause before a speaker's token is revealed.
    pub reveal_delay: Duration,
    /// Pause between a resolved round and the next nomination.
    pub think_delay: Duration,
    /// Think pause used when the session runs in hard mode.
    pub hard_think_delay: Duration,
    /// Whether `start` assigns a human slot unless told otherwise.
    pub human_seat: bool,
    pub choice_policy: HumanChoicePolicy,
    /// `None` waits for the human indefinitely.
    pub human_timeout: Option<Duration>,
    /// `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reveal_delay: REVEAL_DELAY,
            think_delay: THINK_DELAY,
            hard_think_delay: HARD_THINK_DELAY,
            human_seat: true,
            choice_policy: HumanChoicePolicy::Strict,
            human_timeout: None,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Read `SECHACK_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            reveal_delay: millis_var("SECHACK_REVEAL_DELAY_MS")?.unwrap_or(defaults.reveal_delay),
            think_delay: millis_var("SECHACK_THINK_DELAY_MS")?.unwrap_or(defaults.think_delay),
            hard_think_delay: millis_var("SECHACK_HARD_THINK_DELAY_MS")?
                .unwrap_or(defaults.hard_think_delay),
            human_seat: bool_var("SECHACK_HUMAN_SEAT")?.unwrap_or(defaults.human_seat),
            choice_policy: policy_var("SECHACK_CHOICE_POLICY")?.unwrap_or(defaults.choice_policy),
            human_timeout: millis_var("SECHACK_HUMAN_TIMEOUT_MS")?,
            rng_seed: parsed_var::<u64>("SECHACK_RNG_SEED")?,
        })
    }

    pub fn think_delay_for(&self, hard_mode: bool) -> Duration {
        if hard_mode {
            self.hard_think_delay
        } else {
            self.think_delay
        }
    }

    /// Same pacing with every delay scaled down to `millis`; handy for tests
    /// that drive the real actor.
    pub fn with_uniform_delay(mut self, millis: u64) -> Self {
        let d = Duration::from_millis(millis);
        self.reveal_delay = d;
        self.think_delay = d;
        self.hard_think_delay = d;
        self
    }
}

fn raw_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    raw_var(name)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| {
                AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
            })
        })
        .transpose()
}

fn millis_var(name: &str) -> Result<Option<Duration>, AppError> {
    Ok(parsed_var::<u64>(name)?.map(Duration::from_millis))
}

fn bool_var(name: &str) -> Result<Option<bool>, AppError> {
    raw_var(name)
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::config(format!(
                "Environment variable '{name}' must be a boolean, got '{raw}'"
            ))),
        })
        .transpose()
}

fn policy_var(name: &str) -> Result<Option<HumanChoicePolicy>, AppError> {
    raw_var(name)
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "strict" => Ok(HumanChoicePolicy::Strict),
            "permissive" => Ok(HumanChoicePolicy::Permissive),
            _ => Err(AppError::config(format!(
                "Environment variable '{name}' must be 'strict' or 'permissive', got '{raw}'"
            ))),
        })
        .transpose()
}
