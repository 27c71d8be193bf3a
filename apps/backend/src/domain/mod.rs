//! Domain layer: pure turn-game logic types and helpers.

pub mod engine;
pub mod nomination;
pub mod outcome;
pub mod random;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod utterance;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_engine;
#[cfg(test)]
mod tests_props_nomination;

// Re-exports for ergonomics
pub use engine::{HumanChoicePolicy, TurnOutcome};
pub use nomination::Nomination;
pub use outcome::{GameOverReason, GameSummary};
pub use random::{ScriptedRng, SeededRng, TurnRng};
pub use rules::expected_utterance;
pub use snapshot::{SessionSnapshot, StateUpdate};
pub use state::{AgentId, Phase, Session};
pub use utterance::Utterance;
