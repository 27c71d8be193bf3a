pub mod director;
pub mod events;
pub mod scheduler;

pub use director::{GameDirector, GetSnapshot, StartGame, StopGame, SubmitChoice};
pub use events::GameEvent;
pub use scheduler::{HumanChoice, Scheduler, StartRequest, Step, TimerKind, TimerRequest};
