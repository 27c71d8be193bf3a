//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests: unified
//! logging initialization, problem-details assertions for HTTP errors and
//! assertions over websocket JSON frames.

pub mod logging;
pub mod problem_details;
pub mod ws_frames;
