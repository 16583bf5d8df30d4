//! Real-time salary engine.
//!
//! Turns a pay configuration, a running/stopped session and the wall clock
//! into the income earned so far today.

pub mod calculations;
pub mod clock;
pub mod engine;
pub mod format;
pub mod models;
pub mod relay;

pub use engine::{EngineError, EngineState, SalaryEngine, SessionState, WorkWindowField};
pub use models::*;
