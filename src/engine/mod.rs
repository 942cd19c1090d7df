//! Timer engine module.
//!
//! - `timer`: the engine driving state transitions and the 1-second tick loop

pub mod timer;

pub use timer::{EngineCommand, TimerEngine, TimerEvent};
