//! Pomodoro Countdown Timer Library
//!
//! This library provides the core functionality for the pomate CLI:
//! - Timer state machine and derived presentation values
//! - Timer engine driving the one-second tick loop
//! - Alarm dispatch (tone and desktop notification, fire-and-forget)
//! - CLI command parsing and display utilities

pub mod alarm;
pub mod cli;
pub mod engine;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{PhaseOutcome, TimerConfig, TimerState};

pub use engine::{EngineCommand, TimerEngine, TimerEvent};

pub use alarm::{
    phase_complete_message, try_create_tone_player, AlarmDispatcher, AlarmError, DesktopNotifier,
    MockNotifier, MockTonePlayer, Notifier, SineTonePlayer, TonePlayer,
};

pub use cli::{parse_action_line, Cli, Commands, Display, TimerArgs, UiAction};
