//! CLI module for the Pomodoro countdown timer.
//!
//! This module contains:
//! - `commands`: clap argument definitions and interactive key parsing
//! - `display`: formatted terminal output

pub mod commands;
pub mod display;

pub use commands::{parse_action_line, Cli, Commands, TimerArgs, UiAction};
pub use display::Display;
