//! Display utilities for the Pomodoro timer screen.
//!
//! One status line per refresh, rewritten in place with a carriage
//! return; banners and errors go on their own lines.

use std::io::Write;

use crate::types::{PhaseOutcome, TimerConfig, TimerState};

/// Width of the progress bar in cells.
const PROGRESS_BAR_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for terminal output.
pub struct Display;

impl Display {
    /// Rewrites the status line for the current state.
    pub fn show_refresh(state: &TimerState, config: &TimerConfig) {
        let line = Self::status_line(state, config);
        // pad to clear leftovers from a longer previous line
        print!("\r{:<width$}", line, width = 78);
        let _ = std::io::stdout().flush();
    }

    /// Shows a banner for a completed phase.
    pub fn show_phase_complete(outcome: &PhaseOutcome) {
        println!();
        if outcome.was_break_phase {
            println!("* Break over - press Enter to start focusing");
        } else {
            let next = if outcome.next_is_long_break {
                "long break"
            } else {
                "short break"
            };
            println!(
                "* Focus session {} complete - press Enter to start your {}",
                outcome.completed_focus_sessions, next
            );
        }
    }

    /// Shows the key reference.
    pub fn show_help_keys() {
        println!();
        println!("keys (press Enter after each):");
        println!("  <Enter>/s  start or pause");
        println!("  p          pause");
        println!("  r          reset the current phase");
        println!("  R          reset phase and session counter");
        println!("  focus N    set focus minutes (15-60)");
        println!("  short N    set short break minutes (3-15)");
        println!("  long N     set long break minutes (15-45)");
        println!("  volume X   set alarm volume (0.0-1.0)");
        println!("  q          quit");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("\rerror: {}", message);
    }

    /// Dumps the final state and configuration as JSON.
    pub fn show_snapshot(state: &TimerState, config: &TimerConfig) {
        let snapshot = serde_json::json!({
            "state": state,
            "config": config,
        });
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("\rerror: failed to serialize snapshot: {}", e),
        }
    }

    /// Builds the status line for the current state.
    pub fn status_line(state: &TimerState, config: &TimerConfig) -> String {
        let bar = Self::progress_bar(state.progress_ratio(config), PROGRESS_BAR_WIDTH);
        let (minutes, seconds) = Self::format_time(state.seconds_remaining);
        let marker = if state.is_running { ">" } else { "||" };

        format!(
            "[{}] {}:{:02}  {}  next: {}  sessions: {}  {}",
            bar,
            minutes,
            seconds,
            state.phase_label(),
            state.next_phase_label(),
            state.completed_focus_sessions,
            marker
        )
    }

    /// Renders a ratio in [0, 1] as a fixed-width bar.
    pub fn progress_bar(ratio: f64, width: usize) -> String {
        let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u32) -> (u32, u32) {
        (total_seconds / 60, total_seconds % 60)
    }
}

// ============================================================================
// Tests
// ============================================================================
