//! Core data types for the Pomodoro countdown timer.
//!
//! This module defines:
//! - Timer configuration with validation
//! - The timer state record and its transitions
//! - Derived presentation values (duration, progress, next phase)

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerConfig
// ============================================================================

/// User-adjustable timer configuration.
///
/// All durations are in minutes. The engine assumes values are within
/// the documented ranges; `validate` enforces them at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Focus phase duration in minutes (15-60)
    pub focus_minutes: u32,
    /// Short break duration in minutes (3-15)
    pub short_break_minutes: u32,
    /// Long break duration in minutes (15-45)
    pub long_break_minutes: u32,
    /// Alarm gain (0.0-1.0)
    pub alarm_volume: f32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            alarm_volume: 1.0,
        }
    }
}

impl TimerConfig {
    /// Creates a new configuration with the specified focus duration.
    pub fn with_focus_minutes(mut self, minutes: u32) -> Self {
        self.focus_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified short break duration.
    pub fn with_short_break_minutes(mut self, minutes: u32) -> Self {
        self.short_break_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified long break duration.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Creates a new configuration with the specified alarm volume.
    pub fn with_alarm_volume(mut self, volume: f32) -> Self {
        self.alarm_volume = volume;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if any field is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if self.focus_minutes < 15 || self.focus_minutes > 60 {
            return Err("focus duration must be between 15 and 60 minutes".to_string());
        }
        if self.short_break_minutes < 3 || self.short_break_minutes > 15 {
            return Err("short break duration must be between 3 and 15 minutes".to_string());
        }
        if self.long_break_minutes < 15 || self.long_break_minutes > 45 {
            return Err("long break duration must be between 15 and 45 minutes".to_string());
        }
        if !(0.0..=1.0).contains(&self.alarm_volume) {
            return Err("alarm volume must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// PhaseOutcome
// ============================================================================

/// Summary of a completed phase, reported by [`TimerState::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseOutcome {
    /// Whether the phase that just finished was a break.
    pub was_break_phase: bool,
    /// Whether the phase now loaded is a long break.
    pub next_is_long_break: bool,
    /// Focus session count after the transition.
    pub completed_focus_sessions: u32,
}

// ============================================================================
// TimerState
// ============================================================================

/// The single mutable timer record.
///
/// Created once at startup and mutated only by `tick` and the explicit
/// user actions (start/pause/reset/reset_session). Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left in the current phase
    pub seconds_remaining: u32,
    /// Whether the countdown is active
    pub is_running: bool,
    /// Whether the current phase is a break
    pub is_break_phase: bool,
    /// Number of completed focus phases
    pub completed_focus_sessions: u32,
}

impl TimerState {
    /// Creates a fresh idle-focus state seeded from the configuration.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            seconds_remaining: config.focus_minutes * 60,
            is_running: false,
            is_break_phase: false,
            completed_focus_sessions: 0,
        }
    }

    /// Starts the countdown.
    ///
    /// No-op if already running or if nothing remains to count down.
    /// Returns true if the state changed.
    pub fn start(&mut self) -> bool {
        if self.is_running || self.seconds_remaining == 0 {
            return false;
        }
        self.is_running = true;
        true
    }

    /// Pauses the countdown, preserving `seconds_remaining`.
    ///
    /// Returns true if the state changed.
    pub fn pause(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.is_running = false;
        true
    }

    /// Applies one elapsed second.
    ///
    /// Ignored while not running. Returns the phase outcome when the
    /// countdown reaches zero and the phase transition fires.
    pub fn tick(&mut self, config: &TimerConfig) -> Option<PhaseOutcome> {
        if !self.is_running {
            return None;
        }
        if self.seconds_remaining > 0 {
            self.seconds_remaining -= 1;
        }
        if self.seconds_remaining == 0 {
            Some(self.complete_phase(config))
        } else {
            None
        }
    }

    /// Transitions out of the just-finished phase.
    ///
    /// Every completion stops the timer; the user restarts manually.
    fn complete_phase(&mut self, config: &TimerConfig) -> PhaseOutcome {
        let was_break_phase = self.is_break_phase;
        if was_break_phase {
            self.is_break_phase = false;
        } else {
            self.completed_focus_sessions += 1;
            self.is_break_phase = true;
        }
        self.is_running = false;
        self.seconds_remaining = self.phase_duration_seconds(config);
        PhaseOutcome {
            was_break_phase,
            next_is_long_break: self.is_break_phase && self.long_break_due(),
            completed_focus_sessions: self.completed_focus_sessions,
        }
    }

    /// Resets to an idle focus phase.
    ///
    /// `completed_focus_sessions` is untouched.
    pub fn reset(&mut self, config: &TimerConfig) {
        self.is_running = false;
        self.is_break_phase = false;
        self.seconds_remaining = config.focus_minutes * 60;
    }

    /// Resets to an idle focus phase and clears the session counter.
    pub fn reset_session(&mut self, config: &TimerConfig) {
        self.reset(config);
        self.completed_focus_sessions = 0;
    }

    /// Re-establishes the remaining-time invariant after a config edit.
    ///
    /// A phase still at its full duration is re-seeded to the new
    /// duration; a phase in progress is clamped so `seconds_remaining`
    /// never exceeds the (possibly shorter) new duration.
    pub fn clamp_to_phase(&mut self, old_config: &TimerConfig, new_config: &TimerConfig) {
        let old_duration = self.phase_duration_seconds(old_config);
        let new_duration = self.phase_duration_seconds(new_config);
        if self.seconds_remaining == old_duration || self.seconds_remaining > new_duration {
            self.seconds_remaining = new_duration;
        }
    }

    // ------------------------------------------------------------------------
    // Derived presentation values (pure, recomputed on every read)
    // ------------------------------------------------------------------------

    /// Duration in seconds of the phase currently loaded.
    pub fn phase_duration_seconds(&self, config: &TimerConfig) -> u32 {
        if !self.is_break_phase {
            config.focus_minutes * 60
        } else if self.long_break_due() {
            config.long_break_minutes * 60
        } else {
            config.short_break_minutes * 60
        }
    }

    /// Fraction of the current phase already elapsed, in [0, 1].
    pub fn progress_ratio(&self, config: &TimerConfig) -> f64 {
        let duration = self.phase_duration_seconds(config);
        if duration == 0 {
            return 0.0;
        }
        let elapsed = duration.saturating_sub(self.seconds_remaining);
        (f64::from(elapsed) / f64::from(duration)).clamp(0.0, 1.0)
    }

    /// Label of the phase that will follow the current one.
    pub fn next_phase_label(&self) -> &'static str {
        if self.is_break_phase {
            "Focus"
        } else if (self.completed_focus_sessions + 1) % 4 == 0 {
            "Long Break"
        } else {
            "Short Break"
        }
    }

    /// Label of the phase currently loaded.
    pub fn phase_label(&self) -> &'static str {
        if !self.is_break_phase {
            "Focus"
        } else if self.long_break_due() {
            "Long Break"
        } else {
            "Short Break"
        }
    }

    /// True when the break granted after the current counter is a long one.
    fn long_break_due(&self) -> bool {
        self.completed_focus_sessions > 0 && self.completed_focus_sessions % 4 == 0
    }
}

// ============================================================================
// Tests
// ============================================================================
