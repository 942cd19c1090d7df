//! Alarm dispatch for phase completion.
//!
//! This module covers the two alarm channels:
//! - `tone`: short audible cue via rodio
//! - `notify`: desktop notification via notify-rust
//!
//! Delivery is fire-and-forget. Failures are logged and swallowed; the
//! timer state machine never sees them.

pub mod error;
pub mod notify;
pub mod tone;

use std::sync::Arc;

use tracing::warn;

use crate::types::PhaseOutcome;

pub use error::AlarmError;
pub use notify::{DesktopNotifier, MockNotifier, Notifier};
pub use tone::{try_create_tone_player, MockTonePlayer, SineTonePlayer, TonePlayer};

// ============================================================================
// AlarmDispatcher
// ============================================================================

/// Fires the alarm channels when a phase completes.
///
/// Either channel may be absent (disabled by flag or unavailable on the
/// host); dispatch silently skips missing channels.
pub struct AlarmDispatcher {
    tone: Option<Box<dyn TonePlayer>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AlarmDispatcher {
    /// Creates a dispatcher over the given channels.
    pub fn new(tone: Option<Box<dyn TonePlayer>>, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self { tone, notifier }
    }

    /// Creates a dispatcher with both channels disabled.
    #[must_use]
    pub fn silent() -> Self {
        Self {
            tone: None,
            notifier: None,
        }
    }

    /// Fires the alarm for a completed phase.
    ///
    /// The tone plays on a detached sink and returns immediately; the
    /// notification is shown from a blocking task so a slow platform
    /// service cannot stall tick scheduling. All failures end here.
    pub fn dispatch(&self, outcome: &PhaseOutcome, volume: f32) {
        if let Some(tone) = &self.tone {
            if let Err(e) = tone.play(volume) {
                warn!("alarm tone failed: {}", e);
            }
        }

        if let Some(notifier) = &self.notifier {
            let notifier = Arc::clone(notifier);
            let (title, body) = phase_complete_message(outcome);
            tokio::task::spawn_blocking(move || {
                if let Err(e) = notifier.notify(&title, &body) {
                    warn!("notification failed: {}", e);
                }
            });
        }
    }

    /// Returns true if at least one channel is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tone.is_some() || self.notifier.is_some()
    }
}

impl std::fmt::Debug for AlarmDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmDispatcher")
            .field("tone", &self.tone.is_some())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

/// Builds the notification title and body for a completed phase.
#[must_use]
pub fn phase_complete_message(outcome: &PhaseOutcome) -> (String, String) {
    if outcome.was_break_phase {
        (
            "Break over".to_string(),
            "Ready for the next focus session.".to_string(),
        )
    } else {
        let break_kind = if outcome.next_is_long_break {
            "long break"
        } else {
            "short break"
        };
        (
            "Focus complete".to_string(),
            format!(
                "Session {} done. Time for a {}.",
                outcome.completed_focus_sessions, break_kind
            ),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
