//! Alarm subsystem error types.
//!
//! Alarm failures are never fatal: callers log them and move on, so the
//! timer state machine never observes a delivery error.

use thiserror::Error;

/// Errors that can occur while delivering an alarm.
#[derive(Debug, Error)]
pub enum AlarmError {
    /// No audio output device could be opened.
    #[error("audio device not available: {0}")]
    AudioUnavailable(String),

    /// Tone playback failed after the device was opened.
    #[error("tone playback failed: {0}")]
    Playback(String),

    /// The notification backend rejected or could not deliver the request.
    #[error("notification delivery failed: {0}")]
    Notification(String),
}

impl AlarmError {
    /// Returns true if this error concerns the audio channel.
    #[must_use]
    pub fn is_audio_error(&self) -> bool {
        matches!(self, Self::AudioUnavailable(_) | Self::Playback(_))
    }
}
