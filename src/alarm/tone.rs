//! Alarm tone playback using rodio.
//!
//! The alarm contract is any short audible cue scaled by the configured
//! gain; a fixed sine tone keeps the binary free of audio assets.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::AlarmError;

/// Tone frequency in Hz.
const TONE_FREQUENCY: f32 = 880.0;
/// Tone length.
const TONE_DURATION: Duration = Duration::from_millis(300);

// ============================================================================
// TonePlayer
// ============================================================================

/// Plays the alarm tone at a given gain.
pub trait TonePlayer {
    /// Plays a short tone scaled by `volume` (0.0-1.0).
    ///
    /// Must not block: playback continues in the background.
    fn play(&self, volume: f32) -> Result<(), AlarmError>;
}

// ============================================================================
// SineTonePlayer
// ============================================================================

/// A tone player backed by a rodio output stream.
///
/// Playback is non-blocking; the sink is detached and the tone finishes
/// on its own.
pub struct SineTonePlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl SineTonePlayer {
    /// Creates a new tone player.
    ///
    /// # Errors
    ///
    /// Returns `AlarmError::AudioUnavailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, AlarmError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AlarmError::AudioUnavailable(e.to_string()))?;

        debug!("audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl TonePlayer for SineTonePlayer {
    fn play(&self, volume: f32) -> Result<(), AlarmError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AlarmError::Playback(e.to_string()))?;

        let tone = SineWave::new(TONE_FREQUENCY)
            .take_duration(TONE_DURATION)
            .amplify(volume.clamp(0.0, 1.0));

        sink.append(tone);
        sink.detach();

        debug!(volume, "alarm tone started");
        Ok(())
    }
}

impl std::fmt::Debug for SineTonePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SineTonePlayer").finish_non_exhaustive()
    }
}

/// Creates a tone player, returning None if audio is unavailable.
///
/// Audio hardware is optional; if initialization fails a warning is
/// logged and the timer runs without sound.
#[must_use]
pub fn try_create_tone_player() -> Option<SineTonePlayer> {
    match SineTonePlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("audio not available, alarm tone disabled: {}", e);
            None
        }
    }
}

// ============================================================================
// MockTonePlayer
// ============================================================================

/// A tone player that records play requests instead of producing sound.
///
/// Clones share the same recording, so a test can keep a handle while
/// the dispatcher owns the player.
#[derive(Debug, Default, Clone)]
pub struct MockTonePlayer {
    /// Volumes of the recorded play requests.
    plays: Arc<Mutex<Vec<f32>>>,
    /// Whether play calls should fail.
    fail: bool,
}

impl MockTonePlayer {
    /// Creates a mock player that succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock player whose play calls fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            plays: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Returns the volumes recorded so far.
    #[must_use]
    pub fn recorded_volumes(&self) -> Vec<f32> {
        self.plays.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl TonePlayer for MockTonePlayer {
    fn play(&self, volume: f32) -> Result<(), AlarmError> {
        if self.fail {
            return Err(AlarmError::Playback("mock failure".to_string()));
        }
        if let Ok(mut plays) = self.plays.lock() {
            plays.push(volume);
        }
        Ok(())
    }
}
