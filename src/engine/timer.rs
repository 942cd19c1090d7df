//! Timer engine for the Pomodoro countdown timer.
//!
//! This module provides the core timer functionality:
//! - Command handling (start/pause toggle, reset, reset session, config edits)
//! - Countdown with tokio::time::interval
//! - Event emission for display refresh and alarms
//! - Tick source re-armed on every running-state transition

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::types::{PhaseOutcome, TimerConfig, TimerState};

// ============================================================================
// EngineCommand
// ============================================================================

/// User actions accepted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Start if idle, pause if running
    Toggle,
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Reset the current phase to idle focus
    Reset,
    /// Reset the phase and the session counter
    ResetSession,
    /// Replace the configuration (validated by the caller)
    UpdateConfig(TimerConfig),
}

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for display refresh and alarm dispatch.
///
/// Every event carries a state snapshot so the presentation side can
/// recompute the derived values without sharing the engine itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// Countdown started
    Started {
        /// State after the transition
        state: TimerState,
    },
    /// Countdown paused
    Paused {
        /// State after the transition
        state: TimerState,
    },
    /// One second elapsed
    Tick {
        /// State after the decrement
        state: TimerState,
    },
    /// A phase reached zero and transitioned
    PhaseCompleted {
        /// State after the transition (next phase loaded, idle)
        state: TimerState,
        /// Summary of the completed phase
        outcome: PhaseOutcome,
    },
    /// Phase reset applied
    WasReset {
        /// State after the reset
        state: TimerState,
    },
    /// Session reset applied
    SessionReset {
        /// State after the reset
        state: TimerState,
    },
    /// Configuration replaced
    ConfigUpdated {
        /// The new configuration
        config: TimerConfig,
        /// State after the invariant clamp
        state: TimerState,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the state and drives the tick loop.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Active configuration
    config: TimerConfig,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new TimerEngine with the given configuration and event channel.
    pub fn new(config: TimerConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(&config),
            config,
            event_tx,
        }
    }

    /// Runs the engine loop until the command channel closes.
    ///
    /// A single ticker exists for the life of the engine, so starting
    /// while already running can never create a second tick source.
    /// Commands that change `is_running` re-arm the ticker: the next
    /// tick always lands a full second after the transition, and a tick
    /// already in flight when the timer pauses or resets never applies.
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<EngineCommand>) -> Result<()> {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    if self.apply(cmd)? {
                        ticker.reset();
                    }
                }
                _ = ticker.tick() => {
                    if !self.state.is_running {
                        continue;
                    }
                    self.handle_tick()?;
                }
            }
        }

        Ok(())
    }

    /// Applies one elapsed second and reports the result.
    fn handle_tick(&mut self) -> Result<()> {
        let outcome = self.state.tick(&self.config);

        self.event_tx
            .send(TimerEvent::Tick {
                state: self.state.clone(),
            })
            .context("failed to send tick event")?;

        if let Some(outcome) = outcome {
            tracing::debug!(
                sessions = outcome.completed_focus_sessions,
                was_break = outcome.was_break_phase,
                "phase completed"
            );
            self.event_tx
                .send(TimerEvent::PhaseCompleted {
                    state: self.state.clone(),
                    outcome,
                })
                .context("failed to send phase completed event")?;
        }

        Ok(())
    }

    /// Applies a command.
    ///
    /// Returns true when the running state changed (the tick source must
    /// be re-armed) or when a reset forced the countdown back to idle.
    pub fn apply(&mut self, cmd: EngineCommand) -> Result<bool> {
        match cmd {
            EngineCommand::Toggle => {
                if self.state.is_running {
                    self.pause()
                } else {
                    self.start()
                }
            }
            EngineCommand::Start => self.start(),
            EngineCommand::Pause => self.pause(),
            EngineCommand::Reset => self.reset(),
            EngineCommand::ResetSession => self.reset_session(),
            EngineCommand::UpdateConfig(config) => self.update_config(config),
        }
    }

    /// Starts the countdown. No-op if already running or at zero.
    pub fn start(&mut self) -> Result<bool> {
        if !self.state.start() {
            return Ok(false);
        }

        self.event_tx
            .send(TimerEvent::Started {
                state: self.state.clone(),
            })
            .context("failed to send started event")?;

        Ok(true)
    }

    /// Pauses the countdown. No-op if not running.
    pub fn pause(&mut self) -> Result<bool> {
        if !self.state.pause() {
            return Ok(false);
        }

        self.event_tx
            .send(TimerEvent::Paused {
                state: self.state.clone(),
            })
            .context("failed to send paused event")?;

        Ok(true)
    }

    /// Resets the current phase, keeping the session counter.
    pub fn reset(&mut self) -> Result<bool> {
        self.state.reset(&self.config);

        self.event_tx
            .send(TimerEvent::WasReset {
                state: self.state.clone(),
            })
            .context("failed to send reset event")?;

        Ok(true)
    }

    /// Resets the current phase and clears the session counter.
    pub fn reset_session(&mut self) -> Result<bool> {
        self.state.reset_session(&self.config);

        self.event_tx
            .send(TimerEvent::SessionReset {
                state: self.state.clone(),
            })
            .context("failed to send session reset event")?;

        Ok(true)
    }

    /// Replaces the configuration and re-establishes the state invariant.
    ///
    /// The caller validates ranges; the engine only clamps the countdown
    /// into the new phase duration.
    pub fn update_config(&mut self, config: TimerConfig) -> Result<bool> {
        let old = std::mem::replace(&mut self.config, config);
        self.state.clamp_to_phase(&old, &self.config);

        self.event_tx
            .send(TimerEvent::ConfigUpdated {
                config: self.config.clone(),
                state: self.state.clone(),
            })
            .context("failed to send config updated event")?;

        Ok(false)
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a reference to the active configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

// ============================================================================
// Tests
// ============================================================================
