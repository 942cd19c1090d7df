//! Pomodoro countdown timer - a single-screen terminal tool
//!
//! Alternating focus and break countdowns following the Pomodoro
//! technique:
//! - configurable focus interval (default 25 minutes)
//! - short break after each focus session (default 5 minutes)
//! - long break after every 4th focus session (default 15 minutes)

use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use pomate::alarm::{
    try_create_tone_player, AlarmDispatcher, DesktopNotifier, Notifier, TonePlayer,
};
use pomate::cli::{parse_action_line, Cli, Commands, Display, TimerArgs, UiAction};
use pomate::engine::{EngineCommand, TimerEngine, TimerEvent};
use pomate::types::{TimerConfig, TimerState};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => run_timer(cli.timer).await,
    }
}

/// Runs the interactive timer screen until the user quits.
async fn run_timer(args: TimerArgs) -> Result<()> {
    let config = args.to_config();
    let dispatcher = build_dispatcher(&args);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

    let engine = TimerEngine::new(config.clone(), event_tx);
    let engine_task = tokio::spawn(engine.run(cmd_rx));

    let mut line_rx = spawn_stdin_reader();

    // host-side copies, refreshed from event snapshots
    let mut config = config;
    let mut state = TimerState::new(&config);

    Display::show_help_keys();
    Display::show_refresh(&state, &config);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                match parse_action_line(&line) {
                    Ok(UiAction::Quit) => break,
                    Ok(UiAction::Help) => {
                        Display::show_help_keys();
                        Display::show_refresh(&state, &config);
                    }
                    Ok(action) => {
                        if let Some(cmd) = to_engine_command(action, &config) {
                            if cmd_tx.send(cmd).is_err() {
                                break;
                            }
                        }
                    }
                    Err(message) => {
                        Display::show_error(&message);
                        Display::show_refresh(&state, &config);
                    }
                }
            }
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                handle_event(event, &mut state, &mut config, &dispatcher);
            }
        }
    }

    println!();
    if args.snapshot {
        Display::show_snapshot(&state, &config);
    }

    // closing the command channel stops the engine loop
    drop(cmd_tx);
    engine_task.await??;

    Ok(())
}

/// Applies one engine event to the host copies and the screen.
fn handle_event(
    event: TimerEvent,
    state: &mut TimerState,
    config: &mut TimerConfig,
    dispatcher: &AlarmDispatcher,
) {
    match event {
        TimerEvent::Started { state: s }
        | TimerEvent::Paused { state: s }
        | TimerEvent::Tick { state: s }
        | TimerEvent::WasReset { state: s }
        | TimerEvent::SessionReset { state: s } => {
            *state = s;
        }
        TimerEvent::PhaseCompleted { state: s, outcome } => {
            *state = s;
            dispatcher.dispatch(&outcome, config.alarm_volume);
            Display::show_phase_complete(&outcome);
        }
        TimerEvent::ConfigUpdated { config: c, state: s } => {
            *config = c;
            *state = s;
        }
    }
    Display::show_refresh(state, config);
}

/// Maps an interactive action to an engine command.
///
/// Quit and Help never reach the engine; they return None.
fn to_engine_command(action: UiAction, config: &TimerConfig) -> Option<EngineCommand> {
    match action {
        UiAction::Toggle => Some(EngineCommand::Toggle),
        UiAction::Pause => Some(EngineCommand::Pause),
        UiAction::Reset => Some(EngineCommand::Reset),
        UiAction::ResetSession => Some(EngineCommand::ResetSession),
        UiAction::SetFocus(minutes) => Some(EngineCommand::UpdateConfig(
            config.clone().with_focus_minutes(minutes),
        )),
        UiAction::SetShortBreak(minutes) => Some(EngineCommand::UpdateConfig(
            config.clone().with_short_break_minutes(minutes),
        )),
        UiAction::SetLongBreak(minutes) => Some(EngineCommand::UpdateConfig(
            config.clone().with_long_break_minutes(minutes),
        )),
        UiAction::SetVolume(volume) => Some(EngineCommand::UpdateConfig(
            config.clone().with_alarm_volume(volume),
        )),
        UiAction::Quit | UiAction::Help => None,
    }
}

/// Builds the alarm channels selected by the flags.
fn build_dispatcher(args: &TimerArgs) -> AlarmDispatcher {
    let tone = if args.no_sound {
        None
    } else {
        try_create_tone_player().map(|p| Box::new(p) as Box<dyn TonePlayer>)
    };

    let notifier = if args.no_notify {
        None
    } else {
        Some(Arc::new(DesktopNotifier::new()) as Arc<dyn Notifier>)
    };

    AlarmDispatcher::new(tone, notifier)
}

/// Forwards stdin lines to a channel.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    line_rx
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_engine_command_toggle() {
        let config = TimerConfig::default();
        assert_eq!(
            to_engine_command(UiAction::Toggle, &config),
            Some(EngineCommand::Toggle)
        );
    }

    #[test]
    fn test_to_engine_command_resets() {
        let config = TimerConfig::default();
        assert_eq!(
            to_engine_command(UiAction::Reset, &config),
            Some(EngineCommand::Reset)
        );
        assert_eq!(
            to_engine_command(UiAction::ResetSession, &config),
            Some(EngineCommand::ResetSession)
        );
    }

    #[test]
    fn test_to_engine_command_quit_and_help_stay_local() {
        let config = TimerConfig::default();
        assert_eq!(to_engine_command(UiAction::Quit, &config), None);
        assert_eq!(to_engine_command(UiAction::Help, &config), None);
    }

    #[test]
    fn test_to_engine_command_config_edit_preserves_other_fields() {
        let config = TimerConfig::default().with_alarm_volume(0.5);

        match to_engine_command(UiAction::SetFocus(45), &config) {
            Some(EngineCommand::UpdateConfig(new_config)) => {
                assert_eq!(new_config.focus_minutes, 45);
                assert_eq!(new_config.alarm_volume, 0.5);
                assert_eq!(new_config.short_break_minutes, 5);
            }
            cmd => panic!("expected UpdateConfig, got {:?}", cmd),
        }
    }

    #[test]
    fn test_to_engine_command_volume_edit() {
        let config = TimerConfig::default();

        match to_engine_command(UiAction::SetVolume(0.2), &config) {
            Some(EngineCommand::UpdateConfig(new_config)) => {
                assert_eq!(new_config.alarm_volume, 0.2);
            }
            cmd => panic!("expected UpdateConfig, got {:?}", cmd),
        }
    }

    #[test]
    fn test_build_dispatcher_all_disabled() {
        let args = TimerArgs {
            no_sound: true,
            no_notify: true,
            ..TimerArgs::default()
        };

        let dispatcher = build_dispatcher(&args);
        assert!(!dispatcher.is_active());
    }
}
