//! Command definitions for the Pomodoro timer CLI.
//!
//! Uses clap derive for startup flags and a small line parser for the
//! interactive keys. Both enforce the configuration ranges, so the
//! engine never sees an out-of-range value.

use clap::{Args, Parser, Subcommand};

use crate::types::TimerConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro countdown timer for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "pomate",
    version,
    about = "A single-screen Pomodoro countdown timer",
    long_about = "Alternating focus and break countdowns with a session counter.\n\
                  Runs in the foreground; control it with single-letter commands\n\
                  on stdin (press Enter after each).",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Timer options for the default run mode
    #[command(flatten)]
    pub timer: TimerArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Timer Arguments
// ============================================================================

/// Arguments for the timer run mode
#[derive(Args, Debug, Clone)]
pub struct TimerArgs {
    /// Focus duration in minutes (15-60)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(15..=60)
    )]
    pub focus: u32,

    /// Short break duration in minutes (3-15)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(3..=15)
    )]
    pub short_break: u32,

    /// Long break duration in minutes (15-45)
    #[arg(
        short,
        long,
        default_value = "15",
        value_parser = clap::value_parser!(u32).range(15..=45)
    )]
    pub long_break: u32,

    /// Alarm volume (0.0-1.0)
    #[arg(long, default_value = "1.0", value_parser = parse_volume)]
    pub volume: f32,

    /// Disable the alarm tone
    #[arg(long)]
    pub no_sound: bool,

    /// Disable desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Print the final state as JSON on exit
    #[arg(long)]
    pub snapshot: bool,
}

impl Default for TimerArgs {
    fn default() -> Self {
        Self {
            focus: 25,
            short_break: 5,
            long_break: 15,
            volume: 1.0,
            no_sound: false,
            no_notify: false,
            snapshot: false,
        }
    }
}

impl TimerArgs {
    /// Builds the engine configuration from the parsed flags.
    pub fn to_config(&self) -> TimerConfig {
        TimerConfig {
            focus_minutes: self.focus,
            short_break_minutes: self.short_break,
            long_break_minutes: self.long_break,
            alarm_volume: self.volume,
        }
    }
}

/// Parses and range-checks the volume flag.
fn parse_volume(s: &str) -> Result<f32, String> {
    let volume: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(0.0..=1.0).contains(&volume) {
        return Err("volume must be between 0.0 and 1.0".to_string());
    }
    Ok(volume)
}

// ============================================================================
// Interactive Actions
// ============================================================================

/// A user action entered on stdin while the timer screen is running.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Start if idle, pause if running
    Toggle,
    /// Pause the countdown
    Pause,
    /// Reset the current phase
    Reset,
    /// Reset the phase and session counter
    ResetSession,
    /// Change the focus duration (minutes)
    SetFocus(u32),
    /// Change the short break duration (minutes)
    SetShortBreak(u32),
    /// Change the long break duration (minutes)
    SetLongBreak(u32),
    /// Change the alarm volume
    SetVolume(f32),
    /// Show the key reference
    Help,
    /// Exit the program
    Quit,
}

/// Parses one stdin line into an action.
///
/// An empty line toggles, mirroring a start/pause button. Configuration
/// edits are range-checked here so out-of-range values never reach the
/// engine.
pub fn parse_action_line(line: &str) -> Result<UiAction, String> {
    let mut parts = line.split_whitespace();
    let word = parts.next().unwrap_or("");
    let arg = parts.next();

    match word {
        "" | "s" | "start" | "toggle" => Ok(UiAction::Toggle),
        "p" | "pause" => Ok(UiAction::Pause),
        "r" | "reset" => Ok(UiAction::Reset),
        "R" | "session" => Ok(UiAction::ResetSession),
        "h" | "help" | "?" => Ok(UiAction::Help),
        "q" | "quit" | "exit" => Ok(UiAction::Quit),
        "focus" => parse_minutes(arg, 15, 60).map(UiAction::SetFocus),
        "short" => parse_minutes(arg, 3, 15).map(UiAction::SetShortBreak),
        "long" => parse_minutes(arg, 15, 45).map(UiAction::SetLongBreak),
        "volume" => {
            let arg = arg.ok_or("usage: volume <0.0-1.0>")?;
            parse_volume(arg).map(UiAction::SetVolume)
        }
        other => Err(format!("unknown command '{}' (h for help)", other)),
    }
}

/// Parses a minute value and checks it against the given range.
fn parse_minutes(arg: Option<&str>, min: u32, max: u32) -> Result<u32, String> {
    let arg = arg.ok_or_else(|| format!("expected minutes ({}-{})", min, max))?;
    let minutes: u32 = arg
        .parse()
        .map_err(|_| format!("'{}' is not a number", arg))?;
    if minutes < min || minutes > max {
        return Err(format!("value must be between {} and {} minutes", min, max));
    }
    Ok(minutes)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["pomate"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["pomate", "--verbose"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_defaults() {
            let cli = Cli::parse_from(["pomate"]);
            assert_eq!(cli.timer.focus, 25);
            assert_eq!(cli.timer.short_break, 5);
            assert_eq!(cli.timer.long_break, 15);
            assert_eq!(cli.timer.volume, 1.0);
            assert!(!cli.timer.no_sound);
            assert!(!cli.timer.no_notify);
            assert!(!cli.timer.snapshot);
        }

        #[test]
        fn test_parse_durations() {
            let cli = Cli::parse_from([
                "pomate",
                "--focus",
                "45",
                "--short-break",
                "10",
                "--long-break",
                "30",
            ]);
            assert_eq!(cli.timer.focus, 45);
            assert_eq!(cli.timer.short_break, 10);
            assert_eq!(cli.timer.long_break, 30);
        }

        #[test]
        fn test_parse_volume_and_switches() {
            let cli = Cli::parse_from(["pomate", "--volume", "0.5", "--no-sound", "--no-notify"]);
            assert_eq!(cli.timer.volume, 0.5);
            assert!(cli.timer.no_sound);
            assert!(cli.timer.no_notify);
        }

        #[test]
        fn test_parse_completions() {
            let cli = Cli::parse_from(["pomate", "completions", "zsh"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Zsh);
                }
                _ => panic!("expected Completions command"),
            }
        }

        #[test]
        fn test_to_config() {
            let cli = Cli::parse_from(["pomate", "--focus", "50", "--volume", "0.25"]);
            let config = cli.timer.to_config();
            assert_eq!(config.focus_minutes, 50);
            assert_eq!(config.alarm_volume, 0.25);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_timer_args_default_is_valid() {
            let config = TimerArgs::default().to_config();
            assert!(config.validate().is_ok());
        }
    }

    // ------------------------------------------------------------------------
    // Range Error Tests (using try_parse)
    // ------------------------------------------------------------------------

    mod error_tests {
        use super::*;

        #[test]
        fn test_focus_out_of_range() {
            assert!(Cli::try_parse_from(["pomate", "--focus", "14"]).is_err());
            assert!(Cli::try_parse_from(["pomate", "--focus", "61"]).is_err());
        }

        #[test]
        fn test_short_break_out_of_range() {
            assert!(Cli::try_parse_from(["pomate", "--short-break", "2"]).is_err());
            assert!(Cli::try_parse_from(["pomate", "--short-break", "16"]).is_err());
        }

        #[test]
        fn test_long_break_out_of_range() {
            assert!(Cli::try_parse_from(["pomate", "--long-break", "14"]).is_err());
            assert!(Cli::try_parse_from(["pomate", "--long-break", "46"]).is_err());
        }

        #[test]
        fn test_volume_out_of_range() {
            assert!(Cli::try_parse_from(["pomate", "--volume", "1.5"]).is_err());
            assert!(Cli::try_parse_from(["pomate", "--volume", "-0.1"]).is_err());
        }

        #[test]
        fn test_volume_not_a_number() {
            assert!(Cli::try_parse_from(["pomate", "--volume", "loud"]).is_err());
        }

        #[test]
        fn test_unknown_subcommand() {
            assert!(Cli::try_parse_from(["pomate", "unknown"]).is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Action Line Tests
    // ------------------------------------------------------------------------

    mod action_tests {
        use super::*;

        #[test]
        fn test_empty_line_toggles() {
            assert_eq!(parse_action_line(""), Ok(UiAction::Toggle));
            assert_eq!(parse_action_line("   "), Ok(UiAction::Toggle));
        }

        #[test]
        fn test_toggle_aliases() {
            assert_eq!(parse_action_line("s"), Ok(UiAction::Toggle));
            assert_eq!(parse_action_line("start"), Ok(UiAction::Toggle));
        }

        #[test]
        fn test_pause() {
            assert_eq!(parse_action_line("p"), Ok(UiAction::Pause));
            assert_eq!(parse_action_line("pause"), Ok(UiAction::Pause));
        }

        #[test]
        fn test_reset_variants() {
            assert_eq!(parse_action_line("r"), Ok(UiAction::Reset));
            assert_eq!(parse_action_line("R"), Ok(UiAction::ResetSession));
            assert_eq!(parse_action_line("session"), Ok(UiAction::ResetSession));
        }

        #[test]
        fn test_quit_and_help() {
            assert_eq!(parse_action_line("q"), Ok(UiAction::Quit));
            assert_eq!(parse_action_line("quit"), Ok(UiAction::Quit));
            assert_eq!(parse_action_line("h"), Ok(UiAction::Help));
            assert_eq!(parse_action_line("?"), Ok(UiAction::Help));
        }

        #[test]
        fn test_set_durations() {
            assert_eq!(parse_action_line("focus 30"), Ok(UiAction::SetFocus(30)));
            assert_eq!(parse_action_line("short 10"), Ok(UiAction::SetShortBreak(10)));
            assert_eq!(parse_action_line("long 20"), Ok(UiAction::SetLongBreak(20)));
        }

        #[test]
        fn test_set_volume() {
            assert_eq!(parse_action_line("volume 0.3"), Ok(UiAction::SetVolume(0.3)));
        }

        #[test]
        fn test_set_duration_out_of_range_rejected() {
            assert!(parse_action_line("focus 5").is_err());
            assert!(parse_action_line("focus 120").is_err());
            assert!(parse_action_line("short 2").is_err());
            assert!(parse_action_line("long 60").is_err());
            assert!(parse_action_line("volume 2.0").is_err());
        }

        #[test]
        fn test_set_duration_missing_value() {
            assert!(parse_action_line("focus").is_err());
            assert!(parse_action_line("volume").is_err());
        }

        #[test]
        fn test_set_duration_not_a_number() {
            assert!(parse_action_line("focus abc").is_err());
        }

        #[test]
        fn test_unknown_word() {
            let err = parse_action_line("dance").unwrap_err();
            assert!(err.contains("dance"));
        }
    }
}
