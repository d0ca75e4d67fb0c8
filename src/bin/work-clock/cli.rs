use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use work_clock::console::{BreakCommand, Command as ConsoleCommand, StartArguments};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    /// Path to a custom configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory where the session is saved
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
    /// Maximum logging level the subscriber should use
    #[arg(short, long, global = true, default_value_t = Level::WARN)]
    pub verbosity: Level,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current session
    Status,
    /// Start working
    Start {
        /// Start time of today as HH:MM. Defaults to now
        #[arg(short, long)]
        at: Option<String>,
        /// Planned working minutes. Defaults to today's quota
        #[arg(short, long)]
        planned: Option<u32>,
        /// Key of the plan to work under
        #[arg(long)]
        plan: Option<String>,
    },
    /// Pause the session by opening a break
    Pause,
    /// Resume the session by closing the open break
    Resume,
    /// Stop working
    Stop,
    /// Select a plan. Lists all plans if no key is given
    Plan {
        /// Key of the plan
        key: Option<String>,
    },
    /// Set the planned working minutes. Falls back to today's quota if none
    /// are given
    Target {
        /// Planned working minutes
        minutes: Option<u32>,
    },
    /// Edit the breaks of the session
    Break {
        #[command(subcommand)]
        action: BreakAction,
    },
    /// Follow the session live until interrupted
    Watch,
    /// Delete the saved session, the settings and all other saved data
    Clear {
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum BreakAction {
    /// Append an empty break
    Add,
    /// Delete a break
    Remove {
        /// Position of the break, starting at 1
        index: NonZeroUsize,
    },
    /// Set when a break began, as HH:MM
    Start { index: NonZeroUsize, time: String },
    /// Set when a break ended, as HH:MM
    End { index: NonZeroUsize, time: String },
    /// Set the length of a break in minutes
    Duration { index: NonZeroUsize, value: String },
    /// Replace all breaks with the configured defaults
    Reset,
}

impl From<Command> for ConsoleCommand {
    fn from(value: Command) -> Self {
        match value {
            Command::Status => Self::Status,
            Command::Start { at, planned, plan } => {
                Self::Start(StartArguments { at, planned, plan })
            }
            Command::Pause => Self::Pause,
            Command::Resume => Self::Resume,
            Command::Stop => Self::Stop,
            Command::Plan { key } => Self::Plan(key),
            Command::Target { minutes } => Self::Target(minutes),
            Command::Break { action } => Self::Break(action.into()),
            Command::Watch => Self::Watch,
            Command::Clear { yes } => Self::Clear { confirmed: yes },
        }
    }
}

impl From<BreakAction> for BreakCommand {
    fn from(value: BreakAction) -> Self {
        let position = |index: NonZeroUsize| index.get() - 1;
        match value {
            BreakAction::Add => Self::Add,
            BreakAction::Remove { index } => Self::Remove(position(index)),
            BreakAction::Start { index, time } => Self::Start {
                index: position(index),
                time,
            },
            BreakAction::End { index, time } => Self::End {
                index: position(index),
                time,
            },
            BreakAction::Duration { index, value } => Self::Duration {
                index: position(index),
                value,
            },
            BreakAction::Reset => Self::Reset,
        }
    }
}
