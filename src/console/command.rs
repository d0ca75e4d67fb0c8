/// Operations available at the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current session
    Status,
    /// Start working
    Start(StartArguments),
    /// Pause by opening a break
    Pause,
    /// Resume by closing the open break
    Resume,
    /// Stop working
    Stop,
    /// Select a plan, or list all plans if no key is given
    Plan(Option<String>),
    /// Set the planned working minutes, or fall back to today's quota
    Target(Option<u32>),
    /// Edit the break ledger
    Break(BreakCommand),
    /// Follow the session live until interrupted
    Watch,
    /// Delete everything saved
    Clear { confirmed: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartArguments {
    /// Start time of today as HH:MM
    pub at: Option<String>,
    /// Planned working minutes
    pub planned: Option<u32>,
    /// Key of the plan to work under
    pub plan: Option<String>,
}

/// Edits of the break ledger. Indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakCommand {
    Add,
    Remove(usize),
    Start { index: usize, time: String },
    End { index: usize, time: String },
    Duration { index: usize, value: String },
    Reset,
}
