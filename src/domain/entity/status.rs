use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The state of the working session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl Status {
    /// Returns `true` if a session is currently being measured.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Stopped => f.write_str("Stopped"),
            Self::Running => f.write_str("Running"),
            Self::Paused => f.write_str("Paused"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_initial() {
        assert_eq!(Status::default(), Status::Stopped);
        assert!(!Status::Stopped.is_active());
        assert!(Status::Running.is_active());
        assert!(Status::Paused.is_active());
    }

    #[test]
    fn status_serde() {
        assert_eq!(serde_json::to_string(&Status::Paused).unwrap(), "\"paused\"");
        assert_eq!(
            serde_json::from_str::<Status>("\"running\"").unwrap(),
            Status::Running
        );
    }
}
