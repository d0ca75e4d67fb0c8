use snafu::prelude::*;

use crate::domain::entity::plan::TryNewPlanError;
use crate::domain::entity::settings::TryNewSettingsError;
use crate::domain::entity::time_of_day::ParseTimeOfDayError;
use crate::domain::entity::Settings;

/// An abstract interface for accessing the user's [`Settings`].
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SettingsRepository: Send + Sync + 'static {
    /// Get the current settings.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to get valid settings.
    async fn settings(&self) -> Result<Settings, GetSettingsError>;
}

/// An error type of accessing the repository of [`Settings`].
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum GetSettingsError {
    #[snafu(display("Could not read time {field}"))]
    #[non_exhaustive]
    Time {
        field: String,
        source: ParseTimeOfDayError,
    },
    #[snafu(display("Could not create plan {key:?}"))]
    #[non_exhaustive]
    Plan { key: String, source: TryNewPlanError },
    #[snafu(display("Could not create settings"))]
    #[non_exhaustive]
    Invalid { source: TryNewSettingsError },
}
