use std::error::Error as StdError;

use chrono::NaiveDateTime;
use snafu::prelude::*;

use crate::domain::entity::Warning;

/// A public port for reading the local wall-clock time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync + 'static {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// A public port for emitting a notification.
#[async_trait::async_trait]
pub trait NotifyPort: Send + Sync + 'static {
    /// Announce a newly raised [`Warning`]. This method is not intended to be
    /// implemented by adapters directly.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to make a notification.
    async fn notify(&self, warning: &Warning) -> Result<(), NotifyError> {
        let request = NotifyRequest {
            summary: "Arbeitszeit".to_owned(),
            body: Some(warning.to_string()),
        };
        self.notify_impl(request).await
    }

    /// Actual implementation of notification operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to make a notification.
    async fn notify_impl(&self, request: NotifyRequest) -> Result<(), NotifyError>;
}

/// A structure that stores required data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyRequest {
    pub summary: String,
    pub body: Option<String>,
}

/// An error type of the notification operation.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum NotifyError {
    #[snafu(whatever, display("Could not emit a notification: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use chrono::{NaiveDate, TimeDelta};

    use super::*;

    /// A [`Clock`] which only moves when told to.
    #[derive(Debug)]
    pub struct FakeClock {
        now: Mutex<NaiveDateTime>,
    }

    impl FakeClock {
        pub fn at(now: NaiveDateTime) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(now),
            })
        }

        /// A clock standing on `date` at `hour:minute`.
        pub fn on(date: NaiveDate, hour: u32, minute: u32) -> Arc<Self> {
            Self::at(date.and_hms_opt(hour, minute, 0).unwrap())
        }

        pub fn set(&self, now: NaiveDateTime) {
            *self.now.lock().unwrap() = now;
        }

        pub fn advance(&self, minutes: i64) {
            *self.now.lock().unwrap() += TimeDelta::minutes(minutes);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> NaiveDateTime {
            *self.now.lock().unwrap()
        }
    }
}
