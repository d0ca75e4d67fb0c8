use chrono::{Local, NaiveDateTime};

use crate::domain::outbound::Clock;

/// A [`Clock`] reading the local wall-clock time of the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
