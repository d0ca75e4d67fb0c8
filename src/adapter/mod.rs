//! Adapters connecting the domain ports to the operating system: the TOML
//! configuration, the JSON session file, the wall clock and desktop
//! notifications.

pub mod clock;
pub mod config;
pub mod outbound;
pub mod repository;
