use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::engine::SessionState;

/// An abstract interface for durable storage of the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// Load the saved session. Returns `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// This function will return an error if the storage is unreadable or
    /// holds no valid session.
    async fn load(&self) -> Result<Option<SessionState>, LoadSessionError>;

    /// Save `session`, replacing whatever was saved before.
    ///
    /// # Errors
    ///
    /// This function will return an error if the storage can't be written.
    async fn save(&self, session: SessionState) -> Result<(), SaveSessionError>;

    /// Delete the saved session, the saved settings and every other entry
    /// the application keeps.
    ///
    /// # Errors
    ///
    /// This function will return an error if anything could not be deleted.
    async fn clear_all(&self) -> Result<(), ClearStorageError>;
}

/// An error type of loading a saved session.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum LoadSessionError {
    #[snafu(whatever, display("Load session failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// An error type of saving a session.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SaveSessionError {
    #[snafu(whatever, display("Save session failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

/// An error type of clearing the storage.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ClearStorageError {
    #[snafu(whatever, display("Clear storage failed: {message}"))]
    #[non_exhaustive]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError + Send + Sync>, Some)))]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}
