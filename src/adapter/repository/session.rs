use std::io::{ErrorKind, Result as IoResult};
use std::path::{Path, PathBuf};

use snafu::prelude::*;
use tokio::fs;

use crate::domain::engine::SessionState;
use crate::domain::repository::session::{ClearStorageError, LoadSessionError, SaveSessionError};
use crate::domain::repository::SessionRepository;

const SESSION_FILE: &str = "session.json";
const PENDING_FILE: &str = "session.json.tmp";

/// A [`SessionRepository`] implementation which keeps the session as a JSON
/// file in a data directory.
///
/// Clearing removes the store's own files. Everything else in the directory
/// is removed only if the directory belongs to the application alone, see
/// [`FileSessionStore::owning_directory`].
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    directory: PathBuf,
    settings_path: Option<PathBuf>,
    owns_directory: bool,
}

impl FileSessionStore {
    /// Creates a new [`FileSessionStore`] saving into `directory`.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            settings_path: None,
            owns_directory: false,
        }
    }

    /// Treat the whole directory as application data, so clearing purges
    /// every entry in it.
    pub fn owning_directory(mut self) -> Self {
        self.owns_directory = true;
        self
    }

    /// Also delete the settings file at `path` when clearing the storage.
    pub fn with_settings_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn session_path(&self) -> PathBuf {
        self.directory.join(SESSION_FILE)
    }
}

#[async_trait::async_trait]
impl SessionRepository for FileSessionStore {
    async fn load(&self) -> Result<Option<SessionState>, LoadSessionError> {
        let path = self.session_path();
        let exists = whatever!(
            fs::try_exists(&path).await,
            "Could not access {}",
            path.display()
        );
        if !exists {
            return Ok(None);
        }

        let content = whatever!(
            fs::read_to_string(&path).await,
            "Could not read {}",
            path.display()
        );
        let session = whatever!(
            serde_json::from_str(&content),
            "Saved session in {} is malformed",
            path.display()
        );
        Ok(Some(session))
    }

    async fn save(&self, session: SessionState) -> Result<(), SaveSessionError> {
        let content = whatever!(
            serde_json::to_vec_pretty(&session),
            "Could not serialize session"
        );
        whatever!(
            fs::create_dir_all(&self.directory).await,
            "Could not create {}",
            self.directory.display()
        );

        let pending = self.directory.join(PENDING_FILE);
        whatever!(
            fs::write(&pending, content).await,
            "Could not write {}",
            pending.display()
        );
        whatever!(
            fs::rename(&pending, self.session_path()).await,
            "Could not replace saved session"
        );
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), ClearStorageError> {
        for name in [SESSION_FILE, PENDING_FILE] {
            let path = self.directory.join(name);
            whatever!(
                remove_file(&path).await,
                "Could not delete {}",
                path.display()
            );
        }
        if let Some(path) = &self.settings_path {
            whatever!(
                remove_file(path).await,
                "Could not delete {}",
                path.display()
            );
        }

        if !self.owns_directory {
            tracing::info!(directory = %self.directory.display(), "Saved session cleared");
            return Ok(());
        }

        let exists = whatever!(
            fs::try_exists(&self.directory).await,
            "Could not access {}",
            self.directory.display()
        );
        if !exists {
            return Ok(());
        }

        let mut entries = whatever!(
            fs::read_dir(&self.directory).await,
            "Could not list {}",
            self.directory.display()
        );
        while let Some(entry) = whatever!(
            entries.next_entry().await,
            "Could not list {}",
            self.directory.display()
        ) {
            let path = entry.path();
            let file_type = whatever!(
                entry.file_type().await,
                "Could not access {}",
                path.display()
            );
            let res = if file_type.is_dir() {
                fs::remove_dir_all(&path).await
            } else {
                fs::remove_file(&path).await
            };
            whatever!(res, "Could not delete {}", path.display());
        }

        tracing::info!(directory = %self.directory.display(), "Storage cleared");
        Ok(())
    }
}

async fn remove_file(path: &Path) -> IoResult<()> {
    match fs::remove_file(path).await {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        res => res,
    }
}
