use std::fs::{self, File};
use std::io::{Error as IoError, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;

pub const DEFAULT_CONTENT: &str = r#"
# This configuration file is generated automatically. Feel free to do some
# modification.

# How minute amounts are shown: "hours" (8:05 h) or "minutes" (485 min).
display_format = "hours"

# The plan selected for new sessions. It must be one of the `plans` below.
default_plan = "flex"

# Planned working minutes per weekday. A day set to 0 or left out is a day
# off; starting work on it raises a warning.
[daily_work]
monday = 480
tuesday = 480
wednesday = 480
thursday = 480
friday = 480
saturday = 0
sunday = 0

# Breaks every new session starts with. Times are HH:MM, `duration` is in
# minutes.
[[default_breaks]]
start = "12:00"
end = "12:30"
duration = 30

# Working time plans. The end of work must lie between `earliest_start` and
# `latest_end`, and a day must not exceed `max_duration` minutes.
[plans.flex]
name = "Gleitzeit"
earliest_start = "06:00"
latest_end = "20:00"
max_duration = 600

[plans.core]
name = "Kernzeit"
earliest_start = "07:00"
latest_end = "18:00"
max_duration = 540

# The `storage` section overrides where the session is saved. Leave it out to
# use the XDG data directory.
# [storage]
# data = "/path/to/data/directory"
"#;

/// A reader which reads the configuration content and writes the default
/// template first if the file is missing.
pub struct ContentReader {
    path: PathBuf,
    create_new: bool,
}

impl ContentReader {
    /// Creates a new [`ContentReader`].
    pub fn new<P: AsRef<Path>>(path: P, create_new: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            create_new,
        }
    }

    /// Read content from the file.
    ///
    /// # Errors
    ///
    /// This function will return an error if the file doesn't exist and may
    /// not be created, or any file system operation fails.
    pub fn read(self) -> Result<String, ReadContentError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                ensure!(self.create_new, NotFoundSnafu { path: self.path });
                tracing::info!(path = %self.path.display(), "Writing default configuration");
                Self::create_default(&self.path)?;
                Ok(DEFAULT_CONTENT.to_owned())
            }
            Err(err) => Err(err).context(FileSystemSnafu {
                when: "Reading configuration",
            }),
        }
    }

    fn create_default(path: &Path) -> Result<(), ReadContentError> {
        let mut file = File::options()
            .write(true)
            .create_new(true)
            .open(path)
            .context(FileSystemSnafu {
                when: "Creating configuration file",
            })?;

        file.write_all(DEFAULT_CONTENT.as_bytes())
            .context(FileSystemSnafu {
                when: "Writing default configuration content",
            })
    }
}

/// An error type for reading content from the configuration file.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ReadContentError {
    #[snafu(display("Could not open inexistent file {}", path.display()))]
    NotFound { path: PathBuf },
    #[snafu(display("Could not access configuration: {when}"))]
    FileSystem {
        when: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
