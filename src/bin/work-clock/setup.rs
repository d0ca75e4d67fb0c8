use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::{prelude::*, Whatever};
use work_clock::adapter::clock::SystemClock;
use work_clock::adapter::config::{self, Configuration};
use work_clock::adapter::outbound::NotifyService;
use work_clock::adapter::repository::{FileSessionStore, SettingsConfiguration};
use work_clock::console::Console;
use work_clock::domain::app::Tracker;
use work_clock::domain::repository::SettingsRepository;
use work_clock::utils::xdg::{Xdg, XdgBaseKind};

use crate::cli::Arguments;

const APP_NAME: &str = "work-clock";

pub async fn bootstrap(args: &Arguments) -> Result<Console<Stdout>, Whatever> {
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => config::xdg_path(APP_NAME).whatever_context("Could not use XDG base directories")?,
    };
    let configuration = configuration(args, &config_path)?;

    let settings = SettingsConfiguration::new(Arc::clone(&configuration))
        .settings()
        .await
        .whatever_context("Could not apply configuration")?;

    let store = session_store(args, &configuration, config_path)?;

    let tracker = Tracker::open(Arc::new(settings), Arc::new(SystemClock), Arc::new(store)).await;
    let notifier = Arc::new(NotifyService::new(APP_NAME.to_owned()));
    Ok(Console::new(tracker, io::stdout()).with_notifier(notifier))
}

fn configuration(args: &Arguments, path: &Path) -> Result<Arc<Configuration>, Whatever> {
    let res = match &args.config {
        Some(_) => config::load_with_path(path),
        None => config::load(path, true),
    };

    let configuration = res.whatever_context("Could not load configuration")?;
    Ok(Arc::new(configuration))
}

/// Only the XDG directories belong to the application alone. A directory or
/// configuration file the user named is never purged.
fn session_store(
    args: &Arguments,
    configuration: &Configuration,
    config_path: PathBuf,
) -> Result<FileSessionStore, Whatever> {
    let mut store = match args.data.as_ref().or(configuration.storage.data.as_ref()) {
        Some(path) => FileSessionStore::new(path),
        None => {
            let directory = Xdg::new(APP_NAME)
                .and_then(|xdg| xdg.home(XdgBaseKind::Data))
                .whatever_context("Could not use XDG base directories")?;
            FileSessionStore::new(directory).owning_directory()
        }
    };

    if args.config.is_none() {
        store = store.with_settings_path(config_path);
    }
    Ok(store)
}
