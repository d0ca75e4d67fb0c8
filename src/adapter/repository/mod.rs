mod session;
mod settings;

pub use session::FileSessionStore;
pub use settings::SettingsConfiguration;
