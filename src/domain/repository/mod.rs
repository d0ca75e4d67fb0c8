pub mod session;
pub mod settings;

pub use session::SessionRepository;
pub use settings::SettingsRepository;
