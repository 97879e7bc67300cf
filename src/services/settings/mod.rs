// Settings service module

mod service;

pub use service::{default_settings_path, parse_settings, SettingsError, SettingsService, SETTINGS_FILE_NAME};
