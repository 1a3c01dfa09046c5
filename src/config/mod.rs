//! Configuration loading and logging setup.

mod settings;

pub use settings::{LogSettings, SessionSettings, Settings, SettingsError};
