//! MuntinKit Settings Crate
//!
//! Handles production configuration: clearances, stock length, saw kerf and
//! sash count, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    AngularSettings, Config, ConfigFormat, CuttingSettings, StockSettings, APP_DIR, CONFIG_FILE,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
