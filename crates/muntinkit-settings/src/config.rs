//! Production configuration for MuntinKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, stored by default in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Cutting settings (profile face width, joint and frame clearances)
//! - Stock settings (raw bar length, saw kerf, sash count)
//! - Angular settings (saw length correction)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use muntinkit_camtools::{AngularParams, CutListParams, PackingParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory name under the platform config directory
pub const APP_DIR: &str = "muntinkit";
/// Default config file name
pub const CONFIG_FILE: &str = "config.toml";

/// Cut geometry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CuttingSettings {
    /// Visible profile width in mm
    pub face_width_mm: f64,
    /// Gap added to half the crossing bar's face width in mm
    pub joint_clearance_mm: f64,
    /// Gap between a bar end and the frame in mm
    pub frame_clearance_mm: f64,
}

impl Default for CuttingSettings {
    fn default() -> Self {
        Self {
            face_width_mm: 26.0,
            joint_clearance_mm: 1.0,
            frame_clearance_mm: 1.0,
        }
    }
}

/// Raw stock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockSettings {
    /// Length of one stock bar in mm
    pub stock_length_mm: f64,
    /// Material lost per saw cut in mm
    pub kerf_mm: f64,
    /// Number of identical sashes produced per job
    pub sash_count: usize,
}

impl Default for StockSettings {
    fn default() -> Self {
        Self {
            stock_length_mm: 6000.0,
            kerf_mm: 4.0,
            sash_count: 1,
        }
    }
}

/// Angular layout settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AngularSettings {
    /// Signed length adjustment applied to every angular piece in mm
    pub saw_correction_mm: f64,
}

/// File format of a config file, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub cutting: CuttingSettings,
    pub stock: StockSettings,
    pub angular: AngularSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/muntinkit/config.toml`, falling back to the home
    /// directory when the platform has no config directory.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().or_else(dirs::home_dir).ok_or_else(|| {
            SettingsError::ConfigDirectory("no config or home directory found".to_string())
        })?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return the defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => self.to_toml_string()?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        info!("saved config to {}", path.display());
        Ok(())
    }

    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        positive("cutting.face_width_mm", self.cutting.face_width_mm)?;
        non_negative("cutting.joint_clearance_mm", self.cutting.joint_clearance_mm)?;
        non_negative("cutting.frame_clearance_mm", self.cutting.frame_clearance_mm)?;

        positive("stock.stock_length_mm", self.stock.stock_length_mm)?;
        non_negative("stock.kerf_mm", self.stock.kerf_mm)?;
        if self.stock.sash_count == 0 {
            return Err(out_of_range("stock.sash_count", 0));
        }

        finite("angular.saw_correction_mm", self.angular.saw_correction_mm)?;
        Ok(())
    }

    pub fn cut_list_params(&self) -> CutListParams {
        CutListParams {
            frame_clearance: self.cutting.frame_clearance_mm,
            joint_clearance: self.cutting.joint_clearance_mm,
            ..CutListParams::default()
        }
    }

    pub fn packing_params(&self) -> PackingParams {
        PackingParams::new(
            self.stock.stock_length_mm,
            self.stock.kerf_mm,
            self.stock.sash_count,
        )
    }

    pub fn angular_params(&self) -> AngularParams {
        AngularParams {
            face_width: self.cutting.face_width_mm,
            joint_clearance: self.cutting.joint_clearance_mm,
            frame_clearance: self.cutting.frame_clearance_mm,
            saw_correction: self.angular.saw_correction_mm,
            ..AngularParams::default()
        }
    }
}

fn out_of_range(key: &str, value: impl ToString) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

fn finite(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, "must be a finite number"))
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    finite(key, value)?;
    if value <= 0.0 {
        return Err(out_of_range(key, value));
    }
    Ok(())
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    finite(key, value)?;
    if value < 0.0 {
        return Err(out_of_range(key, value));
    }
    Ok(())
}
