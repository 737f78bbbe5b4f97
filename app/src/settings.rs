//! FILENAME: app/src/settings.rs
//! Application settings and their persistence.
//!
//! Settings are stored as TOML in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.shopdesk.Shopdesk/
//! - Windows: %APPDATA%/shopdesk/Shopdesk/config/
//! - Linux: ~/.config/shopdesk/

use crate::{log_info, log_warn};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "shopdesk";
const APP_NAME: &str = "Shopdesk";
const CONFIG_FILENAME: &str = "settings.toml";
const LOG_FILENAME: &str = "shopdesk.log";

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// SETTINGS MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_source: DataSourceSettings,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
}

/// Where the catalog is fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceSettings {
    pub url: String,
    pub timeout_secs: u64,
    /// Local JSON file used instead of the URL when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory exports are written to. Current directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub file_prefix: String,
    pub report_title: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: None,
            file_prefix: export::DEFAULT_FILE_PREFIX.to_string(),
            report_title: export::DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Unified log file. Platform data folder when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl LoggingSettings {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .or_else(default_log_path)
            .unwrap_or_else(|| PathBuf::from(LOG_FILENAME))
    }
}

// ============================================================================
// PERSISTENCE
// ============================================================================

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Default location of the unified log file.
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILENAME))
}

/// Load settings from the platform settings file.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        log_warn!("SYS", "Could not determine settings path, using defaults");
        return Settings::default();
    };
    load_settings_from(&path)
}

/// Load settings from `path`.
///
/// Returns default settings if:
/// - The settings file doesn't exist
/// - The settings file cannot be read or parsed
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                log_info!("SYS", "Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                log_warn!("SYS", "Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log_info!("SYS", "No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            log_warn!("SYS", "Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Save settings to the platform settings file.
pub fn save_settings(settings: &Settings) -> Result<PathBuf, String> {
    let Some(path) = settings_path() else {
        return Err("Could not determine settings path".to_string());
    };
    save_settings_to(settings, &path)?;
    Ok(path)
}

/// Save settings to `path`, creating the parent directory if needed.
pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }
    }

    let content = toml::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;

    fs::write(path, content).map_err(|e| format!("Failed to write settings file: {}", e))?;

    log_info!("SYS", "Saved settings to {:?}", path);
    Ok(())
}
