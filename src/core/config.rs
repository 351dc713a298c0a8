//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.studytree/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StudyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub subjects: Vec<SubjectEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Workbook path or `http(s)://` URL.
    pub workbook: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubjectEntry {
    pub sheet: String,
    pub label: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_WORKBOOK: &str = "botany.xlsx";
pub const DEFAULT_LOG_FILE: &str = "studytree.log";
pub const DEFAULT_SUBJECTS: &[&str] = &["Botany", "Zoology"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// A subject sheet and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSpec {
    pub sheet: String,
    pub label: String,
}

impl SubjectSpec {
    pub fn new(sheet: &str) -> Self {
        Self {
            sheet: sheet.to_string(),
            label: sheet.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub workbook: String,
    pub log_file: PathBuf,
    pub subjects: Vec<SubjectSpec>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.studytree/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".studytree").join("config.toml"))
}

/// Load config from `override_path`, or `~/.studytree/config.toml`.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `StudyConfig::default()`. An explicit path that doesn't exist is
/// an I/O error. A malformed file returns `ConfigError::Parse`.
pub fn load_config(override_path: Option<&Path>) -> Result<StudyConfig, ConfigError> {
    if let Some(path) = override_path {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(StudyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(StudyConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<StudyConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: StudyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# studytree configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# workbook = "botany.xlsx"           # Path or http(s) URL; or set STUDYTREE_WORKBOOK
# log_file = "studytree.log"

# One entry per sheet, in display order. Defaults to Botany and Zoology.
# [[subjects]]
# sheet = "Botany"
# label = "বোটানি"

# [[subjects]]
# sheet = "Zoology"
# label = "জুলজি"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_workbook` is the positional CLI argument (None = not specified).
pub fn resolve(config: &StudyConfig, cli_workbook: Option<&str>) -> ResolvedConfig {
    // Workbook: CLI → env → config → default
    let workbook = cli_workbook
        .map(|s| s.to_string())
        .or_else(|| std::env::var("STUDYTREE_WORKBOOK").ok())
        .or_else(|| config.general.workbook.clone())
        .unwrap_or_else(|| DEFAULT_WORKBOOK.to_string());

    let log_file = config
        .general
        .log_file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let subjects = if config.subjects.is_empty() {
        DEFAULT_SUBJECTS.iter().map(|s| SubjectSpec::new(s)).collect()
    } else {
        config
            .subjects
            .iter()
            .map(|entry| SubjectSpec {
                sheet: entry.sheet.clone(),
                label: entry.label.clone().unwrap_or_else(|| entry.sheet.clone()),
            })
            .collect()
    };

    ResolvedConfig {
        workbook,
        log_file: PathBuf::from(log_file),
        subjects,
    }
}
