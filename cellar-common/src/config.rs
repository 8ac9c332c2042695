//! Configuration loading and root folder resolution
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CELLAR_ROOT_FOLDER`, then `CELLAR_ROOT`)
//! 3. TOML config file (`~/.config/cellar/<module>.toml`)
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or broken TOML file never aborts startup: a warning is logged
//! and compiled defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Primary root folder environment variable
pub const ENV_ROOT_FOLDER: &str = "CELLAR_ROOT_FOLDER";

/// Legacy/short root folder environment variable
pub const ENV_ROOT: &str = "CELLAR_ROOT";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "cellar.db";

/// Compiled defaults used when no other configuration source applies
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the cellar database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Wine list export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Document title printed at the top of page 1
    #[serde(default = "default_title")]
    pub title: String,

    /// Bottle size that is not printed on wine lines
    #[serde(default = "default_bottle_size")]
    pub default_bottle_size: String,

    /// Output format name (text, markdown, json)
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default)]
    pub page: PageSettings,

    #[serde(default)]
    pub heights: BlockHeights,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_bottle_size: default_bottle_size(),
            format: default_format(),
            page: PageSettings::default(),
            heights: BlockHeights::default(),
        }
    }
}

/// Page geometry in points (A4 portrait by default)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub height: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            height: 842.0,
            top_margin: 56.0,
            bottom_margin: 56.0,
        }
    }
}

/// Vertical space reserved for each kind of block, in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockHeights {
    pub title: f64,
    pub date: f64,
    pub section: f64,
    pub country: f64,
    pub region: f64,
    pub subregion: f64,
    pub commune: f64,
    pub cru: f64,
    pub wine_line: f64,
}

impl Default for BlockHeights {
    fn default() -> Self {
        Self {
            title: 40.0,
            date: 24.0,
            section: 32.0,
            country: 26.0,
            region: 22.0,
            subregion: 18.0,
            commune: 16.0,
            cru: 15.0,
            wine_line: 13.0,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_title() -> String {
    "Wine List".to_string()
}

fn default_bottle_size() -> String {
    "750ml".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

/// Resolves the root folder for a named module
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
        }
    }

    /// Path of this module's TOML file (may not exist)
    pub fn config_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("cellar").join(format!("{}.toml", self.module_name)))
    }

    /// Resolve the root folder without a command-line override
    pub fn resolve(&self) -> PathBuf {
        self.resolve_with(None)
    }

    /// Resolve the root folder, honoring an optional command-line override
    pub fn resolve_with(&self, cli_arg: Option<&Path>) -> PathBuf {
        self.resolve_from(cli_arg, &self.load_toml())
    }

    /// Resolve the root folder against an already loaded TOML config
    pub fn resolve_from(&self, cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
        // Priority 1: Command-line argument
        if let Some(path) = cli_arg {
            return path.to_path_buf();
        }

        // Priority 2: Environment variables
        for var in [ENV_ROOT_FOLDER, ENV_ROOT] {
            if let Ok(path) = std::env::var(var) {
                if !path.trim().is_empty() {
                    return PathBuf::from(path);
                }
            }
        }

        // Priority 3: TOML config file
        if let Some(root_folder) = &toml_config.root_folder {
            return root_folder.clone();
        }

        // Priority 4: OS-dependent compiled default
        CompiledDefaults::for_current_platform().root_folder
    }

    /// Load this module's TOML config, degrading to defaults on any failure
    pub fn load_toml(&self) -> TomlConfig {
        match self.config_path() {
            Some(path) if path.exists() => load_toml_or_default(&path),
            _ => TomlConfig::default(),
        }
    }
}

/// Load a TOML config file, strictly
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Load a TOML config file, logging a warning and using defaults on failure
pub fn load_toml_or_default(path: &Path) -> TomlConfig {
    match load_toml_config(path) {
        Ok(config) => {
            info!("Loaded configuration from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{}; using compiled defaults", e);
            TomlConfig::default()
        }
    }
}

/// Prepares the resolved root folder on disk
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    /// Create the root folder if missing (idempotent)
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/cellar
        dirs::data_local_dir()
            .map(|d| d.join("cellar"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/cellar"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/cellar
        dirs::data_dir()
            .map(|d| d.join("cellar"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/cellar"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\cellar
        dirs::data_local_dir()
            .map(|d| d.join("cellar"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\cellar"))
    } else {
        PathBuf::from("./cellar_data")
    }
}
