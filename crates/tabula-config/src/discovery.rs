//! File-based config discovery
//!
//! Handles finding and loading Tabula configuration files from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde_json::Value;

use crate::config::TabulaConfig;
use crate::error::{ConfigError, Result};

/// Name of the dedicated TOML config file.
pub const CONFIG_FILE: &str = "tabula.toml";

/// Field holding the configuration inside `package.json`.
pub const PACKAGE_JSON_FIELD: &str = "tabula";

/// Prefix of environment variables overriding file values
/// (`TABULA_OUTPUT__DIR=dist` sets `output.dir`).
pub const ENV_PREFIX: &str = "TABULA_";

/// File-based configuration discovery
///
/// Searches for Tabula configuration files in conventional locations and loads them.
/// Library users can build a `TabulaConfig` directly instead.
///
/// # Example
///
/// ```no_run
/// use tabula_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: tabula.toml
    /// 2. package.json (tabula field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed
                        .get(PACKAGE_JSON_FIELD)
                        .is_some_and(|field| !field.is_null())
                    {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from discovered file
    ///
    /// Values are layered: defaults, then the file, then `TABULA_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<TabulaConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load config from a specific file path
    pub fn load_from(&self, path: &Path) -> Result<TabulaConfig> {
        tracing::debug!(path = %path.display(), "loading configuration");

        let file = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            Figment::from(Json::file(path)).focus(PACKAGE_JSON_FIELD)
        } else {
            Figment::from(Toml::file(path))
        };

        Figment::new()
            .merge(Serialized::defaults(TabulaConfig::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: if e.path.is_empty() {
                    "config".to_string()
                } else {
                    e.path.join(".")
                },
                hint: Some(e.to_string()),
            })
    }
}

/// Discover and load config from current directory (convenience function)
///
/// # Example
///
/// ```no_run
/// use tabula_config::discover;
///
/// let config = discover().unwrap();
/// ```
pub fn discover() -> Result<TabulaConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
