//! High-level configuration structure for Tabula.
//!
//! This module provides the main `TabulaConfig` struct.
//! For file discovery, see the `discovery` module.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::options::{BannerOptions, OutputOptions, PackageSpec, ResolveOptions, TransformOptions};
use crate::settings::GlobalSettings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabulaConfig {
    #[serde(default)]
    pub settings: GlobalSettings,

    #[serde(default)]
    pub banner: BannerOptions,

    #[serde(default)]
    pub resolve: ResolveOptions,

    #[serde(default)]
    pub transform: TransformOptions,

    #[serde(default)]
    pub output: OutputOptions,

    /// External import identifier -> UMD global variable name
    #[serde(default)]
    pub globals: IndexMap<String, String>,

    /// Packages in build order
    #[serde(default)]
    pub packages: Vec<PackageSpec>,
}

impl TabulaConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use tabula_config::TabulaConfig;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "globals": { "react": "React" },
    ///     "packages": [
    ///         { "dir": "packages/core", "name": "core", "js_name": "Core", "entry": "src/index" }
    ///     ]
    /// });
    ///
    /// let config = TabulaConfig::from_value(value).unwrap();
    /// assert_eq!(config.packages[0].js_name, "Core");
    /// assert_eq!(config.globals["react"], "React");
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Register an external identifier and its UMD global name.
    pub fn with_global(mut self, identifier: impl Into<String>, global: impl Into<String>) -> Self {
        self.globals.insert(identifier.into(), global.into());
        self
    }

    pub fn with_package(mut self, package: PackageSpec) -> Self {
        self.packages.push(package);
        self
    }
}
