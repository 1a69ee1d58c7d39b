//! Workspace-wide options shared by every package in a pipeline run.

mod helpers;
mod package;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use package::PackageSpec;

use helpers::{
    default_build_dir, default_exclude, default_extensions, default_holder, default_license,
    default_license_file, default_stats_html, default_stats_json,
};

/// License banner metadata prefixed to every emitted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerOptions {
    /// Copyright holder named in the banner
    #[serde(default = "default_holder")]
    pub holder: String,

    /// SPDX identifier of the license (e.g. "MIT")
    #[serde(default = "default_license")]
    pub license: String,

    /// License file referenced by the banner, relative to the repository root
    #[serde(default = "default_license_file")]
    pub license_file: String,
}

impl Default for BannerOptions {
    fn default() -> Self {
        Self {
            holder: default_holder(),
            license: default_license(),
            license_file: default_license_file(),
        }
    }
}

/// Source extensions used for entry resolution, lowering and bare-specifier resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

/// Where syntax-lowering helpers come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HelperMode {
    /// Inline helpers into each bundle
    #[default]
    Bundled,
    /// Import helpers from a runtime package
    Runtime,
}

/// Source lowering (TypeScript/JSX to JavaScript) options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    #[serde(default)]
    pub helpers: HelperMode,

    /// Regular expression; matching source paths are not lowered
    #[serde(default = "default_exclude")]
    pub exclude: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            helpers: HelperMode::default(),
            exclude: default_exclude(),
        }
    }
}

/// How UMD bundle files are named inside `<package>/<build>/umd/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UmdNaming {
    /// `index.development.js` / `index.production.js`
    #[default]
    Index,
    /// `<output_file>.development.js` / `<output_file>.production.js`
    OutputFile,
}

/// Output layout relative to each package directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Build directory inside each package
    #[serde(default = "default_build_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub umd_naming: UmdNaming,

    /// File name of the human-readable bundle report
    #[serde(default = "default_stats_html")]
    pub stats_html: String,

    /// File name of the machine-readable bundle report
    #[serde(default = "default_stats_json")]
    pub stats_json: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            dir: default_build_dir(),
            umd_naming: UmdNaming::default(),
            stats_html: default_stats_html(),
            stats_json: default_stats_json(),
        }
    }
}
