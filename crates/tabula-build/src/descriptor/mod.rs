//! Build descriptors: one fully specified build target per (package, format).
//!
//! A descriptor is self-contained. Once emitted, an executor needs no further
//! registry lookups to run it, and descriptors can run in any order or in
//! parallel.

mod stage;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::registry::ExternalPolicy;

pub use stage::{
    AnalyzeOptions, LowerOptions, MinifyOptions, NodeResolveOptions, ReportKind, Stage, StageKind,
};

/// Output module format of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModuleFormat {
    #[serde(rename = "esm")]
    Esm,
    #[serde(rename = "cjs")]
    Cjs,
    #[serde(rename = "umd-dev")]
    UmdDevelopment,
    #[serde(rename = "umd-prod")]
    UmdProduction,
}

impl ModuleFormat {
    /// Every format, in the order descriptors are emitted for a package.
    pub const ALL: [ModuleFormat; 4] = [
        ModuleFormat::Esm,
        ModuleFormat::Cjs,
        ModuleFormat::UmdDevelopment,
        ModuleFormat::UmdProduction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Esm => "esm",
            Self::Cjs => "cjs",
            Self::UmdDevelopment => "umd-dev",
            Self::UmdProduction => "umd-prod",
        }
    }

    pub fn is_umd(&self) -> bool {
        matches!(self, Self::UmdDevelopment | Self::UmdProduction)
    }
}

impl std::fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a descriptor's output goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLocation {
    /// A directory receiving one or more files.
    Dir(PathBuf),
    /// A single bundle file.
    File(PathBuf),
}

impl OutputLocation {
    pub fn path(&self) -> &Path {
        match self {
            Self::Dir(path) | Self::File(path) => path,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

/// Export convention of the emitted module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Let the executor pick from the entry's exports.
    #[default]
    Auto,
    /// `exports.name = ...` for every export.
    Named,
}

/// One (package, format) build target.
///
/// Fields are read-only; descriptors are only created by the format builders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildDescriptor {
    pub(crate) package: String,
    pub(crate) format: ModuleFormat,
    pub(crate) input: PathBuf,
    pub(crate) external: ExternalPolicy,
    pub(crate) output: OutputLocation,
    pub(crate) sourcemap: bool,
    pub(crate) banner: String,
    pub(crate) preserve_modules: bool,
    pub(crate) exports: ExportMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) umd_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) module_name_mapping: Option<IndexMap<String, String>>,
    pub(crate) pipeline: Vec<Stage>,
}

impl BuildDescriptor {
    /// Library name of the package this descriptor builds.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn format(&self) -> ModuleFormat {
        self.format
    }

    /// Absolute path of the entry module.
    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn external(&self) -> &ExternalPolicy {
        &self.external
    }

    pub fn output(&self) -> &OutputLocation {
        &self.output
    }

    pub fn sourcemap(&self) -> bool {
        self.sourcemap
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Emit one output file per source module.
    pub fn preserve_modules(&self) -> bool {
        self.preserve_modules
    }

    pub fn exports(&self) -> ExportMode {
        self.exports
    }

    /// Global variable the UMD bundle assigns (UMD formats only).
    pub fn umd_name(&self) -> Option<&str> {
        self.umd_name.as_deref()
    }

    /// External identifier -> UMD global name (UMD formats only).
    pub fn module_name_mapping(&self) -> Option<&IndexMap<String, String>> {
        self.module_name_mapping.as_ref()
    }

    pub fn pipeline(&self) -> &[Stage] {
        &self.pipeline
    }

    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.pipeline.iter().map(Stage::kind).collect()
    }

    /// Stable `<package>:<format>` label for progress reporting.
    pub fn label(&self) -> String {
        format!("{}:{}", self.package, self.format)
    }
}

/// Serialize descriptors as a pretty-printed JSON array, in order.
pub fn to_json(descriptors: &[BuildDescriptor]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(descriptors)?)
}
