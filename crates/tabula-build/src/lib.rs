#![cfg_attr(docsrs, feature(doc_cfg))]

//! # tabula-build
//!
//! Derives the full matrix of build descriptors for a multi-package library:
//! ES modules, CommonJS, and a development and production UMD bundle for every
//! package, all sharing one registry of external dependencies and their UMD
//! global names.
//!
//! The crate only *describes* builds. Compiling, bundling and writing files is
//! left to an executor consuming the descriptor list, which may run the
//! descriptors in any order or in parallel.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tabula_build::build_config;
//! use tabula_config::ConfigDiscovery;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let discovery = ConfigDiscovery::new(".");
//! let config = discovery.load()?;
//!
//! let descriptors = build_config(discovery.root(), &config)?;
//! for descriptor in &descriptors {
//!     println!("{} -> {}", descriptor.label(), descriptor.output().path().display());
//! }
//!
//! std::fs::write("descriptors.json", tabula_build::to_json(&descriptors)?)?;
//! # Ok(()) }
//! ```

pub mod banner;
pub mod descriptor;
pub mod formats;
pub mod mode;
pub mod pipeline;
pub mod registry;
pub mod target;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

use std::path::PathBuf;

use tabula_config::ConfigError;

pub use banner::{make_banner, make_banner_with};
pub use descriptor::{
    AnalyzeOptions, BuildDescriptor, ExportMode, LowerOptions, MinifyOptions, ModuleFormat,
    NodeResolveOptions, OutputLocation, ReportKind, Stage, StageKind, to_json,
};
pub use formats::{Cjs, Esm, FormatBuilder, FormatOptions, UmdDevelopment, UmdProduction};
pub use mode::{BuildMode, InlineMode, MODE_SENTINEL, inline_mode};
pub use pipeline::{Pipeline, build_config};
pub use registry::{ExternalPolicy, GlobalRegistry};
pub use target::{PackageTarget, TargetBuilder};

/// Error types for descriptor generation.
///
/// Every variant is fatal for the run that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The entry module of a package does not resolve to a file.
    #[error("Entry for package '{package}' not found: {}", path.display())]
    EntryNotFound { package: String, path: PathBuf },

    /// Two packages of one run expose the same UMD global.
    #[error("Packages '{first}' and '{second}' both use the global name '{js_name}'")]
    DuplicateJsName {
        js_name: String,
        first: String,
        second: String,
    },

    /// A package's UMD global is already the global of an unrelated external.
    #[error(
        "Package '{package}' uses global name '{js_name}', which belongs to external '{identifier}'"
    )]
    GlobalNameConflict {
        package: String,
        js_name: String,
        identifier: String,
    },

    /// A package's `import_name` is external under a different global than the
    /// one its own UMD bundle exposes.
    #[error(
        "Package '{package}' exposes '{js_name}', but siblings import '{import_name}' as '{global}'"
    )]
    ImportNameMismatch {
        package: String,
        import_name: String,
        js_name: String,
        global: String,
    },

    /// Two packages of one run write into the same build directory.
    #[error("Packages '{first}' and '{second}' both build into {}", dir.display())]
    DuplicateBuildDir {
        dir: PathBuf,
        first: String,
        second: String,
    },

    #[error("Package '{package}' has an invalid global name '{js_name}'")]
    InvalidJsName { package: String, js_name: String },

    /// A registry entry is malformed or inconsistent.
    #[error("Invalid global registry entry '{identifier}': {reason}")]
    InvalidRegistry { identifier: String, reason: String },

    /// A global name was requested for an identifier the registry does not
    /// externalize. This is a bug in the caller, never a user error.
    #[error("'{identifier}' is not an external dependency")]
    NotExternal { identifier: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Package the error is about, when it concerns a single package.
    pub fn package(&self) -> Option<&str> {
        match self {
            Error::EntryNotFound { package, .. }
            | Error::GlobalNameConflict { package, .. }
            | Error::ImportNameMismatch { package, .. }
            | Error::InvalidJsName { package, .. } => Some(package),
            Error::DuplicateJsName { second, .. } | Error::DuplicateBuildDir { second, .. } => {
                Some(second)
            }
            _ => None,
        }
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Config(_) => "CONFIG_ERROR",
            Error::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
            Error::DuplicateJsName { .. } => "DUPLICATE_JS_NAME",
            Error::GlobalNameConflict { .. } => "GLOBAL_NAME_CONFLICT",
            Error::ImportNameMismatch { .. } => "IMPORT_NAME_MISMATCH",
            Error::DuplicateBuildDir { .. } => "DUPLICATE_BUILD_DIR",
            Error::InvalidJsName { .. } => "INVALID_JS_NAME",
            Error::InvalidRegistry { .. } => "INVALID_REGISTRY",
            Error::NotExternal { .. } => "NOT_EXTERNAL",
            Error::Json(_) => "JSON_ERROR",
            Error::Io(_) => "IO_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Config(err) => err
                .hint()
                .map(|hint| Box::new(hint.to_string()) as Box<dyn std::fmt::Display>),
            Error::EntryNotFound { path, .. } => Some(Box::new(format!(
                "Create '{}' or point `entry` at an existing file.\nExtensions from `resolve.extensions` are tried when the path has none.",
                path.display()
            ))),
            Error::DuplicateJsName { js_name, .. } => Some(Box::new(format!(
                "Each package needs its own UMD global. Rename one of the '{}' globals.",
                js_name
            ))),
            Error::GlobalNameConflict { identifier, .. } => Some(Box::new(format!(
                "Set `import_name = \"{}\"` if this package is that dependency, otherwise choose another `js_name`.",
                identifier
            ))),
            Error::ImportNameMismatch {
                import_name,
                global,
                ..
            } => Some(Box::new(format!(
                "Set `js_name = \"{}\"` or change the `globals` entry for '{}' to match.",
                global, import_name
            ))),
            Error::DuplicateBuildDir { .. } => Some(Box::new(
                "Each package needs its own `dir`; paths are compared after removing `.` and `..` segments.",
            )),
            Error::InvalidJsName { .. } => Some(Box::new(
                "Use a JavaScript identifier such as `ReactTable` (dots allowed: `Tanstack.Table`).",
            )),
            Error::InvalidRegistry { .. } => Some(Box::new(
                "Every `globals` entry needs a unique identifier and a unique, valid global name.",
            )),
            Error::NotExternal { .. } => Some(Box::new(
                "Only identifiers confirmed external may be mapped to a global name.",
            )),
            _ => None,
        }
    }
}

/// Result type alias for descriptor generation.
pub type Result<T> = std::result::Result<T, Error>;
