//! Transformation stages of a build descriptor's pipeline.

use std::path::PathBuf;

use regex::Regex;
use serde::{Serialize, Serializer};
use tabula_config::{ConfigError, HelperMode, TransformOptions};

use crate::Result;
use crate::mode::InlineMode;

/// One step of a descriptor's ordered pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "kebab-case")]
pub enum Stage {
    /// Lower source syntax (TypeScript/JSX) to the target syntax.
    Lower(LowerOptions),
    /// Resolve bare module specifiers, leaving externals untouched.
    Resolve(NodeResolveOptions),
    /// Inline the runtime mode as a literal.
    InlineMode(InlineMode),
    Minify(MinifyOptions),
    /// Report the emitted bundle size.
    MeasureSize,
    /// Write a bundle composition report.
    AnalyzeBundle(AnalyzeOptions),
}

/// Discriminant of a [`Stage`], for ordering checks and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Lower,
    Resolve,
    InlineMode,
    Minify,
    MeasureSize,
    AnalyzeBundle,
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Self::Lower(_) => StageKind::Lower,
            Self::Resolve(_) => StageKind::Resolve,
            Self::InlineMode(_) => StageKind::InlineMode,
            Self::Minify(_) => StageKind::Minify,
            Self::MeasureSize => StageKind::MeasureSize,
            Self::AnalyzeBundle(_) => StageKind::AnalyzeBundle,
        }
    }
}

/// Parameters of the [`Stage::Lower`] step.
#[derive(Debug, Clone, Serialize)]
pub struct LowerOptions {
    pub helpers: HelperMode,
    /// Source paths matching this pattern are not lowered.
    #[serde(serialize_with = "serialize_regex")]
    pub exclude: Regex,
    pub extensions: Vec<String>,
}

impl LowerOptions {
    /// # Errors
    ///
    /// Fails when `transform.exclude` is not a valid regular expression.
    pub fn new(transform: &TransformOptions, extensions: Vec<String>) -> Result<Self> {
        let exclude = Regex::new(&transform.exclude).map_err(|e| ConfigError::InvalidValue {
            field: "transform.exclude".to_string(),
            hint: Some(e.to_string()),
        })?;

        Ok(Self {
            helpers: transform.helpers,
            exclude,
            extensions,
        })
    }

    /// Whether a source file is left as-is by the lowering step.
    pub fn excludes(&self, path: &str) -> bool {
        self.exclude.is_match(path)
    }
}

impl PartialEq for LowerOptions {
    fn eq(&self, other: &Self) -> bool {
        self.helpers == other.helpers
            && self.exclude.as_str() == other.exclude.as_str()
            && self.extensions == other.extensions
    }
}

fn serialize_regex<S: Serializer>(
    regex: &Regex,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(regex.as_str())
}

/// Parameters of the [`Stage::Resolve`] step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeResolveOptions {
    pub extensions: Vec<String>,
}

/// Parameters of the [`Stage::Minify`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinifyOptions {
    /// Rename local identifiers.
    pub mangle: bool,
    /// Dead-code elimination and expression folding.
    pub compress: bool,
}

impl MinifyOptions {
    /// Identifier mangling and compression both enabled.
    pub fn full() -> Self {
        Self {
            mangle: true,
            compress: true,
        }
    }
}

/// Format of a bundle composition report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Human-readable treemap.
    Html,
    /// Machine-readable data.
    Json,
}

/// Parameters of the [`Stage::AnalyzeBundle`] step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeOptions {
    pub report: ReportKind,
    pub filename: PathBuf,
    /// Include gzip-compressed sizes.
    pub gzip_size: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(extensions: &[&str]) -> LowerOptions {
        let extensions = extensions.iter().map(|e| e.to_string()).collect();
        LowerOptions::new(&TransformOptions::default(), extensions).unwrap()
    }

    #[test]
    fn lower_excludes_node_modules() {
        let lower = lower(&[".ts", ".tsx"]);
        assert!(lower.excludes("/repo/node_modules/react/index.js"));
        assert!(!lower.excludes("/repo/packages/core/src/index.tsx"));
        assert_eq!(lower.helpers, HelperMode::Bundled);
    }

    #[test]
    fn stages_serialize_with_tag() {
        let json = serde_json::to_value(Stage::Minify(MinifyOptions::full())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "stage": "minify", "mangle": true, "compress": true })
        );

        let json = serde_json::to_value(Stage::MeasureSize).unwrap();
        assert_eq!(json, serde_json::json!({ "stage": "measure-size" }));

        let json = serde_json::to_value(Stage::Lower(lower(&[".ts"]))).unwrap();
        assert_eq!(json["exclude"], serde_json::json!("node_modules"));
        assert_eq!(json["helpers"], serde_json::json!("bundled"));
    }

    #[test]
    fn lower_rejects_invalid_exclude_pattern() {
        let transform = TransformOptions {
            exclude: "node_modules(".into(),
            ..TransformOptions::default()
        };
        assert!(LowerOptions::new(&transform, vec![]).is_err());
    }
}
