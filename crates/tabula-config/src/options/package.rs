use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Static metadata of one publishable package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSpec {
    /// Package directory, relative to the workspace root
    pub dir: PathBuf,

    /// Human-readable library name (used in the banner)
    pub name: String,

    /// Global variable exposed when the UMD bundle is loaded as a script
    pub js_name: String,

    /// Entry module, relative to `dir`; the extension may be omitted
    pub entry: PathBuf,

    /// Base name for UMD output files (defaults to `name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,

    /// Bare specifier sibling packages use to import this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_name: Option<String>,
}

impl PackageSpec {
    pub fn new(
        dir: impl Into<PathBuf>,
        name: impl Into<String>,
        js_name: impl Into<String>,
        entry: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
            js_name: js_name.into(),
            entry: entry.into(),
            output_file: None,
            import_name: None,
        }
    }

    pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
        self.output_file = Some(output_file.into());
        self
    }

    pub fn with_import_name(mut self, import_name: impl Into<String>) -> Self {
        self.import_name = Some(import_name.into());
        self
    }

    /// Output base name, falling back to the library name.
    pub fn output_file(&self) -> &str {
        self.output_file.as_deref().unwrap_or(&self.name)
    }
}
