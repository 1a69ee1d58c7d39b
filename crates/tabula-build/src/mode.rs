//! Build-mode inlining.
//!
//! UMD bundles have the runtime-mode flag replaced by a string literal at build
//! time so minifiers can drop debug-only branches. The substitution is a bare
//! token replacement, not an expression-aware transform: every occurrence of
//! the sentinel is replaced, including inside strings and template literals,
//! and a longer identifier that merely starts with the sentinel has that prefix
//! replaced too. Executors must reproduce [`InlineMode::apply`] exactly.

use serde::Serialize;

/// Token replaced by the mode literal.
pub const MODE_SENTINEL: &str = "process.env.NODE_ENV";

/// Runtime mode a UMD flavor is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substitution rule inlining the runtime mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineMode {
    mode: BuildMode,
    sentinel: String,
    replacement: String,
    /// Leave `sentinel = value` assignments untouched.
    prevent_assignment: bool,
}

/// Create the mode-inlining rule for `mode`.
///
/// # Example
///
/// ```
/// use tabula_build::{BuildMode, inline_mode};
///
/// let rule = inline_mode(BuildMode::Production);
/// assert_eq!(
///     rule.apply("if (process.env.NODE_ENV !== 'production') warn()"),
///     "if (\"production\" !== 'production') warn()"
/// );
/// ```
pub fn inline_mode(mode: BuildMode) -> InlineMode {
    InlineMode {
        mode,
        sentinel: MODE_SENTINEL.to_string(),
        replacement: format!("\"{}\"", mode.as_str()),
        prevent_assignment: true,
    }
}

impl InlineMode {
    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Quoted literal written in place of the sentinel.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn prevents_assignment(&self) -> bool {
        self.prevent_assignment
    }

    /// Apply the substitution to `source`.
    pub fn apply(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut last = 0;

        for (start, matched) in source.match_indices(self.sentinel.as_str()) {
            let end = start + matched.len();
            if self.prevent_assignment && is_assignment(&source[end..]) {
                continue;
            }
            out.push_str(&source[last..start]);
            out.push_str(&self.replacement);
            last = end;
        }

        out.push_str(&source[last..]);
        out
    }
}

// `=` followed by anything but a second `=`; `==`/`===` are comparisons.
fn is_assignment(rest: &str) -> bool {
    let mut chars = rest.trim_start().chars();
    chars.next() == Some('=') && chars.next().is_some_and(|c| c != '=')
}
