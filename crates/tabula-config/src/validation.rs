//! Schema validation for loaded configuration
//!
//! Checks what can be checked without touching the filesystem. Entry resolution
//! and cross-package global-name checks happen when the build pipeline is assembled.

use std::collections::HashSet;

use path_clean::PathClean;

use crate::config::TabulaConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &TabulaConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use tabula_config::{ConfigValidator, PackageSpec, SchemaValidator, TabulaConfig};
///
/// let config = TabulaConfig::default()
///     .with_global("react", "React")
///     .with_package(PackageSpec::new("packages/core", "core", "Core", "src/index"));
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &TabulaConfig) -> Result<()> {
        if config.packages.is_empty() {
            return Err(ConfigError::NoPackages);
        }

        for (identifier, global) in &config.globals {
            if identifier.trim().is_empty() {
                return Err(ConfigError::schema(
                    "external identifiers cannot be empty",
                    "Remove empty keys from the 'globals' table",
                ));
            }
            if !is_global_name(global) {
                return Err(ConfigError::schema(
                    format!("'{global}' is not a valid global name for '{identifier}'"),
                    "Use a JavaScript identifier such as 'React'",
                ));
            }
        }

        let mut dirs = HashSet::new();
        for package in &config.packages {
            if package.dir.as_os_str().is_empty() {
                return Err(ConfigError::schema(
                    format!("package '{}' has an empty directory", package.name),
                    "Set 'dir' relative to the workspace root",
                ));
            }
            if package.name.trim().is_empty() {
                return Err(ConfigError::schema(
                    format!("package in '{}' has an empty name", package.dir.display()),
                    "Set 'name' to the library display name",
                ));
            }
            if package.entry.as_os_str().is_empty() {
                return Err(ConfigError::schema(
                    format!("package '{}' has an empty entry", package.name),
                    "Set 'entry' relative to the package directory",
                ));
            }
            if !is_global_name(&package.js_name) {
                return Err(ConfigError::schema(
                    format!(
                        "package '{}' has invalid js_name '{}'",
                        package.name, package.js_name
                    ),
                    "Use a JavaScript identifier, optionally dotted (e.g. 'Acme.Table')",
                ));
            }
            if !dirs.insert(package.dir.clean()) {
                return Err(ConfigError::schema(
                    format!("package directory '{}' is listed twice", package.dir.display()),
                    "Each package must appear once in 'packages'",
                ));
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &TabulaConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Whether `name` can be assigned as a UMD global: one or more JavaScript
/// identifiers joined by dots.
pub fn is_global_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
