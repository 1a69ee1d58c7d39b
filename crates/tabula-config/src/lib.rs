//! # tabula-config
//!
//! Static input model for the Tabula build matrix: package metadata, the
//! external globals table, banner and output settings, plus discovery and
//! schema validation of `tabula.toml` / `package.json#tabula`.

pub mod config;
pub mod discovery;
pub mod error;
pub mod options;
pub mod settings;
pub mod validation;

// Re-export main types
pub use config::*;
pub use error::*;
pub use options::*;
pub use settings::*;

// Re-export discovery and validation
pub use discovery::{CONFIG_FILE, ConfigDiscovery, ENV_PREFIX, discover};
pub use validation::{ConfigValidator, SchemaValidator, is_global_name, validate_schema};
