use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_holder() -> String {
    "TanStack".to_string()
}

pub(crate) fn default_license() -> String {
    "MIT".to_string()
}

pub(crate) fn default_license_file() -> String {
    "LICENSE.md".to_string()
}

pub(crate) fn default_extensions() -> Vec<String> {
    vec![".ts".to_string(), ".tsx".to_string()]
}

pub(crate) fn default_exclude() -> String {
    "node_modules".to_string()
}

pub(crate) fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

pub(crate) fn default_stats_html() -> String {
    "stats-html.html".to_string()
}

pub(crate) fn default_stats_json() -> String {
    "stats-react.json".to_string()
}
