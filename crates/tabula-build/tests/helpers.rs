//! Shared test utilities for tabula-build tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tabula_build::{FormatOptions, GlobalRegistry, Pipeline};
use tabula_config::{BannerOptions, PackageSpec, TabulaConfig};
use tempfile::TempDir;

/// Create a workspace with one `<dir>/src/index.tsx` per package directory.
pub fn workspace(package_dirs: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for package_dir in package_dirs {
        write_entry(dir.path(), package_dir, "src/index.tsx");
    }
    dir
}

/// Write an entry module at `<root>/<package_dir>/<entry>`.
pub fn write_entry(root: &Path, package_dir: &str, entry: &str) {
    let path = root.join(package_dir).join(entry);
    fs::create_dir_all(path.parent().expect("entry has a parent")).expect("create src");
    fs::write(
        path,
        "export function useTable() {\n  return process.env.NODE_ENV\n}\n",
    )
    .expect("write entry");
}

/// Pipeline with default options over `globals`.
pub fn pipeline(root: &Path, globals: &[(&str, &str)]) -> Pipeline {
    let registry = GlobalRegistry::new(globals.iter().copied()).expect("valid registry");
    let options = FormatOptions::from_config(&TabulaConfig::default()).expect("valid options");
    Pipeline::new(root, registry, BannerOptions::default(), options).expect("pipeline")
}

pub fn package(dir: &str, name: &str, js_name: &str) -> PackageSpec {
    PackageSpec::new(dir, name, js_name, "src/index")
}

/// The react-table workspace: two packages sharing four externals.
pub fn react_table_config() -> TabulaConfig {
    TabulaConfig::default()
        .with_global("react", "React")
        .with_global("react-dom", "ReactDOM")
        .with_global("@tanstack/react-table", "ReactTable")
        .with_global("@tanstack/react-table-devtools", "ReactTableDevtools")
        .with_package(
            PackageSpec::new(
                "packages/react-table",
                "react-table",
                "ReactTable",
                "src/index.tsx",
            )
            .with_import_name("@tanstack/react-table"),
        )
        .with_package(
            PackageSpec::new(
                "packages/react-table-devtools",
                "react-table-devtools",
                "ReactTableDevtools",
                "src/index.tsx",
            )
            .with_import_name("@tanstack/react-table-devtools"),
        )
}
