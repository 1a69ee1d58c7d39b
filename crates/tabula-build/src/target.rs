//! Package target descriptors.
//!
//! A [`PackageTarget`] is the resolved, immutable form of one [`PackageSpec`]:
//! its entry is an absolute path that exists on disk, its banner is rendered,
//! and its externals predicate is a view over the run's registry snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use rustc_hash::FxHashMap;
use tabula_config::{PackageSpec, is_global_name};
use tracing::trace;

use crate::banner::make_banner_with;
use crate::pipeline::Pipeline;
use crate::registry::ExternalPolicy;
use crate::{Error, Result};

/// One publishable package, resolved against the workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageTarget {
    pub(crate) name: String,
    pub(crate) input: PathBuf,
    pub(crate) package_dir: PathBuf,
    pub(crate) build_dir: PathBuf,
    pub(crate) output_file: String,
    pub(crate) js_name: String,
    pub(crate) banner: String,
    pub(crate) external: ExternalPolicy,
}

impl PackageTarget {
    /// Library display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the resolved entry module.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Package directory relative to the workspace root.
    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    /// Absolute build directory all outputs of this package land in.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn output_file(&self) -> &str {
        &self.output_file
    }

    pub fn js_name(&self) -> &str {
        &self.js_name
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }

    pub fn external(&self) -> &ExternalPolicy {
        &self.external
    }
}

/// Builds the [`PackageTarget`]s of one pipeline run.
///
/// The builder remembers every `js_name` and build directory it has handed
/// out, so a second package claiming either fails instead of silently
/// shadowing or overwriting the first one.
pub struct TargetBuilder<'a> {
    pipeline: &'a Pipeline,
    claimed_names: FxHashMap<String, String>,
    claimed_dirs: FxHashMap<PathBuf, String>,
}

impl<'a> TargetBuilder<'a> {
    pub fn new(pipeline: &'a Pipeline) -> Self {
        Self {
            pipeline,
            claimed_names: FxHashMap::default(),
            claimed_dirs: FxHashMap::default(),
        }
    }

    /// Resolve one package.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidJsName`] if `js_name` is not a JavaScript identifier
    /// - [`Error::DuplicateJsName`] if an earlier package claimed the same `js_name`
    /// - [`Error::GlobalNameConflict`] if a registry entry other than the
    ///   package's own `import_name` uses `js_name` as its global
    /// - [`Error::ImportNameMismatch`] if the package's `import_name` is
    ///   external under a global other than `js_name`
    /// - [`Error::DuplicateBuildDir`] if an earlier package builds into the
    ///   same directory (`pkg/a` and `./pkg/a` are the same directory)
    /// - [`Error::EntryNotFound`] if the entry does not resolve to a file
    pub fn build(&mut self, spec: &PackageSpec) -> Result<PackageTarget> {
        if !is_global_name(&spec.js_name) {
            return Err(Error::InvalidJsName {
                package: spec.name.clone(),
                js_name: spec.js_name.clone(),
            });
        }

        if let Some(first) = self.claimed_names.get(&spec.js_name) {
            return Err(Error::DuplicateJsName {
                js_name: spec.js_name.clone(),
                first: first.clone(),
                second: spec.name.clone(),
            });
        }

        let registry = self.pipeline.registry();
        if let Some(identifier) = registry.identifier_for_global(&spec.js_name) {
            if spec.import_name.as_deref() != Some(identifier) {
                return Err(Error::GlobalNameConflict {
                    package: spec.name.clone(),
                    js_name: spec.js_name.clone(),
                    identifier: identifier.to_string(),
                });
            }
        }

        // Siblings import this package through its registry global, so the
        // bundle must expose exactly that name.
        if let Some(import_name) = spec.import_name.as_deref() {
            if let Some(global) = registry.global_name_for(import_name) {
                if global != spec.js_name {
                    return Err(Error::ImportNameMismatch {
                        package: spec.name.clone(),
                        import_name: import_name.to_string(),
                        js_name: spec.js_name.clone(),
                        global: global.to_string(),
                    });
                }
            }
        }

        let package_dir = spec.dir.clean();
        let absolute_dir = self.pipeline.root().join(&package_dir).clean();
        let build_dir = absolute_dir.join(&self.pipeline.options().output.dir).clean();

        if let Some(first) = self.claimed_dirs.get(&build_dir) {
            return Err(Error::DuplicateBuildDir {
                dir: build_dir,
                first: first.clone(),
                second: spec.name.clone(),
            });
        }

        let input = resolve_entry(
            &absolute_dir.join(&spec.entry),
            &self.pipeline.options().resolve.extensions,
        )
        .ok_or_else(|| Error::EntryNotFound {
            package: spec.name.clone(),
            path: absolute_dir.join(&spec.entry).clean(),
        })?;

        trace!(package = %spec.name, input = %input.display(), "resolved entry");

        self.claimed_names.insert(spec.js_name.clone(), spec.name.clone());
        self.claimed_dirs.insert(build_dir.clone(), spec.name.clone());

        Ok(PackageTarget {
            name: spec.name.clone(),
            input,
            build_dir,
            package_dir,
            output_file: spec.output_file().to_string(),
            js_name: spec.js_name.clone(),
            banner: make_banner_with(&spec.name, self.pipeline.banner_options()),
            external: ExternalPolicy::new(Arc::clone(self.pipeline.shared_registry())),
        })
    }
}

/// Resolve `entry` to an existing file, trying it as given and then with each
/// extension appended (`src/index` -> `src/index.ts`, `src/index.tsx`).
fn resolve_entry(entry: &Path, extensions: &[String]) -> Option<PathBuf> {
    let entry = entry.clean();
    if entry.is_file() {
        return Some(entry);
    }

    extensions.iter().find_map(|ext| {
        let mut candidate = entry.clone().into_os_string();
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        candidate.is_file().then_some(candidate)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extensions() -> Vec<String> {
        vec![".ts".to_string(), ".tsx".to_string()]
    }

    #[test]
    fn resolve_entry_appends_extensions_in_order() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.tsx"), "export {}").unwrap();

        let resolved = resolve_entry(&src.join("index"), &extensions()).unwrap();
        assert_eq!(resolved, src.join("index.tsx"));

        fs::write(src.join("index.ts"), "export {}").unwrap();
        let resolved = resolve_entry(&src.join("index"), &extensions()).unwrap();
        assert_eq!(resolved, src.join("index.ts"));
    }

    #[test]
    fn resolve_entry_accepts_explicit_file_and_cleans_path() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("main.tsx"), "export {}").unwrap();

        let resolved = resolve_entry(&temp.path().join("./lib/../src/main.tsx"), &[]).unwrap();
        assert_eq!(resolved, src.join("main.tsx"));
    }

    #[test]
    fn resolve_entry_misses() {
        let temp = tempfile::tempdir().unwrap();
        assert!(resolve_entry(&temp.path().join("src/index"), &extensions()).is_none());
    }
}
