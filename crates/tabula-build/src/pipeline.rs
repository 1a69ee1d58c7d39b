//! Pipeline assembler.
//!
//! Turns an ordered list of packages into the ordered list of build
//! descriptors: for each package, in input order, `[esm, cjs, umd-dev,
//! umd-prod]`. Assembly is synchronous and pure apart from checking that entry
//! files exist; any failure aborts the whole run before a single descriptor is
//! returned.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use tabula_config::{BannerOptions, PackageSpec, TabulaConfig, validate_schema};
use tracing::{debug, info};

use crate::Result;
use crate::descriptor::BuildDescriptor;
use crate::formats::{FormatOptions, builders};
use crate::registry::GlobalRegistry;
use crate::target::{PackageTarget, TargetBuilder};

/// Everything one run shares: the registry snapshot, banner metadata and the
/// format options.
///
/// A pipeline is immutable. Changing the registry means constructing a new
/// pipeline and rebuilding every descriptor.
#[derive(Debug, Clone)]
pub struct Pipeline {
    root: PathBuf,
    registry: Arc<GlobalRegistry>,
    banner: BannerOptions,
    options: FormatOptions,
}

impl Pipeline {
    /// Create a pipeline rooted at `root`.
    ///
    /// A relative `root` is resolved against the current directory.
    pub fn new(
        root: impl AsRef<Path>,
        registry: GlobalRegistry,
        banner: BannerOptions,
        options: FormatOptions,
    ) -> Result<Self> {
        let root = root.as_ref();
        let root = if root.is_absolute() {
            root.clean()
        } else {
            std::env::current_dir()?.join(root).clean()
        };

        Ok(Self {
            root,
            registry: Arc::new(registry),
            banner,
            options,
        })
    }

    /// Pipeline described by a loaded config.
    pub fn from_config(root: impl AsRef<Path>, config: &TabulaConfig) -> Result<Self> {
        Self::new(
            root,
            GlobalRegistry::from_config(config)?,
            config.banner.clone(),
            FormatOptions::from_config(config)?,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> &GlobalRegistry {
        &self.registry
    }

    pub(crate) fn shared_registry(&self) -> &Arc<GlobalRegistry> {
        &self.registry
    }

    pub fn banner_options(&self) -> &BannerOptions {
        &self.banner
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Resolve every package into its target descriptor.
    ///
    /// # Errors
    ///
    /// The first package that fails to resolve aborts the run; see
    /// [`TargetBuilder::build`].
    pub fn targets(&self, packages: &[PackageSpec]) -> Result<Vec<PackageTarget>> {
        let mut builder = TargetBuilder::new(self);
        packages.iter().map(|spec| builder.build(spec)).collect()
    }

    /// Build the descriptors of every package, four per package.
    ///
    /// All packages are resolved before any descriptor is built, so a bad
    /// package late in the list fails the run without work being done for the
    /// ones before it.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tabula_build::{GlobalRegistry, Pipeline, FormatOptions};
    /// use tabula_config::{BannerOptions, PackageSpec, TabulaConfig};
    ///
    /// let registry = GlobalRegistry::new([("dep-a", "DepA")])?;
    /// let options = FormatOptions::from_config(&TabulaConfig::default())?;
    /// let pipeline = Pipeline::new(".", registry, BannerOptions::default(), options)?;
    ///
    /// let packages = [PackageSpec::new("pkg/core", "core", "Core", "src/index")];
    /// let descriptors = pipeline.build_all(&packages)?;
    /// assert_eq!(descriptors.len(), 4);
    /// # Ok::<(), tabula_build::Error>(())
    /// ```
    pub fn build_all(&self, packages: &[PackageSpec]) -> Result<Vec<BuildDescriptor>> {
        let targets = self.targets(packages)?;

        let mut descriptors = Vec::with_capacity(targets.len() * 4);
        for target in &targets {
            for builder in builders() {
                let descriptor = builder.build(target, &self.options)?;
                debug!(
                    target = %descriptor.label(),
                    output = %descriptor.output().path().display(),
                    stages = descriptor.pipeline().len(),
                    "built descriptor"
                );
                descriptors.push(descriptor);
            }
        }

        info!(
            packages = targets.len(),
            descriptors = descriptors.len(),
            externals = self.registry.len(),
            "assembled build descriptors"
        );

        Ok(descriptors)
    }
}

/// Validate `config` and build every descriptor it describes.
pub fn build_config(root: impl AsRef<Path>, config: &TabulaConfig) -> Result<Vec<BuildDescriptor>> {
    validate_schema(config)?;
    Pipeline::from_config(root, config)?.build_all(&config.packages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_root_is_made_absolute() {
        let pipeline = Pipeline::from_config("some/../ws", &TabulaConfig::default()).unwrap();
        assert!(pipeline.root().is_absolute());
        assert!(pipeline.root().ends_with("ws"));
    }

    #[test]
    fn empty_package_list_builds_nothing() {
        let pipeline = Pipeline::from_config("/ws", &TabulaConfig::default()).unwrap();
        assert!(pipeline.build_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn registry_comes_from_globals_table() {
        let config = TabulaConfig::default()
            .with_global("react", "React")
            .with_global("react-dom", "ReactDOM");
        let pipeline = Pipeline::from_config("/ws", &config).unwrap();

        let ids: Vec<_> = pipeline.registry().identifiers().collect();
        assert_eq!(ids, vec!["react", "react-dom"]);
    }
}
