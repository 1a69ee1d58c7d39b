//! Format descriptor builders.
//!
//! Each builder turns one [`PackageTarget`] into the [`BuildDescriptor`] of a
//! single output format. All four share the lowering and resolution stages
//! from one [`FormatOptions`] value, so every descriptor of a run is built
//! with identical transformation rules.

mod cjs;
mod esm;
mod umd;

use tabula_config::{OutputOptions, TabulaConfig};

use crate::Result;
use crate::descriptor::{
    BuildDescriptor, ExportMode, LowerOptions, ModuleFormat, NodeResolveOptions, OutputLocation,
    Stage,
};
use crate::target::PackageTarget;

pub use cjs::Cjs;
pub use esm::Esm;
pub use umd::{UmdDevelopment, UmdProduction};

/// A builder for one fixed output format.
pub trait FormatBuilder: Send + Sync {
    /// Format of every descriptor this builder produces.
    fn format(&self) -> ModuleFormat;

    /// Derive the descriptor for `target`.
    fn build(&self, target: &PackageTarget, options: &FormatOptions) -> Result<BuildDescriptor>;
}

/// The builders in emission order.
pub fn builders() -> [&'static dyn FormatBuilder; 4] {
    [&Esm, &Cjs, &UmdDevelopment, &UmdProduction]
}

/// Immutable parameters shared by every format builder of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    pub lower: LowerOptions,
    pub resolve: NodeResolveOptions,
    pub output: OutputOptions,
}

impl FormatOptions {
    /// # Errors
    ///
    /// Fails when `transform.exclude` is not a valid regular expression.
    pub fn from_config(config: &TabulaConfig) -> Result<Self> {
        let extensions = config.resolve.extensions.clone();
        Ok(Self {
            lower: LowerOptions::new(&config.transform, extensions.clone())?,
            resolve: NodeResolveOptions { extensions },
            output: config.output.clone(),
        })
    }

    /// The stages every format starts with: lower, then resolve.
    pub(crate) fn base_stages(&self) -> Vec<Stage> {
        vec![
            Stage::Lower(self.lower.clone()),
            Stage::Resolve(self.resolve.clone()),
        ]
    }
}

/// Descriptor skeleton with the fields every format sets the same way.
pub(crate) fn descriptor(
    target: &PackageTarget,
    format: ModuleFormat,
    output: OutputLocation,
    pipeline: Vec<Stage>,
) -> BuildDescriptor {
    BuildDescriptor {
        package: target.name().to_string(),
        format,
        input: target.input().to_path_buf(),
        external: target.external().clone(),
        output,
        sourcemap: true,
        banner: target.banner().to_string(),
        preserve_modules: false,
        exports: ExportMode::Auto,
        umd_name: None,
        module_name_mapping: None,
        pipeline,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::descriptor::StageKind;
    use crate::registry::{ExternalPolicy, GlobalRegistry};
    use tabula_config::UmdNaming;

    fn target(registry: GlobalRegistry) -> PackageTarget {
        PackageTarget {
            name: "core".into(),
            input: PathBuf::from("/repo/pkg/core/src/index.tsx"),
            package_dir: PathBuf::from("pkg/core"),
            build_dir: PathBuf::from("/repo/pkg/core/build"),
            output_file: "core".into(),
            js_name: "Core".into(),
            banner: crate::make_banner("core"),
            external: ExternalPolicy::new(Arc::new(registry)),
        }
    }

    fn options() -> FormatOptions {
        FormatOptions::from_config(&TabulaConfig::default()).unwrap()
    }

    #[test]
    fn builders_follow_emission_order() {
        let formats: Vec<_> = builders().iter().map(|b| b.format()).collect();
        assert_eq!(formats, ModuleFormat::ALL);
    }

    #[test]
    fn esm_and_cjs_share_base_stages() {
        let target = target(GlobalRegistry::new([("dep-a", "DepA")]).unwrap());
        let options = options();

        let esm = Esm.build(&target, &options).unwrap();
        let cjs = Cjs.build(&target, &options).unwrap();

        assert_eq!(esm.pipeline(), cjs.pipeline());
        assert_eq!(esm.stage_kinds(), vec![StageKind::Lower, StageKind::Resolve]);
        assert_eq!(esm.output(), &OutputLocation::Dir("/repo/pkg/core/build/esm".into()));
        assert!(!esm.preserve_modules());
        assert!(cjs.preserve_modules());
        assert_eq!(cjs.exports(), ExportMode::Named);
        assert!(esm.module_name_mapping().is_none());
        assert!(cjs.umd_name().is_none());
    }

    #[test]
    fn umd_file_naming() {
        let target = target(GlobalRegistry::default());
        let mut options = options();

        let dev = UmdDevelopment.build(&target, &options).unwrap();
        assert_eq!(
            dev.output(),
            &OutputLocation::File("/repo/pkg/core/build/umd/index.development.js".into())
        );

        options.output.umd_naming = UmdNaming::OutputFile;
        let prod = UmdProduction.build(&target, &options).unwrap();
        assert_eq!(
            prod.output(),
            &OutputLocation::File("/repo/pkg/core/build/umd/core.production.js".into())
        );
        assert_eq!(prod.umd_name(), Some("Core"));
    }

    #[test]
    fn umd_production_reports_land_in_build_dir() {
        let target = target(GlobalRegistry::default());
        let prod = UmdProduction.build(&target, &options()).unwrap();

        let reports: Vec<_> = prod
            .pipeline()
            .iter()
            .filter_map(|stage| match stage {
                Stage::AnalyzeBundle(analyze) => Some(analyze.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].report, crate::descriptor::ReportKind::Html);
        assert_eq!(
            reports[0].filename,
            PathBuf::from("/repo/pkg/core/build/stats-html.html")
        );
        assert_eq!(reports[1].report, crate::descriptor::ReportKind::Json);
        assert_eq!(
            reports[1].filename,
            PathBuf::from("/repo/pkg/core/build/stats-react.json")
        );
        assert!(reports.iter().all(|r| r.gzip_size));
    }

    #[test]
    fn umd_rejects_empty_js_name() {
        let mut target = target(GlobalRegistry::default());
        target.js_name = String::new();
        assert!(matches!(
            UmdDevelopment.build(&target, &options()),
            Err(crate::Error::InvalidJsName { .. })
        ));
    }
}
