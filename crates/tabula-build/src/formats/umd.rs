//! UMD bundles, development and production flavors.

use indexmap::IndexMap;
use tabula_config::UmdNaming;

use super::{FormatBuilder, FormatOptions, descriptor};
use crate::descriptor::{
    AnalyzeOptions, BuildDescriptor, MinifyOptions, ModuleFormat, OutputLocation, ReportKind,
    Stage,
};
use crate::mode::{BuildMode, inline_mode};
use crate::target::PackageTarget;
use crate::{Error, Result};

/// Single-file UMD bundle with the mode inlined as `"development"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UmdDevelopment;

/// Minified single-file UMD bundle with the mode inlined as `"production"`,
/// followed by size measurement and the two bundle reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct UmdProduction;

impl FormatBuilder for UmdDevelopment {
    fn format(&self) -> ModuleFormat {
        ModuleFormat::UmdDevelopment
    }

    fn build(&self, target: &PackageTarget, options: &FormatOptions) -> Result<BuildDescriptor> {
        umd_descriptor(target, options, BuildMode::Development, Vec::new())
    }
}

impl FormatBuilder for UmdProduction {
    fn format(&self) -> ModuleFormat {
        ModuleFormat::UmdProduction
    }

    fn build(&self, target: &PackageTarget, options: &FormatOptions) -> Result<BuildDescriptor> {
        let build_dir = target.build_dir();
        let tail = vec![
            Stage::Minify(MinifyOptions::full()),
            Stage::MeasureSize,
            Stage::AnalyzeBundle(AnalyzeOptions {
                report: ReportKind::Html,
                filename: build_dir.join(&options.output.stats_html),
                gzip_size: true,
            }),
            Stage::AnalyzeBundle(AnalyzeOptions {
                report: ReportKind::Json,
                filename: build_dir.join(&options.output.stats_json),
                gzip_size: true,
            }),
        ];
        umd_descriptor(target, options, BuildMode::Production, tail)
    }
}

fn umd_descriptor(
    target: &PackageTarget,
    options: &FormatOptions,
    mode: BuildMode,
    tail: Vec<Stage>,
) -> Result<BuildDescriptor> {
    if target.js_name().is_empty() {
        return Err(Error::InvalidJsName {
            package: target.name().to_string(),
            js_name: String::new(),
        });
    }

    let format = match mode {
        BuildMode::Development => ModuleFormat::UmdDevelopment,
        BuildMode::Production => ModuleFormat::UmdProduction,
    };

    let stem = match options.output.umd_naming {
        UmdNaming::Index => "index",
        UmdNaming::OutputFile => target.output_file(),
    };
    let file = target.build_dir().join("umd").join(format!("{stem}.{mode}.js"));

    let mut pipeline = options.base_stages();
    pipeline.push(Stage::InlineMode(inline_mode(mode)));
    pipeline.extend(tail);

    let mut descriptor = descriptor(target, format, OutputLocation::File(file), pipeline);
    descriptor.umd_name = Some(target.js_name().to_string());
    descriptor.module_name_mapping = Some(module_name_mapping(target));
    Ok(descriptor)
}

/// Every external identifier mapped to its registry global.
///
/// The mapping is copied straight from the registry snapshot behind the
/// target's externals, so it holds exactly the identifiers that predicate
/// marks external. Checked lookups of single identifiers go through
/// [`GlobalRegistry::require_global`](crate::GlobalRegistry::require_global).
fn module_name_mapping(target: &PackageTarget) -> IndexMap<String, String> {
    target
        .external()
        .registry()
        .entries()
        .map(|(identifier, global)| (identifier.to_string(), global.to_string()))
        .collect()
}
