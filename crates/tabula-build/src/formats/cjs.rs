//! CommonJS output.

use super::{FormatBuilder, FormatOptions, descriptor};
use crate::Result;
use crate::descriptor::{BuildDescriptor, ExportMode, ModuleFormat, OutputLocation};
use crate::target::PackageTarget;

/// CommonJS written to `<build>/cjs`.
///
/// One output file per source module, so consumers can deep-import, and named
/// exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cjs;

impl FormatBuilder for Cjs {
    fn format(&self) -> ModuleFormat {
        ModuleFormat::Cjs
    }

    fn build(&self, target: &PackageTarget, options: &FormatOptions) -> Result<BuildDescriptor> {
        let output = OutputLocation::Dir(target.build_dir().join("cjs"));
        let mut descriptor = descriptor(target, self.format(), output, options.base_stages());
        descriptor.preserve_modules = true;
        descriptor.exports = ExportMode::Named;
        Ok(descriptor)
    }
}
