//! ES module output.

use super::{FormatBuilder, FormatOptions, descriptor};
use crate::Result;
use crate::descriptor::{BuildDescriptor, ModuleFormat, OutputLocation};
use crate::target::PackageTarget;

/// ES modules written to `<build>/esm`, with lower and resolve stages only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Esm;

impl FormatBuilder for Esm {
    fn format(&self) -> ModuleFormat {
        ModuleFormat::Esm
    }

    fn build(&self, target: &PackageTarget, options: &FormatOptions) -> Result<BuildDescriptor> {
        let output = OutputLocation::Dir(target.build_dir().join("esm"));
        Ok(descriptor(target, self.format(), output, options.base_stages()))
    }
}
