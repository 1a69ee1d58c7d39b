//! License banner prefixed to every emitted file.
//!
//! The text is byte-stable for a given name and options so published
//! artifacts can be diffed across releases.

use tabula_config::BannerOptions;

/// Banner for `library_name` with the default holder and license.
pub fn make_banner(library_name: &str) -> String {
    make_banner_with(library_name, &BannerOptions::default())
}

/// Banner for `library_name` with explicit holder and license options.
pub fn make_banner_with(library_name: &str, options: &BannerOptions) -> String {
    let BannerOptions {
        holder,
        license,
        license_file,
    } = options;

    format!(
        "/**
 * {library_name}
 *
 * Copyright (c) {holder}
 *
 * This source code is licensed under the {license} license found in the
 * {license_file} file in the root directory of this source tree.
 *
 * @license {license}
 */"
    )
}
