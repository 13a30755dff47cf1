//! Command line interface for msiforge.
//!
//! Argument parsing plus the glue that merges CLI flags over manifest
//! metadata into resolved bundler [`Settings`].

mod args;

pub use args::Args;

use crate::bundler::{Result, Settings, SettingsBuilder};
use crate::metadata;

/// Builds resolved [`Settings`] from parsed arguments.
///
/// Metadata comes from the manifest; any flag given on the command line
/// overrides the corresponding `[package.metadata.msi]` value.
pub fn settings_from_args(args: &Args) -> Result<Settings> {
    let manifest = metadata::load_manifest(&args.manifest)?;

    let mut msi = manifest.msi;
    if let Some(name) = &args.target_name {
        msi.target_name = Some(name.clone());
    }
    if let Some(dir) = &args.initial_target_dir {
        msi.initial_target_dir = Some(dir.clone());
    }
    if let Some(code) = args.upgrade_code {
        msi.upgrade_code = Some(code);
    }
    if let Some(code) = args.product_code {
        msi.product_code = Some(code);
    }
    if args.add_to_path {
        msi.add_to_path = true;
    }
    if let Some(license) = &args.license {
        msi.license = Some(license.clone());
    }
    if let Some(template) = &args.template {
        msi.template = Some(template.clone());
    }

    let mut builder = SettingsBuilder::new()
        .build_tree(&args.tree)
        .dist_dir(&args.dist_dir)
        .project_dir(&manifest.project_dir)
        .package_settings(manifest.package)
        .msi_settings(msi);
    if let Some(target) = &args.target {
        builder = builder.target(target.clone());
    }

    builder.build()
}
