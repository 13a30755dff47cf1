//! Command line argument parsing.
//!
//! The tool is designed to "just work": point it at a frozen executable
//! tree, and metadata comes from the project's Cargo.toml.

use std::path::PathBuf;

use clap::Parser;
use uuid::Uuid;

/// Package a frozen executable tree as a Windows Installer (.msi)
#[derive(Parser, Debug)]
#[command(
    name = "msiforge",
    version,
    about = "Package a frozen executable tree as a Windows Installer (.msi)",
    long_about = "Create a Windows Installer package from a directory of frozen \
executables using the WiX toolset (heat, candle, light).

Usage:
  msiforge build/exe
  msiforge build/exe --target-name widget-setup
  msiforge build/exe --add-to-path --license COPYING"
)]
pub struct Args {
    /// Frozen executable tree to package
    #[arg(value_name = "TREE")]
    pub tree: PathBuf,

    /// Cargo.toml supplying the package metadata
    #[arg(long, value_name = "PATH", default_value = "Cargo.toml")]
    pub manifest: PathBuf,

    /// Output directory for the finished installer
    #[arg(long, value_name = "DIR", default_value = "dist")]
    pub dist_dir: PathBuf,

    /// Name of the .msi file to create
    #[arg(long, value_name = "NAME")]
    pub target_name: Option<String>,

    /// Initial target directory offered by the installer UI
    #[arg(long, value_name = "DIR")]
    pub initial_target_dir: Option<String>,

    /// Upgrade code GUID shared by all versions of the product
    #[arg(long, value_name = "GUID")]
    pub upgrade_code: Option<Uuid>,

    /// Product code GUID for this exact build
    #[arg(long, value_name = "GUID")]
    pub product_code: Option<Uuid>,

    /// Add the install directory to the PATH environment variable
    #[arg(long)]
    pub add_to_path: bool,

    /// Plain-text license file to convert for the installer dialog
    #[arg(long, value_name = "PATH")]
    pub license: Option<PathBuf>,

    /// Custom WiX authoring template (.wxs handlebars file)
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Target triple to package for
    #[arg(long, value_name = "TRIPLE", env = "TARGET")]
    pub target: Option<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
