//! Windows Installer bundler for frozen executable trees.
//!
//! This module turns a directory of frozen executables and support files
//! into a distributable .msi package by orchestrating the external WiX
//! toolset (harvest, compile, link) and converting the project license to
//! rich text for the installer UI.
//!
//! # Build Requirements
//!
//! | Step | Tool |
//! |------|------|
//! | Harvest | `heat` |
//! | Compile | `candle` |
//! | Link | `light` (with `WixUIExtension`) |
//!
//! The toolset is located via the `WIX` environment variable or PATH.
//!
//! # Example
//!
//! ```no_run
//! use msiforge::bundler::{Bundler, PackageSettings, SettingsBuilder};
//!
//! # async fn example() -> msiforge::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .build_tree("build/exe")
//!     .package_settings(PackageSettings {
//!         product_name: "Widget".into(),
//!         version: "1.0.0".into(),
//!         description: "A widget".into(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let artifact = Bundler::new(settings).bundle().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
pub mod error;
pub mod rtf;
mod settings;
pub mod wix;

// Public re-exports
pub use builder::Bundler;
pub use error::{Error, Result};
pub use settings::{MsiArch, MsiSettings, PackageSettings, Settings, SettingsBuilder};

/// A bundled artifact result describing the created installer.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Paths to all files created as part of this bundle.
    pub paths: Vec<std::path::PathBuf>,

    /// Total size of the artifact in bytes.
    pub size: u64,

    /// SHA-256 checksum of the installer for integrity verification.
    ///
    /// This can be published alongside the artifact for users to verify
    /// downloads.
    pub checksum: String,
}
