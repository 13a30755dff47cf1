//! # msiforge
//!
//! Windows Installer (.msi) packaging for frozen executable trees.
//!
//! This crate wraps the external WiX toolset in a single build step:
//! harvest a directory of frozen executables into installer components,
//! compile the authoring, and link the final .msi. The project's
//! plain-text license is converted to rich text for the installer's
//! license dialog.
//!
//! ## Features
//!
//! - **Fixed pipeline**: harvest (`heat`) → compile (`candle`) → link
//!   (`light`), run as external processes against a staging directory
//! - **Computed defaults**: install path, output name, product and
//!   upgrade codes all derive from package metadata when not configured
//! - **License conversion**: plain-text licenses become minimal RTF with
//!   centered signature blocks preserved
//! - **Manifest driven**: metadata from `Cargo.toml`, options from
//!   `[package.metadata.msi]`, overridable on the command line
//!
//! ## Usage
//!
//! ```bash
//! msiforge build/exe                        # package with defaults
//! msiforge build/exe --add-to-path          # extend PATH on install
//! msiforge build/exe --target-name widget   # custom output name
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod bundler;
pub mod cli;
pub mod metadata;

// Re-export main types for public API
pub use bundler::{
    Bundler, BundledArtifact, Error, MsiArch, MsiSettings, PackageSettings, Result, Settings,
    SettingsBuilder,
};
pub use cli::Args;
pub use metadata::{Manifest, load_manifest};
