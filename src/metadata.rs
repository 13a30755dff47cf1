//! Package metadata loading from `Cargo.toml`.
//!
//! Installer values come from the `[package]` section; installer-specific
//! options live in `[package.metadata.msi]`:
//!
//! ```toml
//! [package.metadata.msi]
//! identifier = "com.acme.widget"
//! publisher = "Acme Inc."
//! upgrade_code = "9a4ed1a6-7c3b-4f5e-9e56-6a2b15a05d7c"
//! add_to_path = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::{MsiSettings, PackageSettings};

/// Manifest contents relevant to installer packaging.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Package metadata from `[package]`.
    pub package: PackageSettings,
    /// Installer options from `[package.metadata.msi]`.
    pub msi: MsiSettings,
    /// Directory containing the manifest, used for license probing.
    pub project_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    package: RawPackage,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    name: String,
    version: String,
    description: Option<String>,
    authors: Option<Vec<String>>,
    homepage: Option<String>,
    metadata: Option<RawMetadata>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    msi: Option<RawMsi>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMsi {
    identifier: Option<String>,
    publisher: Option<String>,
    upgrade_code: Option<String>,
    product_code: Option<String>,
    add_to_path: Option<bool>,
    initial_target_dir: Option<String>,
    target_name: Option<String>,
    license: Option<PathBuf>,
    template: Option<PathBuf>,
}

/// Loads installer metadata from a `Cargo.toml`.
///
/// # Errors
///
/// Fails when the file cannot be read, is not valid TOML, or carries a
/// malformed GUID in `[package.metadata.msi]`.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path).fs_context("reading manifest", path)?;
    let raw: RawManifest = toml::from_str(&content)?;

    let project_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let msi = raw.package.metadata.and_then(|m| m.msi).unwrap_or_default();

    Ok(Manifest {
        package: PackageSettings {
            product_name: raw.package.name,
            version: raw.package.version,
            description: raw.package.description.unwrap_or_default(),
            homepage: raw.package.homepage,
            authors: raw.package.authors,
        },
        msi: MsiSettings {
            identifier: msi.identifier,
            publisher: msi.publisher,
            upgrade_code: parse_guid(msi.upgrade_code.as_deref())?,
            product_code: parse_guid(msi.product_code.as_deref())?,
            add_to_path: msi.add_to_path.unwrap_or(false),
            initial_target_dir: msi.initial_target_dir,
            target_name: msi.target_name,
            license: resolve_relative(msi.license, &project_dir),
            template: resolve_relative(msi.template, &project_dir),
        },
        project_dir,
    })
}

fn parse_guid(value: Option<&str>) -> Result<Option<Uuid>> {
    value.map(Uuid::parse_str).transpose().map_err(Into::into)
}

/// Paths in the manifest are relative to the manifest itself.
fn resolve_relative(path: Option<PathBuf>, project_dir: &Path) -> Option<PathBuf> {
    path.map(|p| {
        if p.is_absolute() {
            p
        } else {
            project_dir.join(p)
        }
    })
}
