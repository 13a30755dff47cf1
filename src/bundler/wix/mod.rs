//! Windows Installer (.msi) bundling via the WiX toolset.
//!
//! Packaging runs in a fixed sequence against a staging directory:
//!
//! 1. Convert the license file to rich text ([`super::rtf`]), if present.
//! 2. Render the product authoring from the handlebars template
//!    ([`template`]).
//! 3. Harvest the frozen executable tree into a component fragment
//!    (`heat dir`).
//! 4. Compile both authoring files (`candle`).
//! 5. Link the objects into the final .msi (`light`).
//!
//! Directory harvesting and component XML generation belong to `heat`; this
//! module only computes paths and option values and sequences the tools.

pub mod template;
pub mod toolset;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::bail;
use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::rtf;
use crate::bundler::settings::Settings;
use toolset::WixToolset;

/// License file names probed in the project directory, in order.
// TODO: probe LICENSE.md and COPYING variants as well
const LICENSE_CANDIDATES: &[&str] = &["LICENSE", "LICENSE.txt"];

/// Bundle the frozen executable tree as a Windows Installer package.
///
/// Returns a vector with the path to the created .msi file.
pub async fn bundle_project(settings: &Settings) -> Result<Vec<PathBuf>> {
    let target_path = settings.target_path();
    log::info!(
        "Bundling {} ({})",
        settings.product_name(),
        target_path.display()
    );

    validate_build_tree(settings.build_tree())?;
    let toolset = WixToolset::locate()?;

    tokio::fs::create_dir_all(settings.dist_dir())
        .await
        .fs_context("creating dist directory", settings.dist_dir())?;
    if target_path.exists() {
        tokio::fs::remove_file(&target_path)
            .await
            .fs_context("removing old installer", &target_path)?;
    }

    let staging = tempfile::Builder::new()
        .prefix("msiforge-wix-")
        .tempdir()
        .fs_context("creating staging directory", std::env::temp_dir())?;
    let staging_path = staging.path();

    // Stage inputs: license.rtf (optional) and the rendered Product.wxs.
    let license_rtf = stage_license(settings, staging_path).await?;
    let authoring = render_authoring(settings, license_rtf.as_deref()).await?;
    let product_wxs = staging_path.join("Product.wxs");
    tokio::fs::write(&product_wxs, authoring)
        .await
        .fs_context("writing product authoring", &product_wxs)?;

    // External tools run with the staging directory as cwd, so every path
    // handed to them has to be absolute.
    let tree = std::path::absolute(settings.build_tree())
        .fs_context("resolving build tree path", settings.build_tree())?;
    let out = std::path::absolute(&target_path)
        .fs_context("resolving installer path", &target_path)?;

    // Harvest the tree into a component fragment rooted at INSTALLDIR.
    let heat_args: Vec<OsString> = vec![
        "dir".into(),
        tree.into_os_string(),
        "-nologo".into(),
        "-gg".into(),
        "-sfrag".into(),
        "-sreg".into(),
        "-srd".into(),
        "-dr".into(),
        "INSTALLDIR".into(),
        "-cg".into(),
        "AppFiles".into(),
        "-out".into(),
        "Directory.wxs".into(),
    ];
    toolset.run("heat", heat_args, staging_path).await?;

    // Compile, then link.
    toolset
        .run(
            "candle",
            [
                "-nologo",
                "-arch",
                settings.arch().wix_arch(),
                "Product.wxs",
                "Directory.wxs",
            ],
            staging_path,
        )
        .await?;

    let light_args: Vec<OsString> = vec![
        "-nologo".into(),
        "-ext".into(),
        "WixUIExtension".into(),
        "Product.wixobj".into(),
        "Directory.wixobj".into(),
        "-out".into(),
        out.into_os_string(),
    ];
    toolset.run("light", light_args, staging_path).await?;

    log::info!("✓ Created MSI: {}", target_path.display());

    Ok(vec![target_path])
}

/// Checks that the frozen tree exists and has something to package.
fn validate_build_tree(tree: &Path) -> Result<()> {
    if !tree.exists() {
        bail!("build tree {} does not exist", tree.display());
    }
    if !tree.is_dir() {
        bail!("build tree {} is not a directory", tree.display());
    }

    let has_files = WalkDir::new(tree)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_type().is_file());
    if !has_files {
        bail!("build tree {} contains no files", tree.display());
    }

    Ok(())
}

/// Converts the license file to rich text in the staging directory.
///
/// Uses the configured license path, or probes the project directory for
/// the conventional file names. No license file means no license dialog;
/// that is not an error.
async fn stage_license(settings: &Settings, staging: &Path) -> Result<Option<PathBuf>> {
    let source = match &settings.msi().license {
        Some(path) => Some(path.clone()),
        None => discover_license(settings.project_dir()),
    };

    let Some(source) = source else {
        log::debug!("No license file found; installer will omit the license dialog");
        return Ok(None);
    };

    let text = tokio::fs::read_to_string(&source)
        .await
        .fs_context("reading license file", &source)?;
    let dest = staging.join("license.rtf");
    tokio::fs::write(&dest, rtf::license_to_rtf(text.lines()))
        .await
        .fs_context("writing rich-text license", &dest)?;

    log::debug!("Converted {} to rich text", source.display());
    Ok(Some(dest))
}

fn discover_license(project_dir: &Path) -> Option<PathBuf> {
    LICENSE_CANDIDATES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.is_file())
}

/// Loads the authoring template (built-in or override) and renders it.
async fn render_authoring(settings: &Settings, license_rtf: Option<&Path>) -> Result<String> {
    let source = match &settings.msi().template {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .fs_context("reading authoring template", path)?,
        None => template::DEFAULT_TEMPLATE.to_string(),
    };
    template::render(settings, &source, license_rtf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_build_tree_missing() {
        let err = validate_build_tree(Path::new("/nonexistent/frozen/tree"))
            .expect_err("missing tree must fail");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_validate_build_tree_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = validate_build_tree(dir.path()).expect_err("empty tree must fail");
        assert!(err.to_string().contains("no files"));
    }

    #[test]
    fn test_validate_build_tree_with_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("app.exe"), b"binary").expect("write");
        assert!(validate_build_tree(dir.path()).is_ok());
    }

    #[test]
    fn test_discover_license_prefers_bare_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("LICENSE"), "text").expect("write");
        std::fs::write(dir.path().join("LICENSE.txt"), "text").expect("write");
        assert_eq!(
            discover_license(dir.path()),
            Some(dir.path().join("LICENSE"))
        );
    }

    #[test]
    fn test_discover_license_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(discover_license(dir.path()), None);
    }
}
