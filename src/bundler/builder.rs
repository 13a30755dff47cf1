//! Bundle orchestration.
//!
//! The [`Bundler`] ties the pieces together: it validates settings, runs
//! the WiX packaging sequence, and reports the finished installer with its
//! size and checksum.

use crate::bail;
use crate::bundler::{BundledArtifact, Result, Settings, error::ErrorExt, wix};

/// Main bundler orchestrator.
///
/// # Examples
///
/// ```no_run
/// use msiforge::bundler::{Bundler, PackageSettings, SettingsBuilder};
///
/// # async fn example() -> msiforge::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .build_tree("build/exe")
///     .package_settings(PackageSettings {
///         product_name: "Widget".into(),
///         version: "1.0.0".into(),
///         description: "A widget".into(),
///         ..Default::default()
///     })
///     .build()?;
///
/// let artifact = Bundler::new(settings).bundle().await?;
/// println!("{} ({} bytes)", artifact.paths[0].display(), artifact.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Builds the installer and returns the artifact metadata.
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        let paths = wix::bundle_project(&self.settings).await?;

        let mut size = 0u64;
        for path in &paths {
            let metadata = tokio::fs::metadata(path)
                .await
                .fs_context("reading artifact metadata", path)?;
            size += metadata.len();
        }

        let checksum = match paths.first() {
            Some(path) => calculate_sha256(path).await?,
            None => bail!("packaging produced no installer path"),
        };

        Ok(BundledArtifact {
            paths,
            size,
            checksum,
        })
    }
}

/// Calculates the SHA-256 checksum of a file.
///
/// Reads in 8KB chunks; returns the hex-encoded digest.
async fn calculate_sha256(path: &std::path::Path) -> Result<String> {
    use sha2::{Digest, Sha256};
    use tokio::io::AsyncReadExt;

    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening artifact for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading artifact for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sha256_of_known_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("artifact.msi");
        tokio::fs::write(&path, b"abc").await.expect("write");

        let checksum = calculate_sha256(&path).await.expect("hash");
        assert_eq!(
            checksum,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
