//! Configuration structures for MSI bundling.
//!
//! This module provides the configuration types for Windows Installer
//! packaging: package metadata, installer-specific options, and a builder
//! that resolves every recognized option to a concrete value (computing
//! documented defaults for anything the caller leaves unset).

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::bundler::error::{Context, Result};

/// Target CPU architecture for the installer.
///
/// MSI packages are architecture-specific: the architecture selects the
/// Program Files folder the installer targets and the platform tag embedded
/// in the default output file name.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MsiArch {
    /// x86 / i686 (32-bit)
    X86,
    /// x86_64 / AMD64 (64-bit) - Default
    #[default]
    X64,
    /// AArch64 / ARM64 (64-bit)
    Arm64,
}

impl MsiArch {
    /// Detects the architecture from a Rust target triple.
    ///
    /// Unknown triples fall back to [`MsiArch::X64`].
    pub fn from_target_triple(target: &str) -> Self {
        if target.starts_with("x86_64") {
            MsiArch::X64
        } else if target.starts_with('i') {
            MsiArch::X86
        } else if target.starts_with("aarch64") {
            MsiArch::Arm64
        } else {
            MsiArch::X64
        }
    }

    /// Platform tag appended to default output file names.
    pub fn platform_tag(&self) -> &'static str {
        match self {
            MsiArch::X86 => "win32",
            MsiArch::X64 => "amd64",
            MsiArch::Arm64 => "arm64",
        }
    }

    /// Windows Installer folder property for the Program Files root.
    ///
    /// 64-bit targets install under `ProgramFiles64Folder`, 32-bit under
    /// `ProgramFilesFolder`.
    pub fn program_files_folder(&self) -> &'static str {
        match self {
            MsiArch::X86 => "ProgramFilesFolder",
            MsiArch::X64 | MsiArch::Arm64 => "ProgramFiles64Folder",
        }
    }

    /// Architecture argument accepted by the WiX compiler (`candle -arch`).
    pub fn wix_arch(&self) -> &'static str {
        match self {
            MsiArch::X86 => "x86",
            MsiArch::X64 => "x64",
            MsiArch::Arm64 => "arm64",
        }
    }
}

/// Package metadata used to populate the installer.
///
/// This typically maps from the `Cargo.toml` `[package]` section.
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Product name displayed to users.
    pub product_name: String,

    /// Version string in semantic versioning format.
    ///
    /// The MSI `ProductVersion` keeps only `major.minor.patch`.
    pub version: String,

    /// Brief description of the application.
    pub description: String,

    /// Homepage URL for the application.
    ///
    /// Default: None
    pub homepage: Option<String>,

    /// List of package authors.
    ///
    /// Format: "Name <email@example.com>"
    ///
    /// Default: None
    pub authors: Option<Vec<String>>,
}

/// Windows Installer (.msi) configuration.
///
/// Every option is recognized with a concrete default-computation rule,
/// applied by [`SettingsBuilder::build`]:
///
/// | Option | Default |
/// |--------|---------|
/// | `upgrade_code` | v5 UUID derived from the bundle identifier |
/// | `product_code` | fresh v4 UUID per build |
/// | `add_to_path` | false |
/// | `initial_target_dir` | `[<ProgramFilesFolder>]\<manufacturer>\<product>` |
/// | `target_name` | `<product>-<version>-<platform>.msi` |
#[derive(Clone, Debug, Default)]
pub struct MsiSettings {
    /// Bundle identifier in reverse domain notation.
    ///
    /// Used to derive a stable upgrade code. Falls back to the product
    /// name when unset.
    pub identifier: Option<String>,

    /// Publisher/company name shown as the installer manufacturer.
    ///
    /// Default: None (first author, then "UNKNOWN")
    pub publisher: Option<String>,

    /// Upgrade code GUID shared by all versions of the product.
    ///
    /// Windows Installer uses this to detect and replace older versions.
    /// Default: None (derived from the identifier, stable across builds)
    pub upgrade_code: Option<Uuid>,

    /// Product code GUID identifying this exact build.
    ///
    /// Default: None (freshly generated per build)
    pub product_code: Option<Uuid>,

    /// Append the install directory to the PATH environment variable.
    ///
    /// Default: false
    pub add_to_path: bool,

    /// Initial target directory offered by the installer UI.
    ///
    /// Windows Installer property path syntax, e.g.
    /// `[ProgramFiles64Folder]\Acme\Widget`.
    ///
    /// Default: None (computed from architecture, manufacturer, product)
    pub initial_target_dir: Option<String>,

    /// Name of the .msi file to create.
    ///
    /// A name without an `.msi` suffix gets `-<platform>.msi` appended;
    /// relative names resolve under the dist directory.
    ///
    /// Default: None (`<product>-<version>-<platform>.msi`)
    pub target_name: Option<String>,

    /// Path to a plain-text license file to show during installation.
    ///
    /// Default: None (probes `LICENSE`, then `LICENSE.txt`, in the project
    /// directory)
    pub license: Option<PathBuf>,

    /// Path to a custom WiX authoring template (.wxs handlebars file).
    ///
    /// Default: None (uses the built-in template)
    pub template: Option<PathBuf>,
}

/// Resolved settings for an MSI build.
///
/// Constructed via [`SettingsBuilder`]; all defaults are computed at build
/// time, so every accessor is infallible.
#[derive(Clone, Debug)]
pub struct Settings {
    package: PackageSettings,
    msi: MsiSettings,

    /// Frozen executable tree to package.
    build_tree: PathBuf,

    /// Output directory for the finished installer.
    dist_dir: PathBuf,

    /// Project root, used for license probing.
    project_dir: PathBuf,

    arch: MsiArch,

    // Resolved identifiers and version.
    product_code: Uuid,
    upgrade_code: Uuid,
    product_version: semver::Version,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the full version string from the package metadata.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the `major.minor.patch` version used as the MSI
    /// `ProductVersion`.
    pub fn product_version(&self) -> String {
        format!(
            "{}.{}.{}",
            self.product_version.major, self.product_version.minor, self.product_version.patch
        )
    }

    /// Returns the package description.
    pub fn description(&self) -> &str {
        &self.package.description
    }

    /// Returns the installer manufacturer.
    ///
    /// Publisher if configured, otherwise the first author with any
    /// `<email>` part stripped, otherwise "UNKNOWN".
    pub fn manufacturer(&self) -> String {
        if let Some(publisher) = &self.msi.publisher {
            return publisher.clone();
        }
        self.package
            .authors
            .as_ref()
            .and_then(|authors| authors.first())
            .map(|author| match author.split_once('<') {
                Some((name, _)) => name.trim().to_string(),
                None => author.trim().to_string(),
            })
            .unwrap_or_else(|| "UNKNOWN".to_string())
    }

    /// Returns the frozen executable tree being packaged.
    pub fn build_tree(&self) -> &Path {
        &self.build_tree
    }

    /// Returns the output directory for the finished installer.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Returns the project root directory.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Returns the target architecture.
    pub fn arch(&self) -> MsiArch {
        self.arch
    }

    /// Returns the product code for this build.
    pub fn product_code(&self) -> Uuid {
        self.product_code
    }

    /// Returns the upgrade code shared across versions of this product.
    pub fn upgrade_code(&self) -> Uuid {
        self.upgrade_code
    }

    /// Returns the MSI-specific settings.
    pub fn msi(&self) -> &MsiSettings {
        &self.msi
    }

    /// Returns the initial target directory offered by the installer UI.
    pub fn initial_target_dir(&self) -> String {
        match &self.msi.initial_target_dir {
            Some(dir) => dir.clone(),
            None => format!(
                "[{}]\\{}\\{}",
                self.arch.program_files_folder(),
                self.manufacturer(),
                self.product_name()
            ),
        }
    }

    /// Returns the resolved path of the .msi file to create.
    pub fn target_path(&self) -> PathBuf {
        let name = match &self.msi.target_name {
            Some(name) if name.to_lowercase().ends_with(".msi") => name.clone(),
            Some(name) => format!("{}-{}.msi", name, self.arch.platform_tag()),
            None => format!(
                "{}-{}-{}.msi",
                self.product_name(),
                self.version_string(),
                self.arch.platform_tag()
            ),
        };

        let path = PathBuf::from(name);
        if path.is_absolute() {
            path
        } else {
            self.dist_dir.join(path)
        }
    }
}

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use msiforge::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> msiforge::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .build_tree("build/exe")
///     .package_settings(PackageSettings {
///         product_name: "Widget".into(),
///         version: "1.2.0".into(),
///         description: "A widget".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    build_tree: Option<PathBuf>,
    dist_dir: Option<PathBuf>,
    project_dir: Option<PathBuf>,
    package_settings: Option<PackageSettings>,
    msi_settings: MsiSettings,
    target: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the frozen executable tree to package.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn build_tree<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_tree = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory for the finished installer.
    ///
    /// Default: `dist`
    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dist_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the project root directory used for license probing.
    ///
    /// Default: current directory
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building; `product_name` and `version`
    /// must be non-empty and `version` must parse as semver.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets MSI-specific configuration.
    ///
    /// Default: Empty [`MsiSettings`]
    pub fn msi_settings(mut self, settings: MsiSettings) -> Self {
        self.msi_settings = settings;
        self
    }

    /// Sets the target triple.
    ///
    /// If not set, uses the `TARGET` environment variable or the current
    /// architecture.
    pub fn target(mut self, target: String) -> Self {
        self.target = Some(target);
        self
    }

    /// Builds the settings, resolving all defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `build_tree` or `package_settings` is missing,
    /// if the product name is empty, or if the version is not valid semver.
    pub fn build(self) -> Result<Settings> {
        let package = self
            .package_settings
            .context("package_settings is required")?;
        let build_tree = self.build_tree.context("build_tree is required")?;

        if package.product_name.is_empty() {
            crate::bail!("product_name must not be empty");
        }

        let product_version: semver::Version = package.version.parse()?;

        let target = self.target.unwrap_or_else(|| {
            std::env::var("TARGET").unwrap_or_else(|_| std::env::consts::ARCH.to_string())
        });
        let arch = MsiArch::from_target_triple(&target);

        let msi = self.msi_settings;
        let product_code = msi.product_code.unwrap_or_else(Uuid::new_v4);
        let upgrade_code = msi.upgrade_code.unwrap_or_else(|| {
            let identifier = msi
                .identifier
                .clone()
                .unwrap_or_else(|| package.product_name.to_lowercase());
            Uuid::new_v5(&Uuid::NAMESPACE_DNS, identifier.as_bytes())
        });

        Ok(Settings {
            package,
            msi,
            build_tree,
            dist_dir: self.dist_dir.unwrap_or_else(|| PathBuf::from("dist")),
            project_dir: self.project_dir.unwrap_or_else(|| PathBuf::from(".")),
            arch,
            product_code,
            upgrade_code,
            product_version,
        })
    }
}
