//! WiX toolset discovery and invocation.
//!
//! The harvester (`heat`), compiler (`candle`), and linker (`light`) are
//! external binaries. They are located once per bundle run, preferring an
//! explicit `WIX` environment variable (pointing at the toolset root, as
//! the WiX installer sets it) over a PATH lookup.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::bundler::error::{Error, Result};

/// Environment variable pointing at the WiX toolset installation root.
const WIX_ENV: &str = "WIX";

/// Located WiX toolset.
#[derive(Debug, Clone)]
pub struct WixToolset {
    /// Directory containing the tool binaries, None when resolved via PATH.
    bin_dir: Option<PathBuf>,
}

impl WixToolset {
    /// Locates the toolset.
    ///
    /// Checks `%WIX%/bin` first, then falls back to a PATH lookup of the
    /// compiler. The other tools are assumed to sit next to whichever
    /// binary was found, which holds for every WiX distribution.
    pub fn locate() -> Result<Self> {
        if let Ok(root) = std::env::var(WIX_ENV) {
            let bin_dir = Path::new(&root).join("bin");
            let candle = bin_dir.join(tool_binary("candle"));
            if candle.is_file() {
                log::debug!("Using WiX toolset from {}: {}", WIX_ENV, bin_dir.display());
                return Ok(Self {
                    bin_dir: Some(bin_dir),
                });
            }
            log::warn!(
                "{} is set but {} does not exist; falling back to PATH",
                WIX_ENV,
                candle.display()
            );
        }

        match which::which(tool_binary("candle")) {
            Ok(path) => {
                log::debug!("Found candle at: {}", path.display());
                Ok(Self {
                    bin_dir: path.parent().map(|p| p.to_path_buf()),
                })
            }
            Err(_) => Err(Error::ToolNotFound {
                tool: "candle".into(),
            }),
        }
    }

    /// Returns the invocation path for a tool.
    fn tool_path(&self, tool: &str) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(tool_binary(tool)),
            None => PathBuf::from(tool_binary(tool)),
        }
    }

    /// Runs a tool, returning its captured standard output.
    ///
    /// The tool's stdout is logged at debug level; a non-zero exit becomes
    /// [`Error::ToolFailed`] carrying the captured stderr.
    pub async fn run<I, S>(&self, tool: &str, args: I, cwd: &Path) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = self.tool_path(tool);
        log::info!("Running {}", tool);

        let output = tokio::process::Command::new(&program)
            .args(args)
            .current_dir(cwd)
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: program.display().to_string(),
                error,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !stdout.trim().is_empty() {
            log::debug!("{} output:\n{}", tool, stdout.trim_end());
        }

        if !output.status.success() {
            return Err(Error::ToolFailed {
                tool: tool.into(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(stdout)
    }
}

/// Appends the platform executable suffix to a tool name.
fn tool_binary(tool: &str) -> String {
    format!("{}{}", tool, std::env::consts::EXE_SUFFIX)
}
