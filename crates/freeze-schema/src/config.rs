//! Persisted configure results.
//!
//! The config is a flat, versioned record: interpreter and tool identity,
//! one field per capability probe, and the archive dependency TOC. It is
//! rewritten as a whole on every configure run.

use crate::capability::Capability;
use crate::platform::Platform;
use crate::toc::Toc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Current on-disk format version. Configs with any other version are discarded.
pub const CONFIG_VERSION: u32 = 1;

/// Everything `freeze configure` detects about the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Format version of this record.
    pub version: u32,
    /// Emit ELF-style executables (archive appended to the loader).
    pub use_elf_exe: bool,
    /// Unix timestamp of the configure run that produced this record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<i64>,
    /// Interpreter executable the bundle is built against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<PathBuf>,
    /// Version banner reported by the interpreter, used to detect stale configs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter_version: Option<String>,
    /// Interpreter runs with assertions enabled (not optimized).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter_debug: Option<bool>,
    /// Platform the bundle targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_platform: Option<Platform>,
    /// Version of the tool that wrote this record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
    /// Home directory of the tool that wrote this record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_home: Option<PathBuf>,
    /// Interpreter ships zlib, so archives can be compressed.
    pub zlib: Capability,
    /// Archive encryption support.
    pub crypt: Capability,
    /// Icons and version resources can be edited in the loader executable.
    pub resource_update: Capability,
    /// TCL/TK runtime location.
    pub tcl_tk: TclTkConfig,
    /// Unicode codec support.
    pub unicode: UnicodeConfig,
    /// UPX executable packer.
    pub upx: UpxConfig,
    /// Modules the archive loader needs, in load order.
    pub archive_dependencies: Toc,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            use_elf_exe: true,
            generated_at: None,
            interpreter: None,
            interpreter_version: None,
            interpreter_debug: None,
            target_platform: None,
            tool_version: None,
            tool_home: None,
            zlib: Capability::default(),
            crypt: Capability::default(),
            resource_update: Capability::default(),
            tcl_tk: TclTkConfig::default(),
            unicode: UnicodeConfig::default(),
            upx: UpxConfig::default(),
            archive_dependencies: Toc::default(),
        }
    }
}

/// Result of the TCL/TK probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TclTkConfig {
    /// Whether a TCL/TK runtime was located.
    pub status: Capability,
    /// Detected TCL version (e.g. `8.6`); absent on macOS frameworks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Directory holding the TCL script library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcl_root: Option<PathBuf>,
    /// Directory holding the TK script library.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tk_root: Option<PathBuf>,
}

/// Result of the unicode probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnicodeConfig {
    /// Whether codec support is present.
    pub status: Capability,
    /// Module imported by the generated support file (`encodings` or `codecs`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

/// Result of the UPX probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpxConfig {
    /// Whether a usable UPX was found.
    pub status: Capability,
    /// Detected UPX version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<semver::Version>,
    /// Directory searched for the `upx` executable, as given by the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}
