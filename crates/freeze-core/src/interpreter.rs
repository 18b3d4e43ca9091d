//! The interpreter the bundle is built against.
//!
//! Probes only ever ask the interpreter what version it is and whether a
//! short script (usually a single import) runs cleanly. Keeping that behind a
//! trait lets tests substitute a scripted interpreter.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Queries answered by the target interpreter.
pub trait Interpreter: Send + Sync {
    /// Path of the interpreter executable.
    fn executable(&self) -> &Path;

    /// Version banner (e.g. `Python 3.12.1`).
    ///
    /// # Errors
    ///
    /// Returns an error if the interpreter cannot be run or reports nothing.
    fn version(&self) -> Result<String>;

    /// Whether `import <module>` succeeds.
    fn can_import(&self, module: &str) -> bool;

    /// Whether a short script exits successfully.
    ///
    /// Callers build `script` from trusted fragments only.
    fn run_check(&self, script: &str) -> bool;
}

/// An interpreter executable on the host.
#[derive(Debug, Clone)]
pub struct SystemInterpreter {
    path: PathBuf,
}

impl SystemInterpreter {
    /// Use the interpreter at `path` as-is.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate an interpreter by path or by name on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if a bare name is not found on `PATH`, or if an
    /// explicit path does not exist.
    pub fn locate(program: &Path) -> Result<Self> {
        if program.components().count() > 1 {
            if !program.exists() {
                bail!("Interpreter not found: {}", program.display());
            }
            return Ok(Self::new(program));
        }

        let path = which::which(program)
            .with_context(|| format!("'{}' not found on PATH", program.display()))?;
        Ok(Self::new(path))
    }
}

impl Interpreter for SystemInterpreter {
    fn executable(&self) -> &Path {
        &self.path
    }

    fn version(&self) -> Result<String> {
        let output = Command::new(&self.path)
            .arg("--version")
            .output()
            .with_context(|| format!("Failed to run {}", self.path.display()))?;

        if !output.status.success() {
            bail!("{} --version exited with {}", self.path.display(), output.status);
        }

        // Older interpreters print the banner on stderr.
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let banner = if stdout.trim().is_empty() {
            stderr.trim()
        } else {
            stdout.trim()
        };

        if banner.is_empty() {
            bail!("{} did not report a version", self.path.display());
        }
        Ok(banner.to_string())
    }

    fn can_import(&self, module: &str) -> bool {
        if !is_module_path(module) {
            tracing::debug!(module, "refusing to probe malformed module name");
            return false;
        }
        self.run_check(&format!("import {module}"))
    }

    fn run_check(&self, script: &str) -> bool {
        Command::new(&self.path)
            .arg("-c")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }
}

/// Dotted identifier check, so probe names can be passed to `-c` safely.
fn is_module_path(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_path_validation() {
        assert!(is_module_path("zlib"));
        assert!(is_module_path("encodings.utf_8"));
        assert!(is_module_path("_tkinter"));
        assert!(!is_module_path(""));
        assert!(!is_module_path("os; import shutil"));
        assert!(!is_module_path("a..b"));
        assert!(!is_module_path("1abc"));
    }

    #[test]
    fn test_locate_missing_explicit_path() {
        let err = SystemInterpreter::locate(Path::new("/no/such/dir/python")).unwrap_err();
        assert!(err.to_string().contains("Interpreter not found"));
    }

    #[test]
    fn test_missing_executable_cannot_import() {
        let interp = SystemInterpreter::new("/no/such/dir/python");
        assert!(!interp.can_import("zlib"));
        assert!(!interp.run_check("pass"));
        assert!(interp.version().is_err());
    }
}
