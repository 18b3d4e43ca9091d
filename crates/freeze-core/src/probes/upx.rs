//! UPX executable packer detection.

use super::ProbeContext;
use anyhow::{Context, Result, bail};
use freeze_schema::{Capability, Config, Platform};
use semver::Version;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// How long `upx -V` may take before it is considered hung.
const UPX_TIMEOUT: Duration = Duration::from_secs(10);

/// Oldest UPX that handles Windows executables correctly.
const MIN_WINDOWS_VERSION: Version = Version::new(1, 92, 0);

/// Find UPX in `upx_dir` (or on `PATH`) and record its version.
///
/// `upx_dir` is recorded whether or not UPX is found there.
pub fn probe_upx(ctx: &ProbeContext<'_>, config: &mut Config, upx_dir: Option<&Path>) {
    ctx.reporter.probe_started("upx");
    config.upx.dir = upx_dir.map(Path::to_path_buf);
    config.upx.version = None;

    let version = locate(upx_dir).and_then(|program| query_version(&program));
    match version {
        Ok(version) => {
            config.upx.status = check_version(&ctx.platform, &version);
            if config.upx.status.is_available() {
                config.upx.version = Some(version.clone());
            } else {
                let message = format!(
                    "UPX {version} is too old for {}; {MIN_WINDOWS_VERSION} or newer is required",
                    ctx.platform
                );
                tracing::error!("{message}");
                ctx.reporter.warning(&message);
            }
            ctx.finish("upx", config.upx.status, &version.to_string());
        }
        Err(e) => {
            tracing::debug!("upx not usable: {e:#}");
            config.upx.status = Capability::Unavailable;
            ctx.finish("upx", config.upx.status, "not found");
        }
    }
}

/// Whether a UPX of `version` may be used when targeting `platform`.
pub fn check_version(platform: &Platform, version: &Version) -> Capability {
    if platform.is_windows() && *version < MIN_WINDOWS_VERSION {
        Capability::Unavailable
    } else {
        Capability::Available
    }
}

/// Parse the banner printed by `upx -V`.
///
/// The version is the second word of the first line, e.g. `upx 3.96`. Only
/// the leading numeric part is kept and missing components are zero-filled.
pub fn parse_upx_version(output: &str) -> Option<Version> {
    let word = output.lines().next()?.split_whitespace().nth(1)?;
    let numeric: String = word
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut parts = numeric
        .split('.')
        .filter(|p| !p.is_empty())
        .map(str::parse::<u64>);
    let major = parts.next()?.ok()?;
    let minor = parts.next().transpose().ok()?.unwrap_or(0);
    let patch = parts.next().transpose().ok()?.unwrap_or(0);
    Some(Version::new(major, minor, patch))
}

fn locate(upx_dir: Option<&Path>) -> Result<PathBuf> {
    match upx_dir {
        Some(dir) => {
            let program = dir.join(format!("upx{}", std::env::consts::EXE_SUFFIX));
            if !program.is_file() {
                bail!("{} not found", program.display());
            }
            Ok(program)
        }
        None => which::which("upx").context("upx not found on PATH"),
    }
}

fn query_version(program: &Path) -> Result<Version> {
    let mut child = Command::new(program)
        .arg("-V")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run {}", program.display()))?;

    let Some(status) = child.wait_timeout(UPX_TIMEOUT)? else {
        let _ = child.kill();
        let _ = child.wait();
        bail!("{} -V timed out", program.display());
    };
    if !status.success() {
        bail!("{} -V exited with {status}", program.display());
    }

    let mut output = String::new();
    if let Some(mut stdout) = child.stdout.take() {
        stdout.read_to_string(&mut output)?;
    }
    parse_upx_version(&output)
        .with_context(|| format!("Unrecognised upx banner: {:?}", output.lines().next()))
}
