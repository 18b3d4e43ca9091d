//! TCL/TK runtime detection.
//!
//! The toolkit extension module is linked against a TCL shared library whose
//! file name carries the TCL version. The script libraries that must be
//! bundled live next to (or just above) that shared library.

use super::ProbeContext;
use crate::closure::compute_closure;
use anyhow::Result;
use freeze_schema::{Capability, Config, ModuleKind, Platform, TclTkConfig};
use regex::Regex;
use std::path::{Path, PathBuf};

const MACOS_TCL_ROOT: &str = "/System/Library/Frameworks/Tcl.framework/Versions/Current";
const MACOS_TK_ROOT: &str = "/System/Library/Frameworks/Tk.framework/Versions/Current";

/// Script library locations for one TCL installation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TclRoots {
    version: Option<String>,
    tcl: PathBuf,
    tk: PathBuf,
}

/// Locate the TCL/TK script libraries used by the toolkit module.
///
/// Candidates are the extension binaries in the closure of `tk_module`, then
/// every file directly inside `library_dirs`. The first candidate whose name
/// matches the platform's TCL library pattern decides the outcome.
pub fn probe_tcl_tk(
    ctx: &ProbeContext<'_>,
    config: &mut Config,
    tk_module: &str,
    library_dirs: &[PathBuf],
) {
    ctx.reporter.probe_started("tcl-tk");
    config.tcl_tk = TclTkConfig::default();

    let Some(pattern) = library_pattern(&ctx.platform) else {
        config.tcl_tk.status = Capability::NotApplicable;
        ctx.finish("tcl-tk", config.tcl_tk.status, ctx.platform.as_str());
        return;
    };

    let found = Regex::new(pattern)
        .map_err(anyhow::Error::from)
        .and_then(|re| find_roots(ctx, &re, tk_module, library_dirs));

    match found {
        Ok(Some(roots)) => {
            let detail = roots.tcl.display().to_string();
            config.tcl_tk = TclTkConfig {
                status: Capability::Available,
                version: roots.version,
                tcl_root: Some(roots.tcl),
                tk_root: Some(roots.tk),
            };
            ctx.finish("tcl-tk", Capability::Available, &detail);
        }
        Ok(None) => {
            config.tcl_tk.status = Capability::Unavailable;
            ctx.finish("tcl-tk", Capability::Unavailable, "no tcl library found");
        }
        Err(e) => {
            tracing::debug!("tcl/tk detection failed: {e:#}");
            config.tcl_tk.status = Capability::Unavailable;
            ctx.finish("tcl-tk", Capability::Unavailable, &e.to_string());
        }
    }
}

/// Shared-library name pattern per platform; capture 1 is the version, if any.
fn library_pattern(platform: &Platform) -> Option<&'static str> {
    match platform {
        Platform::Windows => Some(r"(?i)^tcl(\d\d)\.dll"),
        Platform::Linux | Platform::Bsd => Some(r"^libtcl(\d\.\d)?\.so"),
        Platform::MacOs => Some(r"^_tkinter"),
        Platform::Other(_) => None,
    }
}

fn find_roots(
    ctx: &ProbeContext<'_>,
    pattern: &Regex,
    tk_module: &str,
    library_dirs: &[PathBuf],
) -> Result<Option<TclRoots>> {
    let candidates = candidate_binaries(ctx, tk_module, library_dirs)?;

    for (name, path) in &candidates {
        let Some(caps) = pattern.captures(name) else {
            continue;
        };
        tracing::debug!(candidate = %path.display(), "tcl library candidate matched");
        let version = caps.get(1).map(|m| m.as_str().to_string());
        return Ok(roots_for(&ctx.platform, version, path));
    }
    Ok(None)
}

/// (file name, path) pairs in search order.
fn candidate_binaries(
    ctx: &ProbeContext<'_>,
    tk_module: &str,
    library_dirs: &[PathBuf],
) -> Result<Vec<(String, PathBuf)>> {
    let toc = compute_closure(tk_module, ctx.graph)?;

    let mut candidates = Vec::new();
    let mut search_dirs: Vec<PathBuf> = library_dirs.to_vec();

    for record in toc.iter().filter(|r| r.kind == ModuleKind::Extension) {
        let Some(origin) = record.origin() else {
            continue;
        };
        if let Some(name) = origin.file_name().and_then(|n| n.to_str()) {
            candidates.push((name.to_string(), origin.to_path_buf()));
        }
        if let Some(parent) = origin.parent()
            && !search_dirs.iter().any(|d| d == parent)
        {
            search_dirs.push(parent.to_path_buf());
        }
    }

    for dir in &search_dirs {
        candidates.extend(list_dir(dir));
    }
    Ok(candidates)
}

fn list_dir(dir: &Path) -> impl Iterator<Item = (String, PathBuf)> {
    walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            Some((name, entry.into_path()))
        })
}

fn roots_for(platform: &Platform, version: Option<String>, binary: &Path) -> Option<TclRoots> {
    let bindir = binary.parent().unwrap_or_else(|| Path::new("."));

    match platform {
        Platform::MacOs => Some(TclRoots {
            version,
            tcl: PathBuf::from(MACOS_TCL_ROOT),
            tk: PathBuf::from(MACOS_TK_ROOT),
        }),
        Platform::Windows => {
            // "86" -> "8.6"
            let digits = version?;
            let mut chars = digits.chars();
            let major = chars.next()?;
            let ver = format!("{major}.{}", chars.as_str());
            let prefix = bindir.parent().unwrap_or(bindir);
            [prefix.join("tcl"), prefix.join("lib")]
                .into_iter()
                .find(|base| base.join(format!("tcl{ver}")).is_dir())
                .map(|base| TclRoots {
                    tcl: base.join(format!("tcl{ver}")),
                    tk: base.join(format!("tk{ver}")),
                    version: Some(ver),
                })
        }
        _ => {
            let ver = version.or_else(|| version_from_dir(bindir))?;
            Some(TclRoots {
                tcl: bindir.join(format!("tcl{ver}")),
                tk: bindir.join(format!("tk{ver}")),
                version: Some(ver),
            })
        }
    }
}

/// Version of the last `tcl<major>.<minor>` entry (by name) in `dir`.
fn version_from_dir(dir: &Path) -> Option<String> {
    let re = Regex::new(r"^tcl(\d\.\d)").ok()?;
    list_dir(dir)
        .filter_map(|(name, _)| re.captures(&name).map(|c| c[1].to_string()))
        .last()
}
