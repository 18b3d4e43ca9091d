//! Probes answered by importing a module in the target interpreter.

use super::ProbeContext;
use anyhow::{Context, Result};
use freeze_schema::{Capability, Config};

/// Name of the generated support module that pulls in codec support.
pub const UNICODE_SUPPORT_FILE: &str = "useUnicode.py";

/// Zlib is needed to compress the bundled archive.
pub fn probe_zlib(ctx: &ProbeContext<'_>, config: &mut Config) {
    ctx.reporter.probe_started("zlib");
    config.zlib = Capability::from_bool(ctx.interpreter.can_import("zlib"));
    ctx.finish("zlib", config.zlib, "");
}

/// Archive encryption is not supported; always recorded as unavailable.
pub fn probe_crypt(ctx: &ProbeContext<'_>, config: &mut Config) {
    ctx.reporter.probe_started("crypt");
    config.crypt = Capability::Unavailable;
    ctx.finish("crypt", config.crypt, "disabled");
}

/// Detect codec support and (re)write the generated support module.
///
/// # Errors
///
/// Returns an error if the support module cannot be written or a stale one
/// cannot be removed.
pub fn probe_unicode(ctx: &ProbeContext<'_>, config: &mut Config) -> Result<()> {
    ctx.reporter.probe_started("unicode");
    let support_file = ctx.support_dir.join(UNICODE_SUPPORT_FILE);

    if !ctx.interpreter.can_import("codecs") {
        match std::fs::remove_file(&support_file) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to remove {}", support_file.display()));
            }
        }
        config.unicode.status = Capability::Unavailable;
        config.unicode.module = None;
        ctx.finish("unicode", config.unicode.status, "");
        return Ok(());
    }

    let module = if ctx.interpreter.can_import("encodings") {
        "encodings"
    } else {
        "codecs"
    };

    std::fs::create_dir_all(&ctx.support_dir)
        .with_context(|| format!("Failed to create {}", ctx.support_dir.display()))?;
    std::fs::write(&support_file, unicode_support_source(module))
        .with_context(|| format!("Failed to write {}", support_file.display()))?;

    config.unicode.status = Capability::Available;
    config.unicode.module = Some(module.to_string());
    ctx.finish("unicode", config.unicode.status, module);
    Ok(())
}

fn unicode_support_source(module: &str) -> String {
    format!("# Generated by freeze configure\n# This file is public domain\nimport {module}\n")
}

#[cfg(test)]
mod tests {
    use super::super::testing::{FakeInterpreter, context};
    use super::*;
    use crate::graph::SnapshotGraph;
    use freeze_schema::Platform;

    #[test]
    fn test_zlib() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();

        let with = FakeInterpreter::with_modules(&["zlib"]);
        probe_zlib(&context(Platform::Linux, &with, &graph, dir.path()), &mut config);
        assert_eq!(config.zlib, Capability::Available);

        let without = FakeInterpreter::with_modules(&[]);
        probe_zlib(&context(Platform::Linux, &without, &graph, dir.path()), &mut config);
        assert_eq!(config.zlib, Capability::Unavailable);
    }

    #[test]
    fn test_crypt_is_disabled() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&["zlib", "codecs"]);
        let mut config = Config {
            crypt: Capability::Available,
            ..Config::default()
        };

        probe_crypt(&context(Platform::Linux, &interp, &graph, dir.path()), &mut config);
        assert_eq!(config.crypt, Capability::Unavailable);
    }

    #[test]
    fn test_unicode_prefers_encodings() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&["codecs", "encodings"]);
        let ctx = context(Platform::Linux, &interp, &graph, dir.path());
        let mut config = Config::default();

        probe_unicode(&ctx, &mut config).unwrap();

        assert_eq!(config.unicode.status, Capability::Available);
        assert_eq!(config.unicode.module.as_deref(), Some("encodings"));
        let written = std::fs::read_to_string(ctx.support_dir.join(UNICODE_SUPPORT_FILE)).unwrap();
        assert!(written.ends_with("import encodings\n"));
    }

    #[test]
    fn test_unicode_falls_back_to_codecs() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&["codecs"]);
        let ctx = context(Platform::Linux, &interp, &graph, dir.path());
        let mut config = Config::default();

        probe_unicode(&ctx, &mut config).unwrap();

        assert_eq!(config.unicode.module.as_deref(), Some("codecs"));
    }

    #[test]
    fn test_unicode_unavailable_removes_stale_support_file() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&[]);
        let ctx = context(Platform::Linux, &interp, &graph, dir.path());
        std::fs::create_dir_all(&ctx.support_dir).unwrap();
        let stale = ctx.support_dir.join(UNICODE_SUPPORT_FILE);
        std::fs::write(&stale, "import codecs\n").unwrap();
        let mut config = Config::default();

        probe_unicode(&ctx, &mut config).unwrap();

        assert_eq!(config.unicode.status, Capability::Unavailable);
        assert!(config.unicode.module.is_none());
        assert!(!stale.exists());
    }
}
