//! Icon and version-resource editing support (Windows only).

use super::ProbeContext;
use freeze_schema::{Capability, Config};
use std::path::{Path, PathBuf};

/// Loader stub that resources are written into.
const LOADER_STUB: &str = "runw.exe";

/// Check that resources can be edited in the loader executable.
///
/// The check needs the interpreter's `win32api` bindings and the loader stub
/// for the target platform; a temporary copy of the stub must then accept a
/// `BeginUpdateResource`/`EndUpdateResource` cycle.
pub fn probe_resource_update(ctx: &ProbeContext<'_>, config: &mut Config) {
    ctx.reporter.probe_started("resource-update");

    if !ctx.platform.is_windows() {
        config.resource_update = Capability::NotApplicable;
        ctx.finish("resource-update", config.resource_update, "windows only");
        return;
    }

    let (outcome, detail) = check_loader(ctx);
    config.resource_update = outcome;
    ctx.finish("resource-update", outcome, &detail);
}

fn loader_path(ctx: &ProbeContext<'_>) -> PathBuf {
    ctx.tool_home
        .join("support")
        .join("loader")
        .join(ctx.platform.as_str())
        .join(LOADER_STUB)
}

fn check_loader(ctx: &ProbeContext<'_>) -> (Capability, String) {
    if !ctx.interpreter.can_import("win32api") {
        return (Capability::Unavailable, "win32api not importable".to_string());
    }

    let loader = loader_path(ctx);
    if !loader.exists() {
        tracing::error!("resource update unavailable - {} not found", loader.display());
        return (
            Capability::Unavailable,
            format!("{} not found", loader.display()),
        );
    }

    // The shipped stub may be read-only; test against a writable copy.
    let copy = tempfile::Builder::new()
        .prefix("freeze-rsrc-")
        .suffix(".exe")
        .tempfile()
        .map(tempfile::NamedTempFile::into_temp_path)
        .and_then(|tmp| std::fs::copy(&loader, &tmp).map(|_| tmp));

    let tmp = match copy {
        Ok(tmp) => tmp,
        Err(e) => {
            return (
                Capability::Unavailable,
                format!("cannot copy loader stub: {e}"),
            );
        }
    };

    if ctx.interpreter.run_check(&update_resource_script(&tmp)) {
        (Capability::Available, String::new())
    } else {
        tracing::info!("resource update unavailable - BeginUpdateResource failed");
        (
            Capability::Unavailable,
            "BeginUpdateResource failed".to_string(),
        )
    }
}

/// Open and commit an empty resource update on `exe`.
fn update_resource_script(exe: &Path) -> String {
    // Debug quoting doubles backslashes, which reads back as the same path.
    let target = format!("{:?}", exe.to_string_lossy());
    format!(
        "import win32api; h = win32api.BeginUpdateResource({target}, 0); \
         win32api.EndUpdateResource(h, 1)"
    )
}

#[cfg(test)]
mod tests {
    use super::super::testing::{FakeInterpreter, context};
    use super::*;
    use crate::graph::SnapshotGraph;
    use freeze_schema::Platform;

    #[test]
    fn test_not_applicable_off_windows() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&["win32api"]);
        let mut config = Config::default();

        probe_resource_update(&context(Platform::MacOs, &interp, &graph, dir.path()), &mut config);
        assert_eq!(config.resource_update, Capability::NotApplicable);
    }

    #[test]
    fn test_windows_without_win32api() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&[]);
        let mut config = Config::default();

        probe_resource_update(&context(Platform::Windows, &interp, &graph, dir.path()), &mut config);
        assert_eq!(config.resource_update, Capability::Unavailable);
    }

    #[test]
    fn test_windows_without_loader_stub() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&["win32api"]);
        let mut config = Config::default();

        probe_resource_update(&context(Platform::Windows, &interp, &graph, dir.path()), &mut config);
        assert_eq!(config.resource_update, Capability::Unavailable);
    }

    #[test]
    fn test_windows_with_loader_stub() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&["win32api"]);
        let ctx = context(Platform::Windows, &interp, &graph, dir.path());
        let loader = loader_path(&ctx);
        std::fs::create_dir_all(loader.parent().unwrap()).unwrap();
        std::fs::write(&loader, b"MZ").unwrap();
        let mut config = Config::default();

        probe_resource_update(&ctx, &mut config);
        assert_eq!(config.resource_update, Capability::Available);

        let checks = interp.checks_run();
        assert_eq!(checks.len(), 1);
        assert!(checks[0].contains("BeginUpdateResource"));
        assert!(checks[0].contains("freeze-rsrc-"));
    }

    #[test]
    fn test_windows_stub_rejecting_resource_update() {
        let graph = SnapshotGraph::new();
        let dir = tempfile::tempdir().unwrap();
        let interp = FakeInterpreter::with_modules(&["win32api"]).failing_check("BeginUpdateResource");
        let ctx = context(Platform::Windows, &interp, &graph, dir.path());
        let loader = loader_path(&ctx);
        std::fs::create_dir_all(loader.parent().unwrap()).unwrap();
        std::fs::write(&loader, b"MZ").unwrap();
        let mut config = Config::default();

        probe_resource_update(&ctx, &mut config);
        assert_eq!(config.resource_update, Capability::Unavailable);
    }

    #[test]
    fn test_update_script_quotes_windows_paths() {
        let script = update_resource_script(Path::new(r"C:\Temp\freeze-rsrc-1.exe"));
        assert!(script.contains(r#"BeginUpdateResource("C:\\Temp\\freeze-rsrc-1.exe", 0)"#));
    }
}
