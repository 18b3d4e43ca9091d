//! The configure driver.
//!
//! Runs every probe against the host, computes the archive dependency TOC and
//! persists the result. Settings that no probe owns (such as `use_elf_exe`)
//! carry over from the previous config when it is still readable.

use crate::closure::compute_closure;
use crate::graph::GraphProvider;
use crate::interpreter::Interpreter;
use crate::probes::{self, ProbeContext};
use crate::reporter::Reporter;
use crate::store::ConfigStore;
use anyhow::{Context, Result};
use freeze_schema::{CONFIG_VERSION, Config, Platform};
use std::path::PathBuf;

/// Module whose closure makes up the bundled archive support code.
pub const DEFAULT_ARCHIVE_ENTRY: &str = "archive";

/// Module whose extension binary links against TCL/TK.
pub const DEFAULT_TK_MODULE: &str = "tkinter";

/// Exits successfully unless the interpreter runs optimized (`-O`).
const DEBUG_CHECK: &str = "import sys; sys.exit(0 if __debug__ else 1)";

/// Inputs to one configure run.
#[derive(Debug, Clone)]
pub struct ConfigureOptions {
    /// Where the config is read from and written to.
    pub config_path: PathBuf,
    /// Tool installation directory.
    pub tool_home: PathBuf,
    /// Where generated support modules are written.
    pub support_dir: PathBuf,
    /// Platform the bundle targets.
    pub platform: Platform,
    /// Entry module for the archive dependency TOC.
    pub archive_entry: String,
    /// Toolkit module used to find TCL/TK.
    pub tk_module: String,
    /// Extra directories searched for the TCL shared library.
    pub library_dirs: Vec<PathBuf>,
    /// Directory holding the UPX executable; `PATH` is searched when unset.
    pub upx_dir: Option<PathBuf>,
}

impl ConfigureOptions {
    /// Defaults rooted at `tool_home`, targeting the current platform.
    pub fn new(tool_home: impl Into<PathBuf>) -> Self {
        let tool_home = tool_home.into();
        Self {
            config_path: tool_home.join("config.toml"),
            support_dir: tool_home.join("support"),
            tool_home,
            platform: Platform::current(),
            archive_entry: DEFAULT_ARCHIVE_ENTRY.to_string(),
            tk_module: DEFAULT_TK_MODULE.to_string(),
            library_dirs: Vec::new(),
            upx_dir: None,
        }
    }
}

/// Probe the host, build the archive TOC and save the resulting config.
///
/// # Errors
///
/// Returns an error if the interpreter cannot report its version, the
/// archive entry's closure cannot be resolved, the unicode support module
/// cannot be written, or the config cannot be saved. The config file is
/// left untouched when an error is returned.
pub async fn configure(
    options: &ConfigureOptions,
    graph: &dyn GraphProvider,
    interpreter: &dyn Interpreter,
    reporter: &dyn Reporter,
) -> Result<Config> {
    let store = ConfigStore::new(&options.config_path);
    let mut config = store.load_or_default(reporter).await;
    config.version = CONFIG_VERSION;

    let interpreter_version = interpreter.version().with_context(|| {
        format!(
            "Failed to query interpreter {}",
            interpreter.executable().display()
        )
    })?;
    reporter.info(&format!("interpreter: {interpreter_version}"));
    config.interpreter_version = Some(interpreter_version);
    config.interpreter_debug = Some(interpreter.run_check(DEBUG_CHECK));
    config.tool_version = Some(env!("CARGO_PKG_VERSION").to_string());
    config.tool_home = Some(options.tool_home.clone());
    config.generated_at = Some(chrono::Utc::now().timestamp());

    let ctx = ProbeContext {
        platform: options.platform.clone(),
        interpreter,
        graph,
        reporter,
        tool_home: options.tool_home.clone(),
        support_dir: options.support_dir.clone(),
    };

    probes::find_exe_dependencies(&ctx, &mut config);
    probes::probe_tcl_tk(&ctx, &mut config, &options.tk_module, &options.library_dirs);
    probes::probe_zlib(&ctx, &mut config);
    probes::probe_crypt(&ctx, &mut config);
    probes::probe_resource_update(&ctx, &mut config);
    probes::probe_unicode(&ctx, &mut config)?;
    probes::probe_upx(&ctx, &mut config, options.upx_dir.as_deref());

    tracing::info!(entry = %options.archive_entry, "computing archive dependencies");
    config.archive_dependencies = compute_closure(&options.archive_entry, graph)
        .with_context(|| format!("Failed to resolve archive entry '{}'", options.archive_entry))?;
    reporter.info(&format!(
        "archive dependencies: {} modules",
        config.archive_dependencies.len()
    ));

    store
        .save(&config)
        .await
        .with_context(|| format!("Failed to save {}", options.config_path.display()))?;
    tracing::info!("done generating {}", options.config_path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SnapshotGraph;
    use crate::probes::testing::{FakeInterpreter, RecordingReporter};
    use crate::reporter::NullReporter;
    use freeze_schema::{Capability, ImportEdge, ModuleKind, ModuleName, ModuleRecord};

    fn archive_graph() -> SnapshotGraph {
        let module = |name: &str| {
            ModuleRecord::new(
                name,
                Some(PathBuf::from(format!("/lib/{name}.py"))),
                ModuleKind::Interpreted,
            )
        };
        SnapshotGraph::new()
            .with_module(
                module("archive"),
                vec![ImportEdge::new("struct"), ImportEdge::new("marshal")],
            )
            .with_module(module("struct"), vec![])
            .with_module(ModuleRecord::builtin("marshal"), vec![])
    }

    fn options(home: &std::path::Path) -> ConfigureOptions {
        ConfigureOptions {
            platform: Platform::Linux,
            upx_dir: Some(home.join("no-upx")),
            ..ConfigureOptions::new(home)
        }
    }

    #[tokio::test]
    async fn test_configure_writes_config() {
        let home = tempfile::tempdir().unwrap();
        let options = options(home.path());
        let interp = FakeInterpreter::with_modules(&["zlib", "codecs", "encodings"]);

        let config = configure(&options, &archive_graph(), &interp, &NullReporter)
            .await
            .unwrap();

        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.interpreter_version.as_deref(), Some("Python 3.12.1"));
        assert_eq!(config.interpreter_debug, Some(true));
        assert_eq!(config.target_platform, Some(Platform::Linux));
        assert_eq!(config.zlib, Capability::Available);
        assert_eq!(config.crypt, Capability::Unavailable);
        assert_eq!(config.resource_update, Capability::NotApplicable);
        assert_eq!(config.tcl_tk.status, Capability::Unavailable);
        assert_eq!(config.unicode.module.as_deref(), Some("encodings"));
        assert_eq!(config.upx.status, Capability::Unavailable);
        let names: Vec<&str> = config.archive_dependencies.names().map(ModuleName::as_str).collect();
        assert_eq!(names, vec!["struct", "archive"]);

        let saved = ConfigStore::new(&options.config_path).load().await.unwrap();
        assert_eq!(saved, config);
    }

    #[tokio::test]
    async fn test_configure_keeps_unprobed_settings() {
        let home = tempfile::tempdir().unwrap();
        let options = options(home.path());
        let previous = Config {
            use_elf_exe: false,
            ..Config::default()
        };
        ConfigStore::new(&options.config_path)
            .save(&previous)
            .await
            .unwrap();
        let interp = FakeInterpreter::with_modules(&[]);

        let config = configure(&options, &archive_graph(), &interp, &NullReporter)
            .await
            .unwrap();

        assert!(!config.use_elf_exe);
    }

    #[tokio::test]
    async fn test_configure_discards_other_version() {
        let home = tempfile::tempdir().unwrap();
        let options = options(home.path());
        std::fs::write(&options.config_path, "version = 99\nuse_elf_exe = false\n").unwrap();
        let interp = FakeInterpreter::with_modules(&[]);

        let config = configure(&options, &archive_graph(), &interp, &NullReporter)
            .await
            .unwrap();

        assert!(config.use_elf_exe);
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[tokio::test]
    async fn test_stale_config_is_reported() {
        let home = tempfile::tempdir().unwrap();
        let options = options(home.path());
        std::fs::write(&options.config_path, "version = 99\n").unwrap();
        let interp = FakeInterpreter::with_modules(&[]);
        let reporter = RecordingReporter::default();

        configure(&options, &archive_graph(), &interp, &reporter)
            .await
            .unwrap();

        let warnings = reporter.warnings.lock().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("ignoring previous config"));
    }

    #[tokio::test]
    async fn test_optimized_interpreter_is_recorded() {
        let home = tempfile::tempdir().unwrap();
        let options = options(home.path());
        let interp = FakeInterpreter::with_modules(&[]).failing_check("__debug__");

        let config = configure(&options, &archive_graph(), &interp, &NullReporter)
            .await
            .unwrap();

        assert_eq!(config.interpreter_debug, Some(false));
        let saved = ConfigStore::new(&options.config_path).load().await.unwrap();
        assert_eq!(saved.interpreter_debug, Some(false));
    }

    #[tokio::test]
    async fn test_unresolvable_archive_entry_saves_nothing() {
        let home = tempfile::tempdir().unwrap();
        let options = ConfigureOptions {
            archive_entry: "missing_archive".to_string(),
            ..options(home.path())
        };
        let interp = FakeInterpreter::with_modules(&[]);

        let err = configure(&options, &archive_graph(), &interp, &NullReporter)
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("could not be resolved"));
        assert!(!options.config_path.exists());
    }
}
