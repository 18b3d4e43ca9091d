//! Host capability probes.
//!
//! Every probe takes the shared [`ProbeContext`] plus the [`Config`] being
//! assembled, and records exactly one outcome in it. Probes that make no
//! sense on the target platform record [`Capability::NotApplicable`] rather
//! than leaving the field untouched.

pub mod modules;
pub mod resource;
pub mod tcltk;
pub mod upx;

pub use modules::{probe_crypt, probe_unicode, probe_zlib};
pub use resource::probe_resource_update;
pub use tcltk::probe_tcl_tk;
pub use upx::probe_upx;

use crate::graph::GraphProvider;
use crate::interpreter::Interpreter;
use crate::reporter::Reporter;
use freeze_schema::{Capability, Config, Platform};
use std::fmt;
use std::path::PathBuf;

/// Groups the host state every probe reads.
pub struct ProbeContext<'a> {
    pub platform: Platform,
    pub interpreter: &'a dyn Interpreter,
    pub graph: &'a dyn GraphProvider,
    pub reporter: &'a dyn Reporter,
    /// Tool installation directory (holds `support/loader/...`).
    pub tool_home: PathBuf,
    /// Where generated support modules are written.
    pub support_dir: PathBuf,
}

impl fmt::Debug for ProbeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeContext")
            .field("platform", &self.platform)
            .field("interpreter", &self.interpreter.executable())
            .field("tool_home", &self.tool_home)
            .field("support_dir", &self.support_dir)
            .finish_non_exhaustive()
    }
}

impl ProbeContext<'_> {
    pub(crate) fn finish(&self, name: &str, outcome: Capability, detail: &str) {
        tracing::info!(probe = name, %outcome, "{detail}");
        self.reporter.probe_finished(name, outcome, detail);
    }
}

/// Record the interpreter executable and the target platform.
pub fn find_exe_dependencies(ctx: &ProbeContext<'_>, config: &mut Config) {
    tracing::info!("computing executable dependencies");
    config.interpreter = Some(ctx.interpreter.executable().to_path_buf());
    config.target_platform = Some(ctx.platform.clone());
}
