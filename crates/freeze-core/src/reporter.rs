//! Reporter trait for dependency injection
//!
//! This trait allows the configure driver to report probe progress without
//! being coupled to a specific terminal implementation.

use freeze_schema::Capability;

pub trait Reporter: Send + Sync {
    /// A probe is about to run (e.g. "zlib", "upx").
    fn probe_started(&self, name: &str);

    /// A probe finished with the given outcome and a short detail string.
    fn probe_finished(&self, name: &str, outcome: Capability, detail: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn probe_started(&self, _: &str) {}
    fn probe_finished(&self, _: &str, _: Capability, _: &str) {}
    fn info(&self, _: &str) {}
    fn warning(&self, _: &str) {}
}
