//! Terminal implementation of the core [`Reporter`].

use super::theme::Theme;
use crossterm::style::Stylize;
use freeze_core::Reporter;
use freeze_schema::Capability;

/// Prints one line per finished probe to stderr.
#[derive(Debug, Clone, Default)]
pub struct TermReporter {
    theme: Theme,
}

impl TermReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for TermReporter {
    fn probe_started(&self, name: &str) {
        tracing::debug!(probe = name, "started");
    }

    fn probe_finished(&self, name: &str, outcome: Capability, detail: &str) {
        let (icon, color) = self.theme.capability(outcome);
        let label = format!("{name:<width$}", width = self.theme.layout.label_width);
        eprintln!(
            "  {} {} {}",
            icon.with(color),
            label.with(self.theme.colors.module_name),
            detail.with(self.theme.colors.secondary)
        );
    }

    fn info(&self, msg: &str) {
        eprintln!("  {} {}", self.theme.icons.info.dark_grey(), msg);
    }

    fn warning(&self, msg: &str) {
        eprintln!(
            "  {} {}",
            self.theme.icons.warning.with(self.theme.colors.warning),
            msg
        );
    }
}
