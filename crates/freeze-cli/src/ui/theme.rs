//! UI Theme - Design system constants
//!
//! Colors, icons and column widths shared by every freeze command.

use crossterm::style::Color;
use freeze_schema::{Capability, ModuleKind};

/// Default theme for freeze output
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for different UI elements
    pub colors: ColorScheme,
    /// Status icons
    pub icons: Icons,
    /// Table layout constants
    pub layout: Layout,
}

impl Theme {
    /// Icon and color for a probe outcome.
    pub fn capability(&self, outcome: Capability) -> (&'static str, Color) {
        match outcome {
            Capability::Available => (self.icons.success, self.colors.success),
            Capability::Unavailable => (self.icons.error, self.colors.error),
            Capability::NotApplicable => (self.icons.skipped, self.colors.secondary),
        }
    }

    /// Color for a module kind column.
    pub fn kind(&self, kind: ModuleKind) -> Color {
        match kind {
            ModuleKind::Interpreted => self.colors.secondary,
            ModuleKind::Extension => self.colors.warning,
            ModuleKind::Builtin => self.colors.header,
        }
    }
}

/// Color scheme for UI elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Module names (primary content)
    pub module_name: Color,
    /// Paths and secondary info
    pub secondary: Color,
    /// Headers and labels
    pub header: Color,
    /// Success states
    pub success: Color,
    /// Warning states
    pub warning: Color,
    /// Error states
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            module_name: Color::Cyan,
            secondary: Color::DarkGrey,
            header: Color::DarkGrey,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

/// Status icons for different states
#[derive(Debug, Clone)]
pub struct Icons {
    /// Available (✓)
    pub success: &'static str,
    /// Unavailable (✗)
    pub error: &'static str,
    /// Not applicable on this platform (-)
    pub skipped: &'static str,
    /// Warning (⚠)
    pub warning: &'static str,
    /// Info (ℹ)
    pub info: &'static str,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            success: "✓",
            error: "✗",
            skipped: "-",
            warning: "⚠",
            info: "ℹ",
        }
    }
}

/// Table layout constants
#[derive(Debug, Clone)]
pub struct Layout {
    /// Width of the position column
    pub index_width: usize,
    /// Width allocated for module name column
    pub name_width: usize,
    /// Width allocated for kind column
    pub kind_width: usize,
    /// Width of labels in key/value summaries
    pub label_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            index_width: 4,
            name_width: 28,
            kind_width: 12,
            label_width: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.icons.success, "✓");
        assert_eq!(theme.icons.error, "✗");
        assert!(theme.layout.name_width > theme.layout.kind_width);
    }

    #[test]
    fn test_capability_icons() {
        let theme = Theme::default();
        assert_eq!(theme.capability(Capability::Available).0, "✓");
        assert_eq!(theme.capability(Capability::Unavailable).0, "✗");
        assert_eq!(theme.capability(Capability::NotApplicable).0, "-");
    }
}
