//! Probe outcomes.

use serde::{Deserialize, Serialize};

/// Outcome of a capability probe.
///
/// Probes never leave a capability silently unset: a probe that has no
/// meaning on the current platform records [`Capability::NotApplicable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The feature was found and can be used.
    Available,
    /// The feature applies to this platform but was not found or is disabled.
    #[default]
    Unavailable,
    /// The feature does not exist on this platform.
    NotApplicable,
}

impl Capability {
    /// Map a boolean probe result onto `Available` / `Unavailable`.
    pub fn from_bool(found: bool) -> Self {
        if found {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    /// Whether the feature can be used.
    pub fn is_available(&self) -> bool {
        *self == Self::Available
    }

    /// Human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::NotApplicable => "n/a",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
