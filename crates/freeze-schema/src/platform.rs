//! Bundling target platforms.

/// Operating system family of the bundling target.
///
/// Probes use the platform to decide which library naming scheme applies and
/// whether a capability exists at all.
///
/// # Example
///
/// ```
/// use freeze_schema::Platform;
///
/// let current = Platform::current();
/// println!("Targeting: {}", current);
/// assert_eq!(Platform::from("darwin"), Platform::MacOs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Linux distributions.
    Linux,
    /// FreeBSD, OpenBSD and NetBSD.
    Bsd,
    /// Apple macOS.
    MacOs,
    /// Any platform without dedicated handling.
    Other(String),
}

impl Platform {
    /// Get the platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from(std::env::consts::OS)
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Bsd => "bsd",
            Self::MacOs => "macos",
            Self::Other(name) => name,
        }
    }

    /// Whether this is Windows.
    pub fn is_windows(&self) -> bool {
        *self == Self::Windows
    }

    /// Whether this is a non-Apple Unix (Linux or a BSD).
    pub fn is_unix(&self) -> bool {
        matches!(self, Self::Linux | Self::Bsd)
    }

    /// Whether this is macOS.
    pub fn is_macos(&self) -> bool {
        *self == Self::MacOs
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Platform {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "windows" | "win32" | "win64" => Self::Windows,
            "linux" | "linux2" => Self::Linux,
            "bsd" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Self::Bsd,
            "macos" | "darwin" | "osx" => Self::MacOs,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Platform {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Platform> for String {
    fn from(p: Platform) -> Self {
        p.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(Platform::from("Win32"), Platform::Windows);
        assert_eq!(Platform::from("freebsd"), Platform::Bsd);
        assert!(Platform::from("linux2").is_unix());
        assert!(!Platform::MacOs.is_unix());
    }

    #[test]
    fn test_unknown_platform_round_trips() {
        let p = Platform::from("haiku");
        assert_eq!(p, Platform::Other("haiku".into()));
        assert_eq!(String::from(p), "haiku");
    }
}
