//! Module identity, kind and import edges, as produced by a graph provider.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::path::{Path, PathBuf};

/// A fully qualified module name (e.g. `encodings.utf_8`).
///
/// Module names are case-sensitive and globally unique within one graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Create a new module name, stored as-is.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for ModuleName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ModuleName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModuleName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// How a module is provided at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// Compiled into the interpreter itself; never bundled.
    Builtin,
    /// Native shared library loaded by the interpreter.
    Extension,
    /// Source or bytecode module executed by the interpreter.
    Interpreted,
}

impl ModuleKind {
    /// Lowercase name used on the wire and in terminal output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Extension => "extension",
            Self::Interpreted => "interpreted",
        }
    }
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One concrete module as reported by a graph provider.
///
/// Records are immutable once produced; the closure builder copies them into
/// the TOC verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Canonical module name.
    pub name: ModuleName,
    /// Where the module lives on disk; `None` for modules built into the runtime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<PathBuf>,
    /// Runtime kind of the module.
    pub kind: ModuleKind,
}

impl ModuleRecord {
    /// Create a record from its parts.
    pub fn new(name: impl Into<ModuleName>, origin: Option<PathBuf>, kind: ModuleKind) -> Self {
        Self {
            name: name.into(),
            origin,
            kind,
        }
    }

    /// Shorthand for a builtin module, which never has an origin.
    pub fn builtin(name: impl Into<ModuleName>) -> Self {
        Self::new(name, None, ModuleKind::Builtin)
    }

    /// Borrow the origin path, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Whether the module is compiled into the runtime.
    pub fn is_builtin(&self) -> bool {
        self.kind == ModuleKind::Builtin
    }
}

/// An import statement recorded on the importing module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportEdge {
    /// Name as written in the import; resolved through the graph provider.
    pub target: String,
    /// The import only runs behind a runtime check (feature test, platform guard).
    #[serde(default)]
    pub conditional: bool,
    /// The import runs lazily, not while the importing module loads.
    #[serde(default)]
    pub deferred: bool,
}

impl ImportEdge {
    /// An unconditional, eagerly evaluated import.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            conditional: false,
            deferred: false,
        }
    }

    /// Mark the import as conditional.
    pub fn conditional(mut self) -> Self {
        self.conditional = true;
        self
    }

    /// Mark the import as deferred.
    pub fn deferred(mut self) -> Self {
        self.deferred = true;
        self
    }

    /// Whether this edge constrains load order: unconditional and not deferred.
    pub fn orders_load(&self) -> bool {
        !self.conditional && !self.deferred
    }
}
