//! Module graph providers.
//!
//! The closure builder never locates modules itself. It asks a
//! [`GraphProvider`] which concrete modules an import name resolves to and
//! which imports each of those modules makes. [`SnapshotGraph`] is the
//! provider used by the CLI: a graph dumped to JSON by an external analyzer.

use freeze_schema::{ImportEdge, ModuleName, ModuleRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Source of module records and their import edges.
pub trait GraphProvider: Send + Sync {
    /// Resolve an import name to the concrete modules it may refer to.
    ///
    /// An empty result means the name cannot be resolved. More than one
    /// result means the name is ambiguous across search locations.
    fn resolve(&self, name: &str) -> Vec<&ModuleRecord>;

    /// Imports made by a module previously returned from [`resolve`](Self::resolve).
    fn edges_of(&self, module: &ModuleRecord) -> &[ImportEdge];
}

/// Errors raised while loading a graph snapshot.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to read graph snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid graph snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Module '{name}' is declared twice in {path}")]
    DuplicateModule { path: PathBuf, name: ModuleName },

    #[error("Alias '{alias}' points at unknown module '{target}'")]
    DanglingAlias { alias: String, target: ModuleName },
}

/// On-disk layout of one snapshot file.
#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    modules: Vec<SnapshotEntry>,
    #[serde(default)]
    aliases: HashMap<String, Vec<ModuleName>>,
}

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    #[serde(flatten)]
    record: ModuleRecord,
    #[serde(default)]
    imports: Vec<ImportEdge>,
}

#[derive(Debug, Clone)]
struct Node {
    record: ModuleRecord,
    imports: Vec<ImportEdge>,
}

/// A fully materialized module graph.
///
/// Modules are keyed by name. When several search locations declare the same
/// module, the first one loaded wins and later ones are shadowed. Aliases map
/// an import name onto one or more concrete modules.
#[derive(Debug, Clone, Default)]
pub struct SnapshotGraph {
    modules: HashMap<ModuleName, Node>,
    aliases: HashMap<String, Vec<ModuleName>>,
}

impl SnapshotGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and merge snapshot files, in search-location order.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, declares the same
    /// module twice, or if an alias names a module no file declares.
    pub fn load(paths: &[PathBuf]) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for path in paths {
            graph.merge_file(path)?;
        }
        graph.check_aliases()?;

        tracing::debug!(
            modules = graph.modules.len(),
            aliases = graph.aliases.len(),
            "loaded module graph"
        );
        Ok(graph)
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), GraphError> {
        let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: SnapshotFile =
            serde_json::from_str(&content).map_err(|source| GraphError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut declared = std::collections::HashSet::new();
        for entry in file.modules {
            let name = entry.record.name.clone();
            if !declared.insert(name.clone()) {
                return Err(GraphError::DuplicateModule {
                    path: path.to_path_buf(),
                    name,
                });
            }
            if !self.insert(entry.record, entry.imports) {
                tracing::debug!(module = %name, path = %path.display(), "shadowed by earlier search location");
            }
        }

        for (alias, targets) in file.aliases {
            self.aliases.entry(alias).or_insert(targets);
        }
        Ok(())
    }

    fn check_aliases(&self) -> Result<(), GraphError> {
        for (alias, targets) in &self.aliases {
            if let Some(target) = targets.iter().find(|t| !self.modules.contains_key(*t)) {
                return Err(GraphError::DanglingAlias {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    /// Add a module with its imports.
    ///
    /// Returns `false` and leaves the graph untouched if a module with the
    /// same name is already present.
    pub fn insert(&mut self, record: ModuleRecord, imports: Vec<ImportEdge>) -> bool {
        if self.modules.contains_key(&record.name) {
            return false;
        }
        self.modules
            .insert(record.name.clone(), Node { record, imports });
        true
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_module(mut self, record: ModuleRecord, imports: Vec<ImportEdge>) -> Self {
        self.insert(record, imports);
        self
    }

    /// Make `alias` resolve to each of `targets`, in order.
    pub fn with_alias<I, T>(mut self, alias: &str, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ModuleName>,
    {
        self.aliases
            .insert(alias.to_string(), targets.into_iter().map(Into::into).collect());
        self
    }

    /// Number of modules in the graph.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the graph has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl GraphProvider for SnapshotGraph {
    fn resolve(&self, name: &str) -> Vec<&ModuleRecord> {
        if let Some(targets) = self.aliases.get(name) {
            return targets
                .iter()
                .filter_map(|t| self.modules.get(t))
                .map(|n| &n.record)
                .collect();
        }
        self.modules
            .get(name)
            .map(|n| vec![&n.record])
            .unwrap_or_default()
    }

    fn edges_of(&self, module: &ModuleRecord) -> &[ImportEdge] {
        self.modules
            .get(module.name.as_str())
            .map(|n| n.imports.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freeze_schema::ModuleKind;
    use std::io::Write;

    fn write_snapshot(dir: &Path, file: &str, body: &str) -> PathBuf {
        let path = dir.join(file);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(
            dir.path(),
            "graph.json",
            r#"{
                "modules": [
                    {"name": "app", "origin": "/src/app.py", "kind": "interpreted",
                     "imports": [{"target": "util"}, {"target": "winreg", "conditional": true}]},
                    {"name": "util", "origin": "/src/util.py", "kind": "interpreted"},
                    {"name": "sys", "kind": "builtin"}
                ]
            }"#,
        );

        let graph = SnapshotGraph::load(&[path]).unwrap();
        assert_eq!(graph.len(), 3);

        let app = graph.resolve("app");
        assert_eq!(app.len(), 1);
        let edges = graph.edges_of(app[0]);
        assert_eq!(edges.len(), 2);
        assert!(edges[1].conditional);

        assert_eq!(graph.resolve("sys")[0].kind, ModuleKind::Builtin);
        assert!(graph.resolve("missing").is_empty());
    }

    #[test]
    fn test_earlier_search_location_shadows_later() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_snapshot(
            dir.path(),
            "site.json",
            r#"{"modules": [{"name": "util", "origin": "/site/util.py", "kind": "interpreted"}]}"#,
        );
        let second = write_snapshot(
            dir.path(),
            "stdlib.json",
            r#"{"modules": [{"name": "util", "origin": "/lib/util.py", "kind": "interpreted"}]}"#,
        );

        let graph = SnapshotGraph::load(&[first, second]).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.resolve("util")[0].origin(),
            Some(Path::new("/site/util.py"))
        );
    }

    #[test]
    fn test_duplicate_in_one_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(
            dir.path(),
            "graph.json",
            r#"{"modules": [
                {"name": "a", "kind": "interpreted"},
                {"name": "a", "kind": "extension"}
            ]}"#,
        );

        let err = SnapshotGraph::load(&[path]).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateModule { .. }));
    }

    #[test]
    fn test_alias_resolves_to_every_target() {
        let graph = SnapshotGraph::new()
            .with_module(
                ModuleRecord::new("compat3", None, ModuleKind::Interpreted),
                vec![],
            )
            .with_module(
                ModuleRecord::new("compat2", None, ModuleKind::Interpreted),
                vec![],
            )
            .with_alias("compat", ["compat3", "compat2"]);

        let names: Vec<&str> = graph
            .resolve("compat")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["compat3", "compat2"]);
    }

    #[test]
    fn test_dangling_alias_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_snapshot(
            dir.path(),
            "graph.json",
            r#"{"modules": [], "aliases": {"compat": ["nowhere"]}}"#,
        );

        let err = SnapshotGraph::load(&[path]).unwrap_err();
        assert!(err.to_string().contains("nowhere"));
    }

    #[test]
    fn test_unreadable_snapshot() {
        let err = SnapshotGraph::load(&[PathBuf::from("/definitely/not/here.json")]).unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }
}
