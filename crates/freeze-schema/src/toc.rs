//! The ordered table of contents produced by the closure builder.

use crate::module::{ModuleName, ModuleRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered table of contents: the modules selected for bundling, in load order.
///
/// No module name appears twice. Collecting records into a `Toc` keeps the
/// first occurrence of each name and drops later ones.
///
/// # Example
///
/// ```
/// use freeze_schema::{ModuleKind, ModuleRecord, Toc};
///
/// let toc: Toc = [
///     ModuleRecord::new("util", None, ModuleKind::Interpreted),
///     ModuleRecord::new("app", None, ModuleKind::Interpreted),
///     ModuleRecord::new("util", None, ModuleKind::Interpreted),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(toc.len(), 2);
/// assert_eq!(toc.position("app"), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ModuleRecord>", into = "Vec<ModuleRecord>")]
pub struct Toc {
    entries: Vec<ModuleRecord>,
}

impl Toc {
    /// Create an empty TOC.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the TOC has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, ModuleRecord> {
        self.entries.iter()
    }

    /// Entries in load order.
    pub fn entries(&self) -> &[ModuleRecord] {
        &self.entries
    }

    /// Module names in load order.
    pub fn names(&self) -> impl Iterator<Item = &ModuleName> {
        self.entries.iter().map(|r| &r.name)
    }

    /// Load-order index of a module, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|r| r.name == name)
    }

    /// Whether a module is present.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&ModuleRecord> {
        self.entries.iter().find(|r| r.name == name)
    }
}

impl FromIterator<ModuleRecord> for Toc {
    fn from_iter<I: IntoIterator<Item = ModuleRecord>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let entries = iter
            .into_iter()
            .filter(|r| seen.insert(r.name.clone()))
            .collect();
        Self { entries }
    }
}

// Loading goes through `collect` so a hand-edited config cannot smuggle in
// duplicate names.
impl From<Vec<ModuleRecord>> for Toc {
    fn from(records: Vec<ModuleRecord>) -> Self {
        records.into_iter().collect()
    }
}

impl From<Toc> for Vec<ModuleRecord> {
    fn from(toc: Toc) -> Self {
        toc.entries
    }
}

impl IntoIterator for Toc {
    type Item = ModuleRecord;
    type IntoIter = std::vec::IntoIter<ModuleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Toc {
    type Item = &'a ModuleRecord;
    type IntoIter = std::slice::Iter<'a, ModuleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleKind;
    use std::path::PathBuf;

    fn record(name: &str) -> ModuleRecord {
        ModuleRecord::new(
            name,
            Some(PathBuf::from(format!("/src/{name}.py"))),
            ModuleKind::Interpreted,
        )
    }

    #[test]
    fn test_collect_keeps_first_occurrence() {
        let mut late = record("a");
        late.origin = Some(PathBuf::from("/elsewhere/a.py"));

        let toc: Toc = vec![record("a"), record("b"), late].into_iter().collect();

        assert_eq!(toc.len(), 2);
        assert_eq!(
            toc.get("a").and_then(ModuleRecord::origin),
            Some(PathBuf::from("/src/a.py").as_path())
        );
    }

    #[test]
    fn test_serializes_as_ordered_triples() {
        let toc: Toc = vec![
            record("util"),
            ModuleRecord::new("zlib", None, ModuleKind::Extension),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&toc).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"name": "util", "origin": "/src/util.py", "kind": "interpreted"},
                {"name": "zlib", "kind": "extension"}
            ])
        );
    }

    #[test]
    fn test_deserialize_drops_duplicate_names() {
        let json = r#"[
            {"name": "util", "origin": "/src/util.py", "kind": "interpreted"},
            {"name": "app", "origin": "/src/app.py", "kind": "interpreted"},
            {"name": "util", "origin": "/other/util.py", "kind": "interpreted"}
        ]"#;

        let toc: Toc = serde_json::from_str(json).unwrap();

        assert_eq!(toc.len(), 2);
        assert_eq!(toc.position("app"), Some(1));
        assert_eq!(
            toc.get("util").and_then(ModuleRecord::origin),
            Some(PathBuf::from("/src/util.py").as_path())
        );
    }
}
