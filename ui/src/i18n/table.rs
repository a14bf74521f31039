//! Nested translation tables and typed dot-path lookup.

use std::collections::BTreeMap;

use serde_json::Value;

/// One node of a translation tree: either a localized string or a nested
/// table. JSON leaves of any other type are dropped during conversion, so a
/// number or boolean in a translation file behaves like a missing key.
#[derive(Clone, Debug, PartialEq)]
pub enum TranslationValue {
    Leaf(String),
    Table(TranslationTable),
}

/// The translation tree for one language.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranslationTable {
    entries: BTreeMap<String, TranslationValue>,
}

/// Outcome of a dot-path walk. The key-echo fallback of
/// [`crate::i18n::I18n::translate`] is built on the `Missing` and `Subtree`
/// branches rather than being an implicit property of the traversal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lookup<'a> {
    /// The full path resolved to a string.
    Leaf(&'a str),
    /// The full path resolved, but to a nested table.
    Subtree(&'a TranslationTable),
    /// Some segment was absent or pointed through a leaf.
    Missing,
}

impl TranslationTable {
    pub fn from_json_str(text: &str) -> Result<TranslationTable, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(TranslationTable::from_value(&value))
    }

    fn from_value(value: &Value) -> TranslationTable {
        let mut entries = BTreeMap::new();
        if let Value::Object(map) = value {
            for (key, child) in map {
                match child {
                    Value::String(s) => {
                        entries.insert(key.clone(), TranslationValue::Leaf(s.clone()));
                    }
                    Value::Object(_) => {
                        entries.insert(
                            key.clone(),
                            TranslationValue::Table(TranslationTable::from_value(child)),
                        );
                    }
                    _ => {}
                }
            }
        }
        TranslationTable { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk a dot-delimited path such as `nav.home` segment by segment.
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        let mut node = self;
        let mut segments = key.split('.').peekable();
        while let Some(segment) = segments.next() {
            match node.entries.get(segment) {
                Some(TranslationValue::Leaf(text)) => {
                    if segments.peek().is_none() {
                        return Lookup::Leaf(text);
                    }
                    // Path continues through a leaf.
                    return Lookup::Missing;
                }
                Some(TranslationValue::Table(table)) => {
                    if segments.peek().is_none() {
                        return Lookup::Subtree(table);
                    }
                    node = table;
                }
                None => return Lookup::Missing,
            }
        }
        Lookup::Missing
    }

    /// All dot-paths that resolve to leaves, in sorted order. Used by the
    /// translation-completeness test to compare locales.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_leaf_paths("", &mut paths);
        paths
    }

    fn collect_leaf_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (key, value) in &self.entries {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match value {
                TranslationValue::Leaf(_) => out.push(path),
                TranslationValue::Table(table) => table.collect_leaf_paths(&path, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TranslationTable {
        TranslationTable::from_json_str(
            r#"{
                "nav": { "home": "Home", "contact": "Contact" },
                "hero": { "title": "Welcome!" },
                "version": 3
            }"#,
        )
        .expect("sample table parses")
    }

    #[test]
    fn leaf_lookup_resolves() {
        assert_eq!(sample().lookup("nav.home"), Lookup::Leaf("Home"));
        assert_eq!(sample().lookup("hero.title"), Lookup::Leaf("Welcome!"));
    }

    #[test]
    fn missing_paths_are_missing() {
        let table = sample();
        assert_eq!(table.lookup("nav.pricing"), Lookup::Missing);
        assert_eq!(table.lookup("nonexistent.key"), Lookup::Missing);
        assert_eq!(table.lookup(""), Lookup::Missing);
        // A path that continues through a leaf.
        assert_eq!(table.lookup("nav.home.deeper"), Lookup::Missing);
    }

    #[test]
    fn full_depth_table_is_a_subtree() {
        let table = sample();
        match table.lookup("nav") {
            Lookup::Subtree(sub) => assert_eq!(sub.lookup("home"), Lookup::Leaf("Home")),
            other => panic!("expected subtree, got {other:?}"),
        }
    }

    #[test]
    fn non_string_leaves_are_dropped() {
        assert_eq!(sample().lookup("version"), Lookup::Missing);
    }

    #[test]
    fn leaf_paths_are_dotted_and_sorted() {
        assert_eq!(
            sample().leaf_paths(),
            vec!["hero.title", "nav.contact", "nav.home"]
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(TranslationTable::from_json_str("{ not json").is_err());
    }
}
