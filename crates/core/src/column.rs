//! Column pipeline configuration
//!
//! The board's columns are a fixed, ordered mapping from status key to
//! display name, defined once per deployment rather than derived from data.
//! Every task's status is one of these keys, and new tasks always land in
//! the first (entry) column.

use serde::{Deserialize, Serialize};

/// A single column in the status pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub name: String,
}

/// Ordered set of columns, fixed for the lifetime of a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    columns: Vec<Column>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                Column {
                    key: "pending".to_string(),
                    name: "Pending".to_string(),
                },
                Column {
                    key: "inProgress".to_string(),
                    name: "In Progress".to_string(),
                },
            ],
        }
    }
}

impl ColumnConfig {
    /// Build a configuration from `(key, display name)` pairs.
    ///
    /// Empty keys are skipped and duplicate keys keep their first
    /// occurrence. Returns `None` when no usable column remains.
    pub fn from_pairs<K, N>(pairs: impl IntoIterator<Item = (K, N)>) -> Option<Self>
    where
        K: Into<String>,
        N: Into<String>,
    {
        let mut columns: Vec<Column> = Vec::new();
        for (key, name) in pairs {
            let key = key.into();
            if key.is_empty() || columns.iter().any(|c| c.key == key) {
                continue;
            }
            columns.push(Column {
                key,
                name: name.into(),
            });
        }

        if columns.is_empty() {
            None
        } else {
            Some(Self { columns })
        }
    }

    /// Parse a pipeline spec of the form `key:Display Name,key2:Name2`.
    ///
    /// A segment without a `:` uses the key itself as display name. Returns
    /// `None` when the spec contains no usable segment.
    pub fn parse_spec(spec: &str) -> Option<Self> {
        Self::from_pairs(spec.split(',').map(|segment| {
            match segment.split_once(':') {
                Some((key, name)) => (key.trim().to_string(), name.trim().to_string()),
                None => (segment.trim().to_string(), segment.trim().to_string()),
            }
        }))
    }

    /// Key of the column newly created tasks go into
    pub fn entry_key(&self) -> &str {
        &self.columns[0].key
    }

    /// Whether `key` is one of the configured columns
    pub fn contains(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key)
    }

    /// Look up a column by key
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Column keys in pipeline order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key.as_str())
    }

    /// Columns in pipeline order
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false: a configuration holds at least one column
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline() {
        let config = ColumnConfig::default();
        assert_eq!(config.entry_key(), "pending");
        assert!(config.contains("inProgress"));
        assert!(!config.contains("done"));
        assert_eq!(config.keys().collect::<Vec<_>>(), ["pending", "inProgress"]);
    }

    #[test]
    fn test_from_pairs_keeps_order() {
        let config =
            ColumnConfig::from_pairs([("todo", "To Do"), ("doing", "Doing"), ("done", "Done")])
                .unwrap();
        assert_eq!(config.entry_key(), "todo");
        assert_eq!(config.len(), 3);
        assert_eq!(config.get("doing").unwrap().name, "Doing");
    }

    #[test]
    fn test_from_pairs_skips_duplicates_and_empty_keys() {
        let config =
            ColumnConfig::from_pairs([("todo", "To Do"), ("", "Nameless"), ("todo", "Again")])
                .unwrap();
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("todo").unwrap().name, "To Do");
    }

    #[test]
    fn test_from_pairs_empty_is_none() {
        let pairs: Vec<(String, String)> = Vec::new();
        assert!(ColumnConfig::from_pairs(pairs).is_none());
    }

    #[test]
    fn test_parse_spec() {
        let config = ColumnConfig::parse_spec("todo:To Do,review:In Review,done").unwrap();
        assert_eq!(config.keys().collect::<Vec<_>>(), ["todo", "review", "done"]);
        assert_eq!(config.get("review").unwrap().name, "In Review");
        assert_eq!(config.get("done").unwrap().name, "done");
    }

    #[test]
    fn test_parse_spec_garbage_is_none() {
        assert!(ColumnConfig::parse_spec("").is_none());
        assert!(ColumnConfig::parse_spec(",,,").is_none());
    }
}
