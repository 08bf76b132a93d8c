use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_YEAR: &str = "N/A";
pub const DEFAULT_LINK: &str = "#";
pub const DEFAULT_IMAGE: &str = "images/placeholder.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Media,
    Technology,
}

impl ItemKind {
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Media => "🎬 Movie",
            ItemKind::Technology => "💻 Technology",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Media => f.write_str("media"),
            ItemKind::Technology => f.write_str("technology"),
        }
    }
}

/// Canonical catalog entry. Built only by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub title: String,
    pub year: String,
    pub description: String,
    pub link: String,
    pub image: String,
    pub tags: Vec<String>,
}

/// One element of the source array, kept as loosely typed JSON.
///
/// Any JSON value deserializes; anything that is not an object becomes the
/// empty record so a single odd element never fails the whole load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self { Self::default() }

    /// First key of `keys` that exists in the record.
    pub fn lookup(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter().find_map(|k| self.0.get(*k))
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<Value> for RawRecord {
    fn from(v: Value) -> Self {
        match v {
            Value::Object(map) => RawRecord(map),
            _ => RawRecord::default(),
        }
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawRecord::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_elements_become_empty_records() {
        let recs: Vec<RawRecord> = serde_json::from_value(json!([1, "x", null, [1], {"title": "A"}])).unwrap();
        assert_eq!(recs.len(), 5);
        assert!(recs[..4].iter().all(RawRecord::is_empty));
        assert_eq!(recs[4].lookup(&["title"]), Some(&json!("A")));
    }

    #[test]
    fn lookup_prefers_earlier_keys() {
        let r = RawRecord::new().with("titulo", "B").with("title", "A");
        assert_eq!(r.lookup(&["title", "titulo"]), Some(&json!("A")));
        assert_eq!(r.lookup(&["nome"]), None);
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ItemKind::Technology).unwrap(), "\"technology\"");
        assert_eq!(ItemKind::Media.to_string(), "media");
    }
}
