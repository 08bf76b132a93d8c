use serde_json::{Number, Value};

use crate::types::{Item, ItemKind, RawRecord, DEFAULT_IMAGE, DEFAULT_LINK, DEFAULT_TITLE, DEFAULT_YEAR};

// English key first, then the Portuguese spelling used by older data files.
const TITLE_KEYS: &[&str] = &["title", "titulo"];
const NAME_KEYS: &[&str] = &["name", "nome"];
const YEAR_KEYS: &[&str] = &["year", "ano"];
const CREATED_KEYS: &[&str] = &["creationDate", "creation_date", "data_criacao"];
const DESCRIPTION_KEYS: &[&str] = &["description", "descricao"];
const LINK_KEYS: &[&str] = &["link"];
const IMAGE_KEYS: &[&str] = &["image", "imagem"];
const TAGS_KEYS: &[&str] = &["tags"];

/// Floats print through `f64`'s `Display`, so `1999.0` reads as `1999`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Text of a field if it is "present": a non-empty string, a non-zero number,
/// or `true`. Everything else counts as missing.
fn present_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// A tag element as text. Every scalar is kept, falsy ones included.
fn tag_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn field(raw: &RawRecord, keys: &[&str]) -> Option<String> {
    raw.lookup(keys).and_then(present_text)
}

fn tags_of(raw: &RawRecord) -> Vec<String> {
    match raw.lookup(TAGS_KEYS) {
        Some(Value::Array(values)) => values.iter().filter_map(tag_text).collect(),
        _ => Vec::new(),
    }
}

/// Convert a raw record into an `Item`. Total: every input yields an item.
pub fn normalize(raw: &RawRecord) -> Item {
    let title = field(raw, TITLE_KEYS);
    let kind = if title.is_some() { ItemKind::Media } else { ItemKind::Technology };
    Item {
        kind,
        title: title
            .or_else(|| field(raw, NAME_KEYS))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        year: field(raw, YEAR_KEYS)
            .or_else(|| field(raw, CREATED_KEYS))
            .unwrap_or_else(|| DEFAULT_YEAR.to_string()),
        description: field(raw, DESCRIPTION_KEYS).unwrap_or_default(),
        link: field(raw, LINK_KEYS).unwrap_or_else(|| DEFAULT_LINK.to_string()),
        image: field(raw, IMAGE_KEYS).unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        tags: tags_of(raw),
    }
}

pub fn normalize_all(raws: &[RawRecord]) -> Vec<Item> {
    raws.iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(v: Value) -> RawRecord { RawRecord::from(v) }

    #[test]
    fn empty_record_gets_every_default() {
        let item = normalize(&RawRecord::new());
        assert_eq!(item, Item {
            kind: ItemKind::Technology,
            title: "Untitled".into(),
            year: "N/A".into(),
            description: String::new(),
            link: "#".into(),
            image: "images/placeholder.jpg".into(),
            tags: vec![],
        });
    }

    #[test]
    fn title_means_media_regardless_of_other_fields() {
        let item = normalize(&raw(json!({"title": "Alien", "name": "ignored", "creationDate": "1999"})));
        assert_eq!(item.kind, ItemKind::Media);
        assert_eq!(item.title, "Alien");
        assert_eq!(item.year, "1999");
    }

    #[test]
    fn name_only_means_technology() {
        let item = normalize(&raw(json!({"name": "Rust", "year": 2015, "tags": ["lang", "systems"]})));
        assert_eq!(item.kind, ItemKind::Technology);
        assert_eq!(item.title, "Rust");
        assert_eq!(item.year, "2015");
        assert_eq!(item.tags, vec!["lang", "systems"]);
    }

    #[test]
    fn falsy_values_fall_back() {
        let item = normalize(&raw(json!({
            "title": "", "name": "Go", "year": 0, "creationDate": null,
            "description": false, "link": "", "image": null, "tags": "not-an-array"
        })));
        assert_eq!(item.kind, ItemKind::Technology);
        assert_eq!(item.title, "Go");
        assert_eq!(item.year, "N/A");
        assert_eq!(item.description, "");
        assert_eq!(item.link, "#");
        assert_eq!(item.image, "images/placeholder.jpg");
        assert!(item.tags.is_empty());
    }

    #[test]
    fn structured_title_is_not_a_title() {
        let item = normalize(&raw(json!({"title": {"en": "Alien"}, "name": "Alien"})));
        assert_eq!(item.kind, ItemKind::Technology);
        assert_eq!(item.title, "Alien");
    }

    #[test]
    fn portuguese_keys_are_understood() {
        let item = normalize(&raw(json!({
            "titulo": "Matrix", "ano": 1999, "descricao": "Neo", "imagem": "img/matrix.jpg"
        })));
        assert_eq!(item.kind, ItemKind::Media);
        assert_eq!(item.title, "Matrix");
        assert_eq!(item.year, "1999");
        assert_eq!(item.description, "Neo");
        assert_eq!(item.image, "img/matrix.jpg");

        let tech = normalize(&raw(json!({"nome": "Docker", "data_criacao": "2013"})));
        assert_eq!(tech.kind, ItemKind::Technology);
        assert_eq!(tech.year, "2013");
    }

    #[test]
    fn tag_arrays_keep_scalar_entries() {
        let item = normalize(&raw(json!({"tags": ["sci-fi", "", null, 42, 0, false, {"x": 1}]})));
        assert_eq!(item.tags, vec!["sci-fi", "", "42", "0", "false"]);
    }

    #[test]
    fn integral_float_years_print_as_integers() {
        let item = normalize(&raw(json!({"title": "Matrix", "year": 1999.0})));
        assert_eq!(item.year, "1999");

        let item = normalize(&raw(json!({"title": "Odd", "year": 2000.5, "tags": [3.0]})));
        assert_eq!(item.year, "2000.5");
        assert_eq!(item.tags, vec!["3"]);
    }
}
