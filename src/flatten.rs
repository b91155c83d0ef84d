use crate::schema::{FieldMap, FieldType};
use serde_json::{Map, Value};

/// Flattens the object tree under `root` into `path -> kind` entries.
///
/// Objects expand: a nested object gets its own entry and all of its
/// descendants get entries too. Arrays do not expand; they are recorded as
/// `array` and their elements are never visited.
pub fn flatten_fields(root: &Map<String, Value>) -> FieldMap {
    let mut fields = FieldMap::new();
    let mut stack: Vec<(Option<String>, serde_json::map::Iter<'_>)> = vec![(None, root.iter())];

    while let Some((prefix, properties)) = stack.last_mut() {
        let Some((name, value)) = properties.next() else {
            stack.pop();
            continue;
        };

        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name.clone(),
        };

        // Later entries overwrite earlier ones on a path collision
        fields.insert(path.clone(), FieldType::of(value));

        if let Value::Object(nested) = value {
            stack.push((Some(path), nested.iter()));
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flatten(value: Value) -> FieldMap {
        match value {
            Value::Object(map) => flatten_fields(&map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_nested_objects_keep_their_own_entry() {
        let fields = flatten(json!({
            "wellId": "Alpha-1",
            "location": { "county": "Kern", "coords": { "lat": 35.1 } }
        }));

        assert_eq!(fields.len(), 5);
        assert_eq!(fields["wellId"], FieldType::String);
        assert_eq!(fields["location"], FieldType::Object);
        assert_eq!(fields["location.county"], FieldType::String);
        assert_eq!(fields["location.coords"], FieldType::Object);
        assert_eq!(fields["location.coords.lat"], FieldType::Number);
    }

    #[test]
    fn test_arrays_are_not_expanded() {
        let fields = flatten(json!({
            "readings": [{ "depth": 100 }, { "depth": 200 }]
        }));

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["readings"], FieldType::Array);
    }

    #[test]
    fn test_booleans_and_null_keep_literal_tags() {
        let fields = flatten(json!({ "active": true, "plugged": false, "operator": null }));

        assert_eq!(fields["active"], FieldType::True);
        assert_eq!(fields["plugged"], FieldType::False);
        assert_eq!(fields["operator"], FieldType::Null);
    }

    #[test]
    fn test_empty_object_has_no_fields() {
        assert!(flatten(json!({})).is_empty());
        let fields = flatten(json!({ "meta": {} }));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["meta"], FieldType::Object);
    }

    #[test]
    fn test_paths_follow_document_order() {
        let root = crate::utils::parse_object(
            r#"{"zeta":1,"location":{"state":"CA","county":"Kern"},"alpha":2,"location.state":true}"#,
            "canonical",
        )
        .unwrap();
        let fields = flatten_fields(&root);

        let paths: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec!["zeta", "location", "location.state", "location.county", "alpha"]
        );
        // The colliding literal key keeps the first position with the later kind
        assert_eq!(fields["location.state"], FieldType::True);
    }

    #[test]
    fn test_deep_nesting_from_text() {
        let depth = 1_000;
        let text = format!("{}{{\"leaf\":1}}{}", "{\"n\":".repeat(depth), "}".repeat(depth));

        let root = crate::utils::parse_object(&text, "canonical").unwrap();
        let fields = flatten_fields(&root);

        assert_eq!(fields.len(), depth + 1);
        let deepest = format!("{}leaf", "n.".repeat(depth));
        assert_eq!(fields[&deepest], FieldType::Number);
    }
}
