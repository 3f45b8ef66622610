//! Country list loading.
//!
//! The list is a translation map such as `{"Chile": "Chile", "Peru": "Perú"}`
//! whose values, in file order, are the names used in category titles.
//! A plain array of names is accepted too.

use std::path::Path;

use serde_json::Value;

use crate::IngestError;

/// Reads and parses the country list at `path`.
pub fn load_countries(path: &Path) -> Result<Vec<String>, IngestError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;
    countries_from_json(&raw)
}

/// Extracts country names from JSON text. Blank and non-string entries are
/// skipped with a warning.
pub fn countries_from_json(raw: &str) -> Result<Vec<String>, IngestError> {
    let values: Vec<Value> = match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        Value::Array(items) => items,
        Value::Null => return Err(IngestError::Shape("null")),
        Value::Bool(_) => return Err(IngestError::Shape("a boolean")),
        Value::Number(_) => return Err(IngestError::Shape("a number")),
        Value::String(_) => return Err(IngestError::Shape("a string")),
    };
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            other => {
                tracing::warn!(entry = %other, "skipping invalid country entry");
                None
            },
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_values_keep_file_order() {
        let countries =
            countries_from_json(r#"{"Peru": "Perú", "Chile": "Chile", "Costa Rica": "Costa Rica"}"#)
                .unwrap();
        assert_eq!(countries, vec!["Perú", "Chile", "Costa Rica"]);
    }

    #[test]
    fn array_is_accepted() {
        let countries = countries_from_json(r#"["México", "Cuba"]"#).unwrap();
        assert_eq!(countries, vec!["México", "Cuba"]);
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let countries = countries_from_json(r#"{"a": "Chile", "b": 3, "c": "  "}"#).unwrap();
        assert_eq!(countries, vec!["Chile"]);
    }

    #[test]
    fn scalar_is_rejected() {
        assert!(matches!(countries_from_json("42"), Err(IngestError::Shape("a number"))));
        assert!(matches!(countries_from_json("{oops"), Err(IngestError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_countries(Path::new("/definitely/not/here/translations.json")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
