//! JSON document persistence
//!
//! The canonical structured form: a pretty-printed array of records, one
//! mapping per ad. This is the document the report reads back.

use crate::output::OutputResult;
use crate::record::PropertyRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the full record sequence as a JSON array
pub fn write_json(records: &[PropertyRecord], path: &Path) -> OutputResult<()> {
    let json = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}

/// Loads a previously persisted record sequence
pub fn load_records(path: &Path) -> OutputResult<Vec<PropertyRecord>> {
    let content = std::fs::read_to_string(path)?;
    let records = serde_json::from_str(&content)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_preserves_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ads.json");

        let mut first = PropertyRecord::new("https://site.example/ad/1");
        first.insert_first("title", FieldValue::Text("Casa".into()));
        first.insert_first("price", FieldValue::Text("350000".into()));
        let second = PropertyRecord::new("https://site.example/ad/2");

        let records = vec![first, second];
        write_json(&records, &path).unwrap();

        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded.len(), records.len());
        for (loaded, original) in loaded.iter().zip(&records) {
            let loaded_keys: Vec<_> = loaded.keys().collect();
            let original_keys: Vec<_> = original.keys().collect();
            assert_eq!(loaded_keys, original_keys);
        }
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_empty_sequence_writes_empty_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ads.json");

        write_json(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "[]");
        assert!(load_records(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(load_records(Path::new("/nonexistent/ads.json")).is_err());
    }
}
