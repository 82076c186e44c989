//! CSV document persistence
//!
//! The tabular form of the record sequence. Records do not share a schema,
//! so the header is the sorted union of every key present across all
//! records; a record missing a column renders that cell empty.

use crate::output::OutputResult;
use crate::record::PropertyRecord;
use std::collections::BTreeSet;
use std::path::Path;

/// Writes the record sequence as a single CSV table
pub fn write_csv(records: &[PropertyRecord], path: &Path) -> OutputResult<()> {
    let columns: Vec<&str> = records
        .iter()
        .flat_map(PropertyRecord::keys)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut writer = csv::Writer::from_path(path)?;

    // With zero records the key union is empty and the document is header-only
    if !columns.is_empty() {
        writer.write_record(&columns)?;

        for record in records {
            let row: Vec<String> = columns
                .iter()
                .map(|&col| {
                    record
                        .get(col)
                        .map(|value| value.to_cell())
                        .unwrap_or_default()
                })
                .collect();
            writer.write_record(&row)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use tempfile::tempdir;

    #[test]
    fn test_header_is_sorted_union_of_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ads.csv");

        let mut first = PropertyRecord::new("https://site.example/ad/1");
        first.insert_first("title", FieldValue::Text("Casa".into()));
        let mut second = PropertyRecord::new("https://site.example/ad/2");
        second.insert_first("price", FieldValue::Text("350000".into()));

        write_csv(&[first, second], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("price,title,url"));
        assert_eq!(lines.next(), Some(",Casa,https://site.example/ad/1"));
        assert_eq!(lines.next(), Some("350000,,https://site.example/ad/2"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_zero_records_produces_no_data_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ads.csv");

        write_csv(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.trim().is_empty());
    }

    #[test]
    fn test_numeric_and_nested_cells_are_rendered() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ads.csv");

        let mut record = PropertyRecord::new("https://site.example/ad/1");
        record.insert_first("bedrooms", FieldValue::Number(3.0));
        record.insert_first(
            "offers",
            FieldValue::Other(serde_json::json!({"price": 1})),
        );

        write_csv(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("bedrooms,offers,url"));
        assert_eq!(
            lines.next(),
            Some(r#"3,"{""price"":1}",https://site.example/ad/1"#)
        );
    }
}
