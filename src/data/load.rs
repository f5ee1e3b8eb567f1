use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::StudyRecord;

pub fn load_records(path: &Path) -> Result<Vec<StudyRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read study data from {}", path.display()))?;
    parse_records(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parses a JSON array of study records. Rows that do not deserialize
/// (wrong field types, non-object entries) are dropped; the builder
/// later skips rows without an identity as well.
pub fn parse_records(raw: &str) -> Result<Vec<StudyRecord>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid study data JSON")?;
    let rows = parsed
        .as_array()
        .ok_or_else(|| anyhow!("expected a JSON array of study records"))?;

    Ok(rows
        .iter()
        .filter_map(|row| StudyRecord::deserialize(row).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_record() {
        let records = parse_records(
            r#"[{"study": "Econometrics", "faculty": ["Economics"],
                 "student_count": 240, "related studies": ["Statistics"]}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identity(), Some("Econometrics"));
        assert_eq!(records[0].faculty, vec!["Economics".to_owned()]);
        assert_eq!(records[0].student_count, Some(240.0));
    }

    #[test]
    fn malformed_rows_are_dropped() {
        let records = parse_records(
            r#"[{"study": "Law"}, 42, {"study": "Art", "faculty": "not-a-list"}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identity(), Some("Law"));
    }

    #[test]
    fn non_array_input_is_an_error() {
        assert!(parse_records(r#"{"study": "Law"}"#).is_err());
    }

    #[test]
    fn records_without_identity_survive_parsing() {
        // The builder decides what to do with them; parsing keeps them.
        let records = parse_records(r#"[{"faculty": ["Science"]}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identity(), None);
    }
}
