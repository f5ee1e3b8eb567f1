use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One row of the raw study export. Every field except `study` is
/// optional; rows without a usable `study` value produce no node.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StudyRecord {
    #[serde(default)]
    pub study: Option<String>,
    #[serde(default)]
    pub faculty: Vec<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub student_count: Option<f64>,
    #[serde(default, rename = "related studies")]
    pub related: Vec<String>,
}

impl StudyRecord {
    /// The record's identity, or `None` when absent or empty.
    pub fn identity(&self) -> Option<&str> {
        self.study.as_deref().filter(|id| !id.is_empty())
    }
}

/// Counts arrive from a spreadsheet export and are not always numeric.
/// Anything that is not a JSON number is treated as missing rather than
/// failing the whole file.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rejects_empty_string() {
        let record = StudyRecord {
            study: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(record.identity(), None);
    }

    #[test]
    fn non_numeric_count_becomes_none() {
        let record: StudyRecord =
            serde_json::from_str(r#"{"study": "Law", "student_count": "n/a"}"#).unwrap();
        assert_eq!(record.student_count, None);
    }

    #[test]
    fn renamed_related_field_is_read() {
        let record: StudyRecord =
            serde_json::from_str(r#"{"study": "Law", "related studies": ["History"]}"#).unwrap();
        assert_eq!(record.related, vec!["History".to_owned()]);
    }
}
