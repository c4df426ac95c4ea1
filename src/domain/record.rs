use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single row returned by a dataset endpoint.
///
/// Records are kept as the decoded JSON object so that datasets can look
/// fields up by name without a fixed schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Build a record from field/value pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    /// Look up a field as display text.
    ///
    /// Strings are returned as-is, other JSON values as their JSON text.
    /// A missing key or a JSON `null` yields `None`.
    pub fn field(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parameters for one schedule query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Day of the week, 0 = Sunday
    pub day: u8,
    /// Time of day, 24h `HH:MM`
    pub time: String,
    pub page_size: u32,
    pub page_offset: u64,
}

/// One batch of records fetched by a single request.
///
/// `records` is `None` when the endpoint throttled the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub offset: u64,
    pub records: Option<Vec<Record>>,
}

impl Page {
    pub fn is_throttled(&self) -> bool {
        self.records.is_none()
    }

    pub fn len(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this page ends the result set for the given page size
    pub fn is_last(&self, page_size: u32) -> bool {
        self.is_throttled() || self.len() < page_size as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_decode() {
        let records: Vec<Record> = serde_json::from_str(
            r#"[{"applicant": "Taco Co", "location": "Market St", "objectid": 42}]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field("applicant").as_deref(), Some("Taco Co"));
        assert_eq!(records[0].field("objectid").as_deref(), Some("42"));
        assert_eq!(records[0].field("missing"), None);
    }

    #[test]
    fn test_null_field_is_missing() {
        let record: Record = serde_json::from_str(r#"{"applicant": null}"#).unwrap();
        assert_eq!(record.field("applicant"), None);
    }

    #[test]
    fn test_from_pairs() {
        let record = Record::from_pairs([("applicant", "NAME"), ("location", "ADDRESS")]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.field("location").as_deref(), Some("ADDRESS"));
    }

    #[test]
    fn test_page_termination() {
        let full = Page {
            offset: 0,
            records: Some(vec![Record::default(), Record::default()]),
        };
        let short = Page {
            offset: 2,
            records: Some(vec![Record::default()]),
        };
        let throttled = Page {
            offset: 0,
            records: None,
        };

        assert!(!full.is_last(2));
        assert!(short.is_last(2));
        assert!(throttled.is_last(2));
        assert!(throttled.is_throttled());
        assert!(throttled.is_empty());
    }
}
