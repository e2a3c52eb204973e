use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw `created_at` value of an entry, parsed lazily by the series builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CreatedAt {
    At(DateTime<Utc>),
    Text(String),
    EpochMillis(f64),
    #[default]
    Missing,
}

impl From<Value> for CreatedAt {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => number.as_f64().map_or(Self::Missing, Self::EpochMillis),
            _ => Self::Missing,
        }
    }
}

/// One journal entry as seen by the series builder.
///
/// Deserializes from loosely shaped JSON: a missing or non-object
/// `emotion_scores`, or a non-numeric `joy` inside it, leaves `joy_score`
/// empty instead of failing.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawEntry")]
pub struct Entry {
    pub created_at: CreatedAt,
    pub joy_score: Option<f64>,
    pub emotion_label: Option<String>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    created_at: Value,
    #[serde(default)]
    emotion_scores: Value,
    #[serde(default)]
    emotion_label: Value,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        let joy_score = match &raw.emotion_scores {
            Value::Object(scores) => scores.get("joy").and_then(Value::as_f64),
            _ => None,
        };
        let emotion_label = match raw.emotion_label {
            Value::String(label) => Some(label),
            _ => None,
        };

        Self {
            created_at: CreatedAt::from(raw.created_at),
            joy_score,
            emotion_label,
        }
    }
}

impl From<&StoredEntry> for Entry {
    fn from(stored: &StoredEntry) -> Self {
        Self {
            created_at: CreatedAt::At(stored.created_at),
            joy_score: stored.emotion_scores.get("joy").copied(),
            emotion_label: Some(stored.emotion_label.clone()),
        }
    }
}

/// A plotted joy percentage. `x` is `None` when the entry's timestamp could
/// not be parsed; it serializes as epoch milliseconds or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub x: Option<DateTime<Utc>>,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: u64,
    pub user_alias: String,
    pub entry_text: String,
    pub emotion_label: String,
    pub emotion_scores: BTreeMap<String, f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JournalData {
    pub next_id: u64,
    pub entries: Vec<StoredEntry>,
}

#[derive(Debug, Serialize)]
pub struct EntryRecord {
    pub id: u64,
    pub user_alias: String,
    pub entry_text: String,
    pub emotion_label: String,
    pub emotion_scores: BTreeMap<String, f64>,
    pub created_at: String,
}

#[derive(Debug)]
pub struct FeedItem {
    pub id: u64,
    pub user_alias: String,
    pub snippet: String,
    pub emotion_label: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub entry: String,
    #[serde(default)]
    pub anonymous: bool,
}

#[derive(Debug, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub entry: String,
    pub anonymous: Option<String>,
}

impl EntryForm {
    pub fn is_anonymous(&self) -> bool {
        self.anonymous.as_deref() == Some("on")
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AliasQuery {
    pub alias: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct IndexQuery {
    pub notice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entry_reads_numeric_joy_score() {
        let entry: Entry = serde_json::from_value(json!({
            "created_at": "2024-03-01T10:00:00Z",
            "emotion_scores": { "joy": 0.73, "sadness": 0.1 },
            "emotion_label": "joy"
        }))
        .unwrap();

        assert_eq!(entry.joy_score, Some(0.73));
        assert_eq!(entry.emotion_label.as_deref(), Some("joy"));
        assert_eq!(entry.created_at, CreatedAt::Text("2024-03-01T10:00:00Z".into()));
    }

    #[test]
    fn entry_ignores_malformed_scores() {
        let string_joy: Entry = serde_json::from_value(json!({
            "created_at": 1_700_000_000_000i64,
            "emotion_scores": { "joy": "0.9" }
        }))
        .unwrap();
        assert_eq!(string_joy.joy_score, None);
        assert_eq!(string_joy.created_at, CreatedAt::EpochMillis(1_700_000_000_000.0));

        let list_scores: Entry = serde_json::from_value(json!({
            "created_at": "2024-03-01",
            "emotion_scores": [0.5],
            "emotion_label": 3
        }))
        .unwrap();
        assert_eq!(list_scores.joy_score, None);
        assert_eq!(list_scores.emotion_label, None);
    }

    #[test]
    fn entry_without_fields_is_empty() {
        let entry: Entry = serde_json::from_value(json!({})).unwrap();
        assert_eq!(entry, Entry::default());
    }

    #[test]
    fn point_serializes_millis_or_null() {
        let valid = Point {
            x: DateTime::from_timestamp_millis(1_700_000_000_000),
            y: 42,
        };
        let invalid = Point { x: None, y: 0 };

        assert_eq!(
            serde_json::to_value(&valid).unwrap(),
            json!({ "x": 1_700_000_000_000i64, "y": 42 })
        );
        assert_eq!(serde_json::to_value(&invalid).unwrap(), json!({ "x": null, "y": 0 }));
    }
}
