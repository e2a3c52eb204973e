use crate::emotion::EmotionAnalysis;
use crate::models::{Entry, EntryRecord, FeedItem, JournalData, Point, StoredEntry};
use crate::series::build_series;
use chrono::{DateTime, SecondsFormat, Utc};

pub const FEED_LIMIT: usize = 50;
const SNIPPET_CHARS: usize = 280;
const ANONYMOUS: &str = "Anonymous";

/// Appends a new entry and returns a copy of it. An anonymous entry keeps
/// no alias.
pub fn add_entry(
    data: &mut JournalData,
    alias: &str,
    text: &str,
    anonymous: bool,
    analysis: EmotionAnalysis,
    now: DateTime<Utc>,
) -> StoredEntry {
    data.next_id = data.next_id.saturating_add(1);
    let entry = StoredEntry {
        id: data.next_id,
        user_alias: if anonymous { String::new() } else { alias.trim().to_string() },
        entry_text: text.trim().to_string(),
        emotion_label: analysis.label,
        emotion_scores: analysis.scores,
        created_at: now,
    };
    data.entries.push(entry.clone());
    entry
}

/// Entries for the JSON API, oldest first, optionally limited to one alias.
pub fn entry_records(data: &JournalData, alias: Option<&str>) -> Vec<EntryRecord> {
    let mut entries = filter_by_alias(data, alias);
    entries.sort_by_key(|entry| entry.created_at);
    entries.into_iter().map(to_record).collect()
}

pub fn series_for(data: &JournalData, alias: Option<&str>) -> Vec<Point> {
    let entries: Vec<Entry> = filter_by_alias(data, alias)
        .into_iter()
        .map(Entry::from)
        .collect();
    build_series(&entries)
}

/// Most recent entries first, text cut down to a snippet.
pub fn feed(data: &JournalData, limit: usize) -> Vec<FeedItem> {
    let mut entries: Vec<&StoredEntry> = data.entries.iter().collect();
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
        .into_iter()
        .take(limit)
        .map(|entry| FeedItem {
            id: entry.id,
            user_alias: display_alias(&entry.user_alias),
            snippet: entry.entry_text.chars().take(SNIPPET_CHARS).collect(),
            emotion_label: entry.emotion_label.clone(),
            created_at: entry.created_at,
        })
        .collect()
}

pub fn to_record(entry: &StoredEntry) -> EntryRecord {
    EntryRecord {
        id: entry.id,
        user_alias: display_alias(&entry.user_alias),
        entry_text: entry.entry_text.clone(),
        emotion_label: entry.emotion_label.clone(),
        emotion_scores: entry.emotion_scores.clone(),
        created_at: entry.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

fn filter_by_alias<'a>(data: &'a JournalData, alias: Option<&str>) -> Vec<&'a StoredEntry> {
    let alias = alias.map(str::trim).filter(|alias| !alias.is_empty());
    data.entries
        .iter()
        .filter(|entry| alias.is_none_or(|alias| entry.user_alias == alias))
        .collect()
}

fn display_alias(alias: &str) -> String {
    if alias.is_empty() {
        ANONYMOUS.to_string()
    } else {
        alias.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::lexicon_emotion;
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn journal() -> JournalData {
        let mut data = JournalData::default();
        let start = base_time();
        for (alias, text, anonymous, at) in [
            ("river", "a great day", false, start + Duration::days(2)),
            ("river", "felt alone", false, start),
            ("sky", "hopeful", true, start + Duration::days(1)),
        ] {
            add_entry(&mut data, alias, text, anonymous, lexicon_emotion(text), at);
        }
        data
    }

    #[test]
    fn add_entry_assigns_ids_and_clears_anonymous_alias() {
        let data = journal();
        let ids: Vec<u64> = data.entries.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(data.next_id, 3);
        assert_eq!(data.entries[2].user_alias, "");
        assert_eq!(data.entries[0].emotion_label, "joy");
    }

    #[test]
    fn records_are_oldest_first_and_filtered() {
        let data = journal();

        let all = entry_records(&data, None);
        let ids: Vec<u64> = all.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(all[1].user_alias, "Anonymous");
        assert_eq!(all[0].created_at, "2024-03-01T09:00:00Z");

        let river = entry_records(&data, Some(" river "));
        assert_eq!(river.len(), 2);
        assert!(river.iter().all(|record| record.user_alias == "river"));

        assert_eq!(entry_records(&data, Some("")).len(), 3);
        assert!(entry_records(&data, Some("nobody")).is_empty());
    }

    #[test]
    fn series_follows_alias_filter() {
        let data = journal();
        let series = series_for(&data, Some("river"));
        let ys: Vec<i64> = series.iter().map(|point| point.y).collect();
        assert_eq!(ys, vec![0, 100]);
        assert_eq!(series[0].x, Some(base_time()));
        assert_eq!(series_for(&data, None).len(), 3);
    }

    #[test]
    fn feed_is_newest_first_and_truncated() {
        let mut data = journal();
        let long_text = "é".repeat(400);
        let later = base_time() + Duration::days(5);
        add_entry(&mut data, "", &long_text, false, lexicon_emotion(&long_text), later);

        let items = feed(&data, 2);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 4);
        assert_eq!(items[0].snippet.chars().count(), 280);
        assert_eq!(items[0].user_alias, "Anonymous");
        assert_eq!(items[1].id, 1);
    }
}
