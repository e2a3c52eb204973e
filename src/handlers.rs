use crate::errors::AppError;
use crate::journal::{add_entry, entry_records, feed, series_for, to_record, FEED_LIMIT};
use crate::models::{
    AliasQuery, Entry, EntryForm, EntryRecord, IndexQuery, NewEntryRequest, Point, StoredEntry,
};
use crate::series::build_series;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::{render_feed, render_index, Notice};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::Utc;
use tracing::{error, info};

pub async fn index(Query(query): Query<IndexQuery>) -> Html<String> {
    let notice = query.notice.as_deref().and_then(Notice::parse);
    Html(render_index(notice))
}

pub async fn feed_page(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_feed(&feed(&data, FEED_LIMIT)))
}

pub async fn submit_entry(State(state): State<AppState>, Form(form): Form<EntryForm>) -> Redirect {
    let notice = match save_entry(&state, &form.alias, &form.entry, form.is_anonymous()).await {
        Ok(_) => Notice::Saved,
        Err(err) if err.status == StatusCode::BAD_REQUEST => Notice::Empty,
        Err(err) => {
            error!("failed to save journal entry: {}", err.message);
            Notice::Error
        }
    };
    Redirect::to(&format!("/?notice={}", notice.as_str()))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<NewEntryRequest>,
) -> Result<(StatusCode, Json<EntryRecord>), AppError> {
    let entry = save_entry(&state, &payload.alias, &payload.entry, payload.anonymous).await?;
    Ok((StatusCode::CREATED, Json(to_record(&entry))))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<AliasQuery>,
) -> Json<Vec<EntryRecord>> {
    let data = state.data.lock().await;
    Json(entry_records(&data, query.alias.as_deref()))
}

pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<AliasQuery>,
) -> Json<Vec<Point>> {
    let data = state.data.lock().await;
    Json(series_for(&data, query.alias.as_deref()))
}

pub async fn build_series_from(Json(entries): Json<Vec<Entry>>) -> Json<Vec<Point>> {
    Json(build_series(&entries))
}

async fn save_entry(
    state: &AppState,
    alias: &str,
    text: &str,
    anonymous: bool,
) -> Result<StoredEntry, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("entry text must not be empty"));
    }

    // Classification may hit the network; keep it outside the lock.
    let analysis = state.analyzer.analyze(text).await;

    let mut data = state.data.lock().await;
    let previous_id = data.next_id;
    let entry = add_entry(&mut data, alias, text, anonymous, analysis, Utc::now());
    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.entries.pop();
        data.next_id = previous_id;
        return Err(err);
    }

    info!(id = entry.id, label = %entry.emotion_label, "journal entry saved");
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionAnalyzer;
    use crate::models::JournalData;
    use std::path::PathBuf;

    fn state_at(data_path: PathBuf) -> AppState {
        AppState::new(data_path, JournalData::default(), EmotionAnalyzer::lexicon_only())
    }

    #[tokio::test]
    async fn save_entry_persists_and_assigns_id() {
        let mut path = std::env::temp_dir();
        path.push(format!("mood_journal_handlers_{}.json", std::process::id()));
        let state = state_at(path.clone());

        let entry = save_entry(&state, "river", "  a great day  ", false).await.unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(entry.id, 1);
        assert_eq!(entry.entry_text, "a great day");
        assert_eq!(entry.emotion_label, "joy");
        assert_eq!(state.data.lock().await.entries.len(), 1);
    }

    #[tokio::test]
    async fn failed_save_rolls_back_entry_and_id() {
        let mut path = std::env::temp_dir();
        path.push(format!("mood_journal_missing_dir_{}", std::process::id()));
        path.push("journal.json");
        let state = state_at(path);

        let err = save_entry(&state, "river", "a great day", false)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let data = state.data.lock().await;
        assert!(data.entries.is_empty());
        assert_eq!(data.next_id, 0);
    }

    #[tokio::test]
    async fn blank_entry_is_rejected() {
        let state = state_at(std::env::temp_dir().join("mood_journal_unused.json"));
        let err = save_entry(&state, "river", "   ", false).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(state.data.lock().await.next_id, 0);
    }
}
