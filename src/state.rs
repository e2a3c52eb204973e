use crate::emotion::EmotionAnalyzer;
use crate::models::JournalData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<JournalData>>,
    pub analyzer: Arc<EmotionAnalyzer>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: JournalData, analyzer: EmotionAnalyzer) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            analyzer: Arc::new(analyzer),
        }
    }
}
