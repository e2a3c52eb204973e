use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/journal.json";
const DEFAULT_MODEL: &str = "j-hartmann/emotion-english-distilroberta-base";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub hf_api_key: Option<String>,
    pub hf_model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            port: var("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            data_path: var("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            hf_api_key: var("HUGGINGFACE_API_KEY"),
            hf_model: var("HF_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}
