use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

const CLASSIFIER_BASE_URL: &str = "https://api-inference.huggingface.co/models";
const CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(20);

const POSITIVE_WORDS: [&str; 11] = [
    "happy", "joy", "grateful", "thankful", "hope", "excited", "calm", "peace", "good", "great",
    "love",
];

const NEGATIVE_WORDS: [&str; 15] = [
    "sad", "angry", "upset", "hate", "anxious", "anxiety", "fear", "panic", "bad", "terrible",
    "depressed", "alone", "tired", "stress", "stressed",
];

#[derive(Debug, Clone, PartialEq)]
pub struct EmotionAnalysis {
    pub label: String,
    pub scores: BTreeMap<String, f64>,
}

impl EmotionAnalysis {
    fn single(label: &str) -> Self {
        Self {
            label: label.to_string(),
            scores: BTreeMap::from([(label.to_string(), 1.0)]),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("classifier returned an unrecognised payload")]
    UnexpectedShape,
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifierResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Client for a hosted text-classification model returning `{label, score}` lists.
pub struct EmotionClassifier {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl EmotionClassifier {
    pub fn new(api_key: String, model: &str) -> Result<Self, ClassifierError> {
        let client = reqwest::Client::builder()
            .timeout(CLASSIFIER_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: format!("{CLASSIFIER_BASE_URL}/{model}"),
            api_key,
        })
    }

    pub async fn classify(&self, text: &str) -> Result<EmotionAnalysis, ClassifierError> {
        let payload: serde_json::Value = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_classifier_response(payload).ok_or(ClassifierError::UnexpectedShape)
    }
}

/// Labels journal text, preferring the remote classifier when one is configured.
pub struct EmotionAnalyzer {
    classifier: Option<EmotionClassifier>,
}

impl EmotionAnalyzer {
    pub fn new(classifier: Option<EmotionClassifier>) -> Self {
        Self { classifier }
    }

    pub fn lexicon_only() -> Self {
        Self::new(None)
    }

    pub async fn analyze(&self, text: &str) -> EmotionAnalysis {
        if let Some(classifier) = &self.classifier {
            match classifier.classify(text).await {
                Ok(analysis) => return analysis,
                Err(err) => warn!("emotion classifier unavailable, using lexicon: {err}"),
            }
        }

        lexicon_emotion(text)
    }
}

/// Accepts either `[[{label, score}, ..]]` or `[{label, score}, ..]`.
pub fn parse_classifier_response(payload: serde_json::Value) -> Option<EmotionAnalysis> {
    let items = match serde_json::from_value(payload).ok()? {
        ClassifierResponse::Nested(mut lists) => {
            if lists.is_empty() {
                return None;
            }
            lists.swap_remove(0)
        }
        ClassifierResponse::Flat(items) => items,
    };

    let mut top: Option<&LabelScore> = None;
    for item in &items {
        if top.is_none_or(|best| item.score > best.score) {
            top = Some(item);
        }
    }
    let label = top?.label.clone();

    let scores = items
        .into_iter()
        .map(|item| (item.label, item.score))
        .collect();

    Some(EmotionAnalysis { label, scores })
}

pub fn lexicon_emotion(text: &str) -> EmotionAnalysis {
    let text = text.to_lowercase();
    let hits = |words: &[&str]| words.iter().filter(|word| text.contains(*word)).count();
    let positive = hits(&POSITIVE_WORDS);
    let negative = hits(&NEGATIVE_WORDS);

    if positive > negative {
        return EmotionAnalysis::single("joy");
    }
    if positive == negative {
        return EmotionAnalysis::single("neutral");
    }

    let mentions = |needles: &[&str]| needles.iter().any(|needle| text.contains(needle));
    let label = if mentions(&["anx", "fear", "panic"]) {
        "fear"
    } else if mentions(&["angry", "hate"]) {
        "anger"
    } else if mentions(&["stress", "tired"]) {
        "disgust"
    } else {
        "sadness"
    };

    EmotionAnalysis::single(label)
}
