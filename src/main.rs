use mood_journal::emotion::{EmotionAnalyzer, EmotionClassifier};
use mood_journal::{load_data, router, AppConfig, AppState};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let classifier = match config.hf_api_key.clone() {
        Some(api_key) => match EmotionClassifier::new(api_key, &config.hf_model) {
            Ok(classifier) => {
                info!(model = %config.hf_model, "using remote emotion classifier");
                Some(classifier)
            }
            Err(err) => {
                warn!("emotion classifier disabled: {err}");
                None
            }
        },
        None => {
            info!("no HUGGINGFACE_API_KEY set, using lexicon emotion analysis");
            None
        }
    };

    let data = load_data(&config.data_path).await;
    let state = AppState::new(config.data_path, data, EmotionAnalyzer::new(classifier));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
