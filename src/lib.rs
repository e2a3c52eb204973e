pub mod app;
pub mod config;
pub mod emotion;
pub mod errors;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod series;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use series::build_series;
pub use state::AppState;
pub use storage::load_data;
