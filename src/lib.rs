pub mod app;
pub mod cloud;
mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod notification;
pub mod state;
pub mod storage;
pub mod text;
pub mod ui;
pub use config::{AppConfig, ConfigError};
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary and by embedding integrations.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting wordcloud-client");

    let app = app::App::new()?;
    app.start();

    tracing::info!("shutdown complete");
    Ok(())
}
