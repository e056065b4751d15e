use agelens::app::AgeLensApp;
use agelens::config::Settings;
use agelens::error::AppError;
use tracing::Level;

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    let settings = Settings::load()?;
    AgeLensApp::start_gui(settings);
    Ok(())
}
