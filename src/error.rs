use std::path::PathBuf;
use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Camera Error: {0}")]
    Camera(#[from] CameraError),
    #[error("Detection Error: {0}")]
    Detection(#[from] DetectionError),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("UI Error: {0}")]
    Ui(String),
}

// Camera Error Type
#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Failed to capture frame: {0}")]
    Capture(String),
    #[error("The camera stream is closed.")]
    StreamClosed,
    #[error("The camera is already started.")]
    AlreadyStarted,
}

/// Errors from the detection provider. Only the model-load variants are
/// session-fatal; `Inference` is absorbed tick-by-tick in the sampling loop.
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("Failed to read model file {}: {source}", path.display())]
    ModelLoad {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse model file {}: {source}", path.display())]
    ModelParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Model weights are invalid: {0}")]
    ModelInvalid(String),
    #[error("Models are not loaded.")]
    ModelsNotLoaded,
    #[error("Detection failed: {0}")]
    Inference(String),
}
