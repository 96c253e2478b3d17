//! Error types for the pl-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Plant loop not found: {0}")]
    PlantLoopNotFound(String),

    #[error("Model build failed: {0}")]
    Compile(String),

    #[error("Translation failed: {0}")]
    Translate(String),

    #[error("Failed to write IDF file: {path}")]
    IdfFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pl-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pl_project::ProjectError> for AppError {
    fn from(err: pl_project::ProjectError) -> Self {
        match err {
            pl_project::ProjectError::Validation(v) => AppError::Validation(v.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<pl_project::ValidationError> for AppError {
    fn from(err: pl_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<pl_model::ModelError> for AppError {
    fn from(err: pl_model::ModelError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<pl_translate::TranslateError> for AppError {
    fn from(err: pl_translate::TranslateError) -> Self {
        AppError::Translate(err.to_string())
    }
}
