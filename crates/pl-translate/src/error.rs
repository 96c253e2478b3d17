//! Translation error types.

use pl_core::PlError;
use pl_idf::IdfError;
use pl_model::ModelError;

pub type TranslateResult<T> = Result<T, TranslateError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    /// A loop is missing a structural piece or a run is malformed.
    #[error("Plant loop '{loop_name}': {what}")]
    Structure { loop_name: String, what: String },

    /// An object that must be named by another record has none.
    #[error("Object '{name}' translates to no record")]
    NoRecord { name: String },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Record error: {0}")]
    Idf(#[from] IdfError),

    #[error("Core error: {0}")]
    Core(#[from] PlError),
}

impl TranslateError {
    pub(crate) fn structure(loop_name: &str, what: impl Into<String>) -> Self {
        TranslateError::Structure {
            loop_name: loop_name.to_string(),
            what: what.into(),
        }
    }
}
