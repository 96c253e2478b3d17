use thiserror::Error;

pub type PlResult<T> = Result<T, PlError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}

/// Reject NaN and infinities before they reach a record field.
pub fn ensure_finite(what: &'static str, value: f64) -> PlResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlError::NonFinite { what, value })
    }
}
