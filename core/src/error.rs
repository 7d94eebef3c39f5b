use thiserror::Error;

/// Error type for rate, distance, depth and payload computations.
#[derive(Error, Debug, Clone, PartialEq, uniffi::Error)]
#[uniffi(flat_error)]
pub enum CalcError {
    #[error("invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("invalid rate table: {0}")]
    InvalidRateTable(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl CalcError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Reject NaN, infinities and negative values for a measured quantity.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<f64, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, format!("{} is not finite", value)));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, format!("{} is negative", value)));
    }
    Ok(value)
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, format!("{} is not finite", value)))
    }
}
