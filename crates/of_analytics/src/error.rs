use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Input record violates a `MatchEvent` invariant.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyticsError {
    pub(crate) fn invalid_parameter(name: &str, value: f64, expected: &str) -> Self {
        AnalyticsError::InvalidParameter(format!("{name}={value} ({expected})"))
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Reject NaN/infinite or non-positive values.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AnalyticsError::invalid_parameter(name, value, "must be finite and > 0"))
    }
}

pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AnalyticsError::invalid_parameter(name, value, "must be finite and >= 0"))
    }
}
