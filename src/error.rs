use thiserror::Error;

/// Failure taxonomy for the insight engine. None of these escape the public
/// analysis methods; adapters convert them into typed fallback values and
/// log the `kind` for operability.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("generative service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("malformed generative response: {0}")]
    MalformedResponse(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl InsightError {
    pub fn kind(&self) -> &'static str {
        match self {
            InsightError::ServiceUnavailable(_) => "service_unavailable",
            InsightError::MalformedResponse(_) => "malformed_response",
            InsightError::InvalidInput(_) => "invalid_input",
            InsightError::Config(_) => "config",
        }
    }
}
