use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No targets on record for user '{0}'. Run the `profile` command first.")]
    MissingTargets(String),

    #[error("Menu extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Why the external text-understanding path could not produce items.
///
/// None of these are fatal: the caller falls back to the local parser and
/// shows [`ExtractionError::advisory`] to the user.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("request timed out")]
    Timeout,

    #[error("quota exceeded (insufficient_quota)")]
    QuotaExceeded,

    #[error("rate limited (429)")]
    RateLimited,

    #[error("service returned status {0}")]
    Http(u16),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("empty response")]
    EmptyResponse,
}

impl ExtractionError {
    /// Message shown to the user when falling back to the local parser.
    pub fn advisory(&self) -> &'static str {
        match self {
            ExtractionError::QuotaExceeded => {
                "Extraction service quota exceeded. Add credits to your account. Using local parser."
            }
            ExtractionError::RateLimited => {
                "Extraction service rate limit reached. Using local parser."
            }
            ExtractionError::Timeout => "Extraction service timed out. Using local parser.",
            _ => "Extraction service unavailable. Using local parser.",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
