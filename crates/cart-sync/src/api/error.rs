use reqwest::StatusCode;

use super::cart::add::CSRF_FIELD;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("form has no `{}` field", CSRF_FIELD)]
    MissingCsrfToken,
}

impl ApiError {
    /// True when the server answered but the body was not the JSON we asked for.
    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }
}
