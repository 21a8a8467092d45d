//! Translation provider errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Translation service returned no message")]
    EmptyResponse,

    #[error("Missing OpenAI API key")]
    MissingApiKey,

    /// The HTTP client could not be configured.
    #[error("Failed to build translation client: {0}")]
    Client(String),
}
