use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between reading a curl command and getting
/// the response body back.
#[derive(Debug, Error)]
pub enum Error {
    /// The command text was empty (or only whitespace / a bare `curl`).
    #[error("empty curl command")]
    EmptyCommand,

    /// No single-quoted span was found to use as the target url.
    #[error("URL not found in curl command")]
    UrlNotFound,

    /// The command file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The request could not be rendered as JSON.
    #[error("failed to serialize request: {0}")]
    Json(#[from] serde_json::Error),

    /// Method, url or a header could not be turned into a valid HTTP request.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] http::Error),

    /// Connecting, sending or waiting for the response failed.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    ResponseRead(#[source] BoxError),
}

impl Error {
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::EmptyCommand | Error::UrlNotFound)
    }
}
