use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The server answered with its error envelope. `message` is the
    /// user-facing line; `errors` carries per-field validation detail when
    /// the server produced any.
    #[error("{message}")]
    ApiError {
        status: u16,
        message: String,
        errors: Vec<String>,
    },

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),
}
