use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the Spotify Web API.
///
/// Every variant is fatal for a run: nothing is retried, and the operator is
/// expected to fix the cause and run the tool again. Because a run only ever
/// adds what is missing, re-running after a failure is always safe.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API answered with 401: the bearer token is missing, invalid or expired.
    #[error("unauthorized, the access token was rejected")]
    Unauthorized,

    /// Any other non-success status. Carries the response body for debugging.
    #[error("unexpected status {status} for {url}: {body}")]
    UnexpectedStatus {
        status: StatusCode,
        url: String,
        body: String,
    },

    /// Connection, TLS or other transport level failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A request payload that cannot be serialized.
    #[error("cannot encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// A response body that does not have the expected shape.
    #[error("cannot decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Errors raised while assembling the run configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no access token given, set SPOTIFY_TOKEN or pass --token")]
    MissingToken,

    #[error("invalid grouping '{0}', expected one of: year, quarter, month")]
    InvalidGranularity(String),
}
