// Error type for everything that talks to, or parses, the Yahoo API.

use std::path::PathBuf;

use thiserror::Error;

use crate::auth::TOKEN_ENV_VAR;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no OAuth token found; run `huddle auth` or set {TOKEN_ENV_VAR}")]
    MissingToken,

    #[error("invalid OAuth token: {0}")]
    InvalidToken(String),

    #[error("OAuth token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("HTTP {status} from {endpoint}: {body}")]
    Http {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("unexpected {payload} payload: expected {expected} at `{path}`")]
    UnexpectedShape {
        payload: &'static str,
        path: String,
        expected: &'static str,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    /// Authentication problems need a manual re-auth; everything else only
    /// affects the one fetch that raised it.
    pub fn is_auth(&self) -> bool {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken(_) | ApiError::RefreshFailed(_) => true,
            ApiError::Http { status, .. } => *status == 401,
            _ => false,
        }
    }
}
