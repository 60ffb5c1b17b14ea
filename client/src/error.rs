use thiserror::Error;

/// Error code the backend sends with a 401 when the bearer token has expired
pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";

#[derive(Debug, Error)]
pub enum ClientError {
    /// The session token was rejected as expired and has been cleared
    #[error("session expired, sign in again")]
    TokenExpired,

    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The backend answered with `success: false`
    #[error("{message}")]
    Api { code: String, message: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("response carried no data")]
    MissingData,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The caller has to authenticate again before retrying
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::TokenExpired)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
