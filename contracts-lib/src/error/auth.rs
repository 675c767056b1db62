//! Authentication error types

/// Errors raised by the session store and token handling.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No session is active.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The stored access token is past its `exp` claim.
    #[error("Access token expired")]
    TokenExpired,

    /// The token is not a decodable JWT.
    #[error("Malformed access token: {0}")]
    MalformedToken(String),

    /// Login or signup was refused.
    #[error("{0}")]
    Rejected(String),
}
