//! Error types

mod api;
mod auth;
mod field;
mod upload;
mod validation;

pub use api::*;
pub use auth::*;
pub use field::*;
pub use upload::*;
pub use validation::*;

/// Top-level error returned by client and session operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session or token problem.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Typed field access on a record failed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A file was rejected before upload.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Request body could not be encoded or a response could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file access failed (reading an upload, for instance).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The caller supplied input the API would reject anyway.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns the messages a user should see for this error.
    ///
    /// API errors expand into one message per validation failure; everything
    /// else yields its display text.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            Self::Api(err) => err.user_messages(),
            Self::Upload(err) => vec![err.to_string()],
            Self::InvalidInput(message) => vec![message.clone()],
            other => vec![other.to_string()],
        }
    }

    /// Returns `true` if the error means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::Unauthorized { .. })
                | Self::Auth(AuthError::NotAuthenticated | AuthError::TokenExpired)
        )
    }
}
