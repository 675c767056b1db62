//! API error types

use std::time::Duration;

use serde::Deserialize;

use super::ValidationDetail;

const ACCESS_DENIED: &str = "Access denied";
const NOT_FOUND: &str = "Resource not found";
const VALIDATION_FALLBACK: &str = "Validation error";
const SERVER_ERROR: &str = "Server error. Please try again later.";
const TIMEOUT: &str = "Request timeout. Please try again.";
const NETWORK: &str = "Network error. Please check your connection.";
const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401. The stored session must be discarded.
    #[error("HTTP 401: {}", .detail.as_deref().unwrap_or("unauthorized"))]
    Unauthorized { detail: Option<String> },

    /// HTTP 403.
    #[error("HTTP 403: {}", .detail.as_deref().unwrap_or(ACCESS_DENIED))]
    Forbidden { detail: Option<String> },

    /// HTTP 404.
    #[error("HTTP 404: {}", .detail.as_deref().unwrap_or(NOT_FOUND))]
    NotFound { detail: Option<String> },

    /// HTTP 422 with the server's field-level complaints.
    #[error("HTTP 422: {} validation error(s)", .details.len())]
    Validation { details: Vec<ValidationDetail> },

    /// Any other non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        /// `detail` field from the error body, if the server sent one.
        detail: Option<String>,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        message: String,
        body: Option<String>,
    },
}

/// Error body shape used by the API: `{"detail": "..."}` or
/// `{"detail": [{"loc": [...], "msg": "..."}]}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<DetailBody>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DetailBody {
    Message(String),
    Items(Vec<ValidationDetail>),
    Other(serde_json::Value),
}

impl ApiError {
    /// Builds the error for a non-success response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail);

        let (detail, items) = match parsed {
            Some(DetailBody::Message(message)) => (Some(message), Vec::new()),
            Some(DetailBody::Items(items)) => (None, items),
            Some(DetailBody::Other(value)) => (Some(value.to_string()), Vec::new()),
            None => (None, Vec::new()),
        };

        match status {
            401 => Self::Unauthorized { detail },
            403 => Self::Forbidden { detail },
            404 => Self::NotFound { detail },
            422 => {
                let details = if items.is_empty() {
                    vec![ValidationDetail::message(
                        detail.unwrap_or_else(|| VALIDATION_FALLBACK.to_string()),
                    )]
                } else {
                    items
                };
                Self::Validation { details }
            }
            _ => Self::Http {
                status,
                message: detail.clone().unwrap_or_else(|| body.to_string()),
                detail,
            },
        }
    }

    /// Classifies a transport error, turning reqwest timeouts into [`ApiError::Timeout`].
    pub fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Network(err)
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Validation { .. } => Some(422),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the server-provided `detail` text, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail }
            | Self::Forbidden { detail }
            | Self::NotFound { detail }
            | Self::Http { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Messages shown to the user, one per problem.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            Self::Unauthorized { .. } => vec![SESSION_EXPIRED.to_string()],
            Self::Forbidden { .. } => vec![ACCESS_DENIED.to_string()],
            Self::NotFound { .. } => vec![NOT_FOUND.to_string()],
            Self::Validation { details } => details.iter().map(|d| d.to_string()).collect(),
            Self::Http { status, .. } if *status >= 500 => vec![SERVER_ERROR.to_string()],
            Self::Http { message, detail, .. } => {
                vec![detail.clone().unwrap_or_else(|| message.clone())]
            }
            Self::Timeout(_) => vec![TIMEOUT.to_string()],
            Self::Network(_) => vec![NETWORK.to_string()],
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_keeps_detail() {
        let err = ApiError::from_response(401, r#"{"detail":"Could not validate credentials"}"#);
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.detail(), Some("Could not validate credentials"));
    }

    #[test]
    fn validation_list_renders_second_loc_segment() {
        let body = r#"{"detail":[{"loc":["body","question"],"msg":"field required","type":"missing"}]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(err.user_messages(), vec!["question: field required"]);
    }

    #[test]
    fn validation_string_detail_is_single_message() {
        let err = ApiError::from_response(422, r#"{"detail":"Unsupported file"}"#);
        assert_eq!(err.user_messages(), vec!["Unsupported file"]);
    }

    #[test]
    fn validation_without_body_falls_back() {
        let err = ApiError::from_response(422, "");
        assert_eq!(err.user_messages(), vec!["Validation error"]);
    }

    #[test]
    fn server_errors_are_generic() {
        let err = ApiError::from_response(503, "upstream down");
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.user_messages(), vec![SERVER_ERROR]);
    }

    #[test]
    fn other_client_errors_prefer_detail() {
        let err = ApiError::from_response(400, r#"{"detail":"Username already registered"}"#);
        assert_eq!(err.user_messages(), vec!["Username already registered"]);

        let err = ApiError::from_response(409, "conflict");
        assert_eq!(err.user_messages(), vec!["conflict"]);
    }

    #[test]
    fn forbidden_and_not_found_messages() {
        assert_eq!(ApiError::from_response(403, "").user_messages(), vec![ACCESS_DENIED]);
        assert_eq!(ApiError::from_response(404, "{}").user_messages(), vec![NOT_FOUND]);
    }
}
