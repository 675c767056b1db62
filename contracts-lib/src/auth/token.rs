//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use crate::error::AuthError;

/// A bearer token with an optional expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The bearer token sent in the `Authorization` header.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    exp: Option<i64>,
}

impl AccessToken {
    /// Creates a token with no known expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
        }
    }

    /// Reads the expiry from the `exp` claim of a JWT.
    ///
    /// The signature is not checked. A token without an `exp` claim never
    /// expires; a token whose payload cannot be decoded is an error.
    pub fn from_jwt(token: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into();
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| AuthError::MalformedToken("missing payload segment".to_string()))?;

        // Some issuers keep the padding.
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::MalformedToken(e.to_string()))?;
        let claims: Claims = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::MalformedToken(e.to_string()))?;

        let expires_at = match claims.exp {
            Some(exp) => Some(
                DateTime::from_timestamp(exp, 0)
                    .ok_or_else(|| AuthError::MalformedToken(format!("exp out of range: {exp}")))?,
            ),
            None => None,
        };

        Ok(Self {
            access_token: token,
            expires_at,
        })
    }

    /// Like [`from_jwt`](Self::from_jwt), but an undecodable token comes back
    /// already expired instead of failing.
    pub fn from_jwt_lenient(token: impl Into<String>) -> Self {
        let token = token.into();
        match Self::from_jwt(token.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::debug!("treating token as expired: {err}");
                Self::with_expiry(token, DateTime::UNIX_EPOCH)
            }
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the token will expire within the given duration.
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() + duration >= exp)
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Supplies the bearer token for API requests.
///
/// The client calls `get_token` before every authenticated request and
/// `invalidate` when the API answers 401.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets the token for `resource` (the API base URL).
    ///
    /// `Ok(None)` sends the request without an `Authorization` header.
    async fn get_token(&self, resource: &str) -> Result<Option<AccessToken>, AuthError>;

    /// Drops any stored credentials.
    async fn invalidate(&self) {}
}

#[async_trait]
impl<T: TokenProvider + ?Sized> TokenProvider for std::sync::Arc<T> {
    async fn get_token(&self, resource: &str) -> Result<Option<AccessToken>, AuthError> {
        (**self).get_token(resource).await
    }

    async fn invalidate(&self) {
        (**self).invalidate().await;
    }
}

/// A provider that always returns the same token.
///
/// # Example
///
/// ```
/// use contracts_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _resource: &str) -> Result<Option<AccessToken>, AuthError> {
        Ok(Some(self.token.clone()))
    }
}

/// A provider for public endpoints only: never sends a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl TokenProvider for Anonymous {
    async fn get_token(&self, _resource: &str) -> Result<Option<AccessToken>, AuthError> {
        Ok(None)
    }
}

#[cfg(test)]
pub(crate) fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"alice","exp":{exp}}}"#));
    format!("{header}.{payload}.signature")
}
