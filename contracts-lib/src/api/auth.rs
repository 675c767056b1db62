//! Account endpoints: login, signup, profile

use reqwest::Method;

use crate::ContractsClient;
use crate::auth::AuthResponse;
use crate::auth::Credentials;
use crate::auth::SignupRequest;
use crate::auth::User;
use crate::client::Auth;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;

impl ContractsClient {
    /// Exchanges a username and password for a token.
    ///
    /// Store the result with [`SessionStore::login`](crate::auth::SessionStore::login).
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AuthResponse, Error> {
        let credentials = Credentials {
            username: username.into(),
            password: password.into(),
        };
        let url = self.endpoint(&["auth", "login"])?;
        let request = self.request(Method::POST, url, Auth::Public).await?;
        self.send(request.json(&credentials), Auth::Public)
            .await
            .map_err(|err| rejected(err, "Login failed"))
    }

    /// Creates an account and signs it in.
    pub async fn signup(&self, signup: &SignupRequest) -> Result<AuthResponse, Error> {
        let url = self.endpoint(&["auth", "signup"])?;
        let request = self.request(Method::POST, url, Auth::Public).await?;
        self.send(request.json(signup), Auth::Public)
            .await
            .map_err(|err| rejected(err, "Signup failed"))
    }

    /// The user the current token belongs to.
    pub async fn profile(&self) -> Result<User, Error> {
        let url = self.endpoint(&["auth", "me"])?;
        let request = self.request(Method::GET, url, Auth::Bearer).await?;
        self.send(request, Auth::Bearer).await
    }
}

/// Turns a 4xx from a credentials endpoint into [`AuthError::Rejected`],
/// preferring the server's `detail`.
fn rejected(err: Error, fallback: &str) -> Error {
    match err {
        Error::Api(api) if api.status_code().is_some_and(|s| (400..500).contains(&s)) => {
            let message = match &api {
                ApiError::Validation { details } => details
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
                other => other.detail().unwrap_or(fallback).to_string(),
            };
            AuthError::Rejected(message).into()
        }
        other => other,
    }
}
