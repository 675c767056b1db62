//! Main ContractsClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::TokenProvider;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;

/// Client for the contract management REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks.
///
/// # Example
///
/// ```ignore
/// use contracts_lib::{ContractsClient, auth::SessionStore};
///
/// let session = Arc::new(SessionStore::new());
/// let client = ContractsClient::builder()
///     .url("http://localhost:8000")
///     .token_provider(session.clone())
///     .build()?;
///
/// let listing = client.list_contracts(1, 100).await?;
/// ```
#[derive(Clone)]
pub struct ContractsClient {
    inner: Arc<ContractsClientInner>,
}

struct ContractsClientInner {
    base_url: Url,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Duration,
}

/// Whether a request carries the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Public,
    Bearer,
}

impl ContractsClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ContractsClientBuilder<Missing, Missing> {
        ContractsClientBuilder::new()
    }

    /// Builds a client from a [`ClientConfig`].
    pub fn from_config<T: TokenProvider + 'static>(
        config: &ClientConfig,
        token_provider: T,
    ) -> Result<Self, Error> {
        let mut builder = Self::builder()
            .url(config.base_url.clone())
            .token_provider(token_provider)
            .timeout(config.timeout);
        if let Some(connect) = config.connect_timeout {
            builder = builder.connect_timeout(connect);
        }
        builder.build()
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Resolves path segments against the base URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Starts a request, attaching the bearer token when `auth` asks for it
    /// and the provider has one.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: Url,
        auth: Auth,
    ) -> Result<RequestBuilder, Error> {
        log::debug!("{method} {url}");
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .timeout(self.inner.timeout);

        if auth == Auth::Bearer {
            let resource = self.inner.base_url.as_str();
            match self.inner.token_provider.get_token(resource).await {
                Ok(Some(token)) => request = request.bearer_auth(&token.access_token),
                Ok(None) => {}
                Err(AuthError::TokenExpired) => {
                    self.inner.token_provider.invalidate().await;
                    return Err(AuthError::TokenExpired.into());
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(request)
    }

    /// Sends the request and decodes a JSON body.
    ///
    /// Non-success statuses become [`ApiError`]s; a 401 on an authenticated
    /// request also invalidates the session.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: Auth,
    ) -> Result<T, Error> {
        let body = self.send_raw(request, auth).await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body).into())
    }

    /// Sends the request and returns the raw body of a success response.
    pub(crate) async fn send_raw(
        &self,
        request: RequestBuilder,
        auth: Auth,
    ) -> Result<String, Error> {
        let timeout = self.inner.timeout;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, timeout))?;

        let status = response.status();
        let url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e, timeout))?;

        if status.is_success() {
            return Ok(body);
        }

        let err = ApiError::from_response(status.as_u16(), &body);
        log::warn!("{url} answered {status}: {err}");
        if auth == Auth::Bearer && matches!(err, ApiError::Unauthorized { .. }) {
            self.inner.token_provider.invalidate().await;
        }
        Err(err.into())
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`ContractsClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The API base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct ContractsClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    timeout: Duration,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ContractsClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        let defaults = ClientConfig::default();
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: defaults.timeout,
            connect_timeout: defaults.connect_timeout,
            http_client: None,
        }
    }
}

impl Default for ContractsClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ContractsClientBuilder<Missing, P> {
    /// Sets the API base URL, e.g. `http://localhost:8000`.
    pub fn url(self, url: impl Into<String>) -> ContractsClientBuilder<Set<String>, P> {
        ContractsClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> ContractsClientBuilder<U, Missing> {
    /// Sets the token provider for authenticated endpoints.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> ContractsClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        ContractsClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> ContractsClientBuilder<U, P> {
    /// Sets the per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ContractsClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`ContractsClient`].
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be created.
    pub fn build(self) -> Result<ContractsClient, Error> {
        let raw = self.url.0;
        let base_url = Url::parse(raw.trim()).map_err(|_| ApiError::InvalidUrl(raw.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(raw).into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::Network)?
            }
        };

        Ok(ContractsClient {
            inner: Arc::new(ContractsClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
