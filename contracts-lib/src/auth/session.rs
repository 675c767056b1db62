//! In-memory session: the signed-in user and their token

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::RwLock;

use super::AccessToken;
use super::AuthResponse;
use super::TokenProvider;
use super::User;
use crate::error::AuthError;

/// What a host persists between runs to restore a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Holds the current session and hands its token to the client.
///
/// Cheap to share behind an `Arc`; the client clears it when the API answers
/// 401.
///
/// # Example
///
/// ```ignore
/// let session = Arc::new(SessionStore::new());
/// let client = ContractsClient::builder()
///     .url("http://localhost:8000")
///     .token_provider(session.clone())
///     .build()?;
///
/// let response = client.login("alice", "secret").await?;
/// session.login(response).await;
/// ```
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<Option<State>>,
}

#[derive(Debug, Clone)]
struct State {
    token: AccessToken,
    user: Option<User>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a session from a stored token and user.
    pub async fn init(&self, access_token: impl Into<String>, user: Option<User>) {
        let token = AccessToken::from_jwt_lenient(access_token);
        *self.state.write().await = Some(State { token, user });
    }

    /// Restores a previously persisted [`Session`].
    pub async fn restore(&self, session: Session) {
        self.init(session.access_token, session.user).await;
    }

    /// Stores the token and user from a login or signup response.
    pub async fn login(&self, response: AuthResponse) {
        log::info!("signed in as {}", response.user.display_name());
        self.init(response.access_token, Some(response.user)).await;
    }

    /// Replaces the stored user, keeping the token. Ignored without a session.
    pub async fn update_user(&self, user: User) {
        if let Some(state) = self.state.write().await.as_mut() {
            state.user = Some(user);
        }
    }

    /// Clears the session.
    pub async fn logout(&self) {
        if self.state.write().await.take().is_some() {
            log::info!("session cleared");
        }
    }

    /// `true` while a session is held, whether or not its token has expired.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.as_ref().and_then(|s| s.user.clone())
    }

    pub async fn token(&self) -> Option<AccessToken> {
        self.state.read().await.as_ref().map(|s| s.token.clone())
    }

    /// `true` when there is no token or the token is past its expiry.
    pub async fn is_token_expired(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .is_none_or(|s| s.token.is_expired())
    }

    /// The session in its persistable form, if one is held.
    pub async fn snapshot(&self) -> Option<Session> {
        self.state.read().await.as_ref().map(|s| Session {
            access_token: s.token.access_token.clone(),
            user: s.user.clone(),
        })
    }
}

#[async_trait]
impl TokenProvider for SessionStore {
    async fn get_token(&self, _resource: &str) -> Result<Option<AccessToken>, AuthError> {
        match self.state.read().await.as_ref() {
            None => Ok(None),
            Some(state) if state.token.is_expired() => Err(AuthError::TokenExpired),
            Some(state) => Ok(Some(state.token.clone())),
        }
    }

    async fn invalidate(&self) {
        self.logout().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::jwt_with_exp;

    fn response(token: String) -> AuthResponse {
        AuthResponse {
            access_token: token,
            token_type: Some("bearer".into()),
            user: User {
                username: Some("alice".into()),
                ..User::default()
            },
        }
    }

    #[tokio::test]
    async fn login_then_logout() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated().await);
        assert_eq!(store.get_token("").await.unwrap(), None);

        let jwt = jwt_with_exp(chrono::Utc::now().timestamp() + 600);
        store.login(response(jwt.clone())).await;
        assert!(store.is_authenticated().await);
        assert!(!store.is_token_expired().await);
        assert_eq!(
            store.get_token("").await.unwrap().map(|t| t.access_token),
            Some(jwt)
        );

        store.invalidate().await;
        assert!(!store.is_authenticated().await);
        assert!(store.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn expired_token_is_refused() {
        let store = SessionStore::new();
        store.init(jwt_with_exp(1_000), None).await;
        assert!(store.is_token_expired().await);
        assert!(matches!(
            store.get_token("").await,
            Err(AuthError::TokenExpired)
        ));
    }

    #[tokio::test]
    async fn undecodable_token_counts_as_expired() {
        let store = SessionStore::new();
        store.init("opaque", None).await;
        assert!(store.is_authenticated().await);
        assert!(store.is_token_expired().await);
    }

    #[tokio::test]
    async fn update_user_and_snapshot() {
        let store = SessionStore::new();
        store.update_user(User::default()).await;
        assert!(store.user().await.is_none());

        store.login(response(jwt_with_exp(i64::from(i32::MAX)))).await;
        let renamed = User {
            username: Some("alice2".into()),
            ..User::default()
        };
        store.update_user(renamed.clone()).await;

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.user, Some(renamed));

        let restored = SessionStore::new();
        restored.restore(snapshot).await;
        assert_eq!(restored.user().await.unwrap().display_name(), "alice2");
    }
}
