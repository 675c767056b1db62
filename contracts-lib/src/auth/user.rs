//! Account data returned by the auth endpoints

use serde::Deserialize;
use serde::Serialize;

/// The signed-in user, as returned by `/auth/me`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Anything else the server includes (roles, timestamps).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Username, else email, else `"User"`.
    pub fn display_name(&self) -> &str {
        non_empty(&self.username)
            .or_else(|| non_empty(&self.email))
            .unwrap_or("User")
    }

    /// First two characters of the username or email, upper-cased. `"U"` when
    /// neither is set.
    pub fn initials(&self) -> String {
        match non_empty(&self.username).or_else(|| non_empty(&self.email)) {
            Some(name) => name.chars().take(2).collect::<String>().to_uppercase(),
            None => "U".to_string(),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Body of a successful `/auth/login` or `/auth/signup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}
