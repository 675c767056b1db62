//! Authentication: tokens, the session store and account types

mod session;
pub(crate) mod token;
mod user;

pub use session::Session;
pub use session::SessionStore;
pub use token::AccessToken;
pub use token::Anonymous;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
pub use user::AuthResponse;
pub use user::Credentials;
pub use user::SignupRequest;
pub use user::User;
