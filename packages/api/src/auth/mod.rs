//! Authentication against the external identity provider.

#[cfg(feature = "server")]
mod config;
#[cfg(feature = "server")]
mod provider;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use config::OAuthConfig;
#[cfg(feature = "server")]
pub use provider::IdentityOAuth;
#[cfg(feature = "server")]
pub use session::{require_user, SESSION_USER_ID_KEY};
