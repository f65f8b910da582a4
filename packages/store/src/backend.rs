//! # Collaborator traits
//!
//! The registry UI never talks to the network directly. It drives two
//! collaborators through the async traits defined here:
//!
//! - [`RecordBackend`]: CRUD over birth records plus `set_actor`, which binds
//!   (or unbinds) the authenticated principal the backend should act for.
//! - [`IdentityClient`]: the external identity provider, covering login,
//!   logout and the startup "who am I" check.
//!
//! Implementations: [`crate::MemoryBackend`] / [`crate::MemoryIdentity`] in this
//! crate, and the server-function backed ones in the `api` crate.

use crate::error::{BackendError, IdentityError};
use crate::models::{ChildFields, ChildId, ChildRecord, Principal};

/// Async interface to the remote record store.
pub trait RecordBackend {
    fn get_children(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChildRecord>, BackendError>>;
    fn add_child(
        &self,
        fields: ChildFields,
    ) -> impl std::future::Future<Output = Result<ChildRecord, BackendError>>;
    fn update_child(
        &self,
        id: ChildId,
        fields: ChildFields,
    ) -> impl std::future::Future<Output = Result<ChildRecord, BackendError>>;
    fn delete_child(
        &self,
        id: ChildId,
    ) -> impl std::future::Future<Output = Result<(), BackendError>>;
    /// Bind the principal subsequent calls are made for; `None` after sign-out.
    fn set_actor(&self, principal: Option<Principal>);
}

/// Options passed to [`IdentityClient::login`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginConfig {
    /// Identity provider to authenticate against. `None` uses the provider's
    /// default endpoint.
    pub identity_provider: Option<String>,
}

/// Result of a successful [`IdentityClient::login`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
    /// The user is signed in as this principal.
    Authenticated(Principal),
    /// The browser is being sent to the identity provider; the session is
    /// picked up by the startup check when it comes back.
    Redirecting,
}

/// Async interface to the external identity provider.
pub trait IdentityClient {
    fn login(
        &self,
        config: &LoginConfig,
    ) -> impl std::future::Future<Output = Result<LoginOutcome, IdentityError>>;
    fn logout(&self) -> impl std::future::Future<Output = Result<(), IdentityError>>;
    fn is_authenticated(&self) -> impl std::future::Future<Output = bool>;
    fn get_identity(&self) -> impl std::future::Future<Output = Option<Principal>>;

    /// Error reported by the provider for a login that completed away from
    /// this page (a redirect flow). Returned once, then cleared.
    fn take_login_error(&self) -> Option<IdentityError>;
}
