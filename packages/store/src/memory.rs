use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::{IdentityClient, LoginConfig, LoginOutcome, RecordBackend};
use crate::error::{BackendError, IdentityError};
use crate::models::{ChildFields, ChildId, ChildRecord, Principal};

#[derive(Debug, Default)]
struct BackendInner {
    children: BTreeMap<ChildId, ChildRecord>,
    next_id: u64,
    actor: Option<Principal>,
    failing: bool,
}

/// In-memory RecordBackend for testing and offline use.
///
/// Clones share the same records. Every call fails with
/// [`BackendError::Unauthenticated`] until an actor is bound via `set_actor`.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<BackendInner>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a remote error until reset.
    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    pub fn actor(&self) -> Option<Principal> {
        self.lock().actor.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, BackendInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn checked(&self) -> Result<MutexGuard<'_, BackendInner>, BackendError> {
        let inner = self.lock();
        if inner.failing {
            return Err(BackendError::Remote("connection refused".to_string()));
        }
        if inner.actor.is_none() {
            return Err(BackendError::Unauthenticated);
        }
        Ok(inner)
    }
}

impl RecordBackend for MemoryBackend {
    async fn get_children(&self) -> Result<Vec<ChildRecord>, BackendError> {
        Ok(self.checked()?.children.values().cloned().collect())
    }

    async fn add_child(&self, fields: ChildFields) -> Result<ChildRecord, BackendError> {
        let mut inner = self.checked()?;
        inner.next_id += 1;
        let record = ChildRecord::new(ChildId(inner.next_id), fields);
        inner.children.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_child(
        &self,
        id: ChildId,
        fields: ChildFields,
    ) -> Result<ChildRecord, BackendError> {
        let mut inner = self.checked()?;
        let record = inner
            .children
            .get_mut(&id)
            .ok_or(BackendError::NotFound(id))?;
        record.fields = fields;
        Ok(record.clone())
    }

    async fn delete_child(&self, id: ChildId) -> Result<(), BackendError> {
        self.checked()?
            .children
            .remove(&id)
            .map(|_| ())
            .ok_or(BackendError::NotFound(id))
    }

    fn set_actor(&self, principal: Option<Principal>) {
        self.lock().actor = principal;
    }
}

#[derive(Debug, Default)]
struct IdentityInner {
    /// Principal handed out by the next successful login.
    account: Option<Principal>,
    signed_in: Option<Principal>,
    reject_login: bool,
    last_login: Option<LoginConfig>,
    failed_return: Option<String>,
}

/// In-memory IdentityClient for testing.
///
/// Logins succeed immediately as the configured account, or fail when no
/// account is configured or [`MemoryIdentity::reject_logins`] is set.
#[derive(Clone, Debug, Default)]
pub struct MemoryIdentity {
    inner: Arc<Mutex<IdentityInner>>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// An identity provider that will log users in as `principal`.
    pub fn with_account(principal: Principal) -> Self {
        let identity = Self::default();
        identity.lock().account = Some(principal);
        identity
    }

    /// An identity provider with `principal` already signed in.
    pub fn signed_in(principal: Principal) -> Self {
        let identity = Self::with_account(principal.clone());
        identity.lock().signed_in = Some(principal);
        identity
    }

    pub fn reject_logins(&self, reject: bool) {
        self.lock().reject_login = reject;
    }

    /// Simulate the provider sending the user back with a failed login.
    pub fn fail_return(&self, reason: impl Into<String>) {
        self.lock().failed_return = Some(reason.into());
    }

    /// The config passed to the most recent login attempt.
    pub fn last_login(&self) -> Option<LoginConfig> {
        self.lock().last_login.clone()
    }

    fn lock(&self) -> MutexGuard<'_, IdentityInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl IdentityClient for MemoryIdentity {
    async fn login(&self, config: &LoginConfig) -> Result<LoginOutcome, IdentityError> {
        let mut inner = self.lock();
        inner.last_login = Some(config.clone());
        if inner.reject_login {
            return Err(IdentityError::LoginFailed("user cancelled".to_string()));
        }
        let principal = inner
            .account
            .clone()
            .ok_or_else(|| IdentityError::LoginFailed("no account".to_string()))?;
        inner.signed_in = Some(principal.clone());
        Ok(LoginOutcome::Authenticated(principal))
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        self.lock().signed_in = None;
        Ok(())
    }

    async fn is_authenticated(&self) -> bool {
        self.lock().signed_in.is_some()
    }

    async fn get_identity(&self) -> Option<Principal> {
        self.lock().signed_in.clone()
    }

    fn take_login_error(&self) -> Option<IdentityError> {
        self.lock().failed_return.take().map(IdentityError::LoginFailed)
    }
}
