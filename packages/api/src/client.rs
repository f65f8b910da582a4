//! [`store::RecordBackend`] and [`store::IdentityClient`] over the server
//! functions of this crate.
//!
//! Authentication rides on the session cookie, so the bound actor is only kept
//! for logging: an unbound [`ApiBackend`] still forwards calls and the server
//! answers "Not authenticated".

use std::sync::{Arc, Mutex};

use dioxus::prelude::ServerFnError;
use store::{
    BackendError, ChildFields, ChildId, ChildRecord, IdentityClient, IdentityError, LoginConfig,
    LoginOutcome, Principal, RecordBackend,
};

fn remote(e: ServerFnError) -> BackendError {
    BackendError::Remote(e.to_string())
}

/// Record backend backed by `get_children` / `add_child` / `update_child` / `delete_child`.
#[derive(Clone, Debug, Default)]
pub struct ApiBackend {
    actor: Arc<Mutex<Option<Principal>>>,
}

impl ApiBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn actor(&self) -> Option<Principal> {
        self.actor.lock().map(|a| a.clone()).unwrap_or(None)
    }
}

impl RecordBackend for ApiBackend {
    async fn get_children(&self) -> Result<Vec<ChildRecord>, BackendError> {
        crate::get_children().await.map_err(remote)
    }

    async fn add_child(&self, fields: ChildFields) -> Result<ChildRecord, BackendError> {
        let record = crate::add_child(fields).await.map_err(remote)?;
        tracing::debug!("Added child {} as {:?}", record.id, self.actor());
        Ok(record)
    }

    async fn update_child(
        &self,
        id: ChildId,
        fields: ChildFields,
    ) -> Result<ChildRecord, BackendError> {
        crate::update_child(id, fields).await.map_err(remote)
    }

    async fn delete_child(&self, id: ChildId) -> Result<(), BackendError> {
        crate::delete_child(id).await.map_err(remote)
    }

    fn set_actor(&self, principal: Option<Principal>) {
        if let Ok(mut actor) = self.actor.lock() {
            *actor = principal;
        }
    }
}

/// Identity client backed by the session endpoints and the OAuth redirect.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiIdentity;

impl IdentityClient for ApiIdentity {
    async fn login(&self, config: &LoginConfig) -> Result<LoginOutcome, IdentityError> {
        let url = crate::get_login_url(config.identity_provider.clone())
            .await
            .map_err(|e| IdentityError::LoginFailed(e.to_string()))?;

        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window()
                .ok_or_else(|| IdentityError::LoginFailed("no browser window".to_string()))?;
            window
                .location()
                .set_href(&url)
                .map_err(|_| IdentityError::LoginFailed("redirect refused".to_string()))?;
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::info!("Continue sign in at {}", url);
        }

        Ok(LoginOutcome::Redirecting)
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        crate::logout()
            .await
            .map_err(|e| IdentityError::Remote(e.to_string()))
    }

    async fn is_authenticated(&self) -> bool {
        matches!(crate::get_current_user().await, Ok(Some(_)))
    }

    async fn get_identity(&self) -> Option<Principal> {
        match crate::get_current_user().await {
            Ok(user) => user.map(|u| u.principal()),
            Err(e) => {
                tracing::error!("Failed to fetch identity: {}", e);
                None
            }
        }
    }

    /// Reads the `error` query parameter the `/auth/callback` route appends
    /// when a login fails, and strips it from the address bar.
    fn take_login_error(&self) -> Option<IdentityError> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window()?;
            let search = window.location().search().ok()?;
            let reason = login_error_from_query(&search)?;
            if let Ok(history) = window.history() {
                let path = window.location().pathname().unwrap_or_else(|_| "/".to_string());
                let _ = history.replace_state_with_url(
                    &web_sys::wasm_bindgen::JsValue::NULL,
                    "",
                    Some(&path),
                );
            }
            Some(IdentityError::LoginFailed(reason))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }
}

/// The `error` parameter of a `?a=b&error=c` query string, if present.
pub fn login_error_from_query(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "error")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_from_query() {
        assert_eq!(
            login_error_from_query("?error=login_failed"),
            Some("login_failed".to_string())
        );
        assert_eq!(
            login_error_from_query("?lang=rw&error=access_denied"),
            Some("access_denied".to_string())
        );
        assert_eq!(login_error_from_query(""), None);
        assert_eq!(login_error_from_query("?error="), None);
        assert_eq!(login_error_from_query("?errors=1"), None);
    }

    #[test]
    fn test_identity_reports_no_error_outside_browser() {
        assert!(ApiIdentity.take_login_error().is_none());
    }
}
