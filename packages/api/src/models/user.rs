//! # User model for authenticated registrars
//!
//! [`User`] (server only) is the full `users` row, loaded with
//! [`sqlx::FromRow`]. Users are created or refreshed on every successful
//! identity provider login, keyed on `provider` + `provider_id` (the provider's
//! `sub` claim).
//!
//! [`UserInfo`] is the client-safe projection returned by
//! `get_current_user`. Its `id` is the principal the registry UI binds into the
//! record backend.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub provider: String,
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl UserInfo {
    /// Display name, falling back to email and then to the id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }

    /// The principal bound into the registry UI, labelled with [`Self::display_name`].
    pub fn principal(&self) -> store::Principal {
        store::Principal::new(self.id.clone()).with_display_name(self.display_name())
    }
}
