//! # API crate: fullstack server functions for the birth registry
//!
//! Defines every Dioxus server function the registry UI calls, compiled twice:
//! once with full server logic (behind `#[cfg(feature = "server")]`) and once
//! as a thin client stub that forwards the call over HTTP.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | `server` | OAuth login through the identity provider, session helpers |
//! | [`db`] | `server` | PostgreSQL connection pool and migrations |
//! | [`models`] | rows only | Database rows (`User`, `ChildRow`) and client-safe projections (`UserInfo`) |
//! | [`client`] | none | [`ApiBackend`] / [`ApiIdentity`]: the `store` collaborator traits over these functions |
//!
//! ## Server functions exposed here
//!
//! - **Identity**: `get_current_user`, `get_login_url`, `logout`
//! - **Records**: `get_children`, `add_child`, `update_child`, `delete_child`
//!
//! Record functions require a signed-in session and answer "Not authenticated"
//! otherwise.

use dioxus::prelude::*;

pub mod auth;
pub mod client;
pub mod db;
pub mod models;

pub use client::{ApiBackend, ApiIdentity};
pub use models::UserInfo;
pub use store::{ChildFields, ChildId, ChildRecord};

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::User;

    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user_uuid = uuid::Uuid::parse_str(&user_id)
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_uuid)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Get the identity provider login URL.
///
/// `identity_provider` overrides the provider's authorization endpoint
/// (development builds only, see [`auth::OAuthConfig::identity`]).
#[cfg(feature = "server")]
#[post("/api/auth/login")]
pub async fn get_login_url(identity_provider: Option<String>) -> Result<String, ServerFnError> {
    let oauth = auth::IdentityOAuth::new(identity_provider).map_err(ServerFnError::new)?;
    oauth.generate_auth_url().await.map_err(ServerFnError::new)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login")]
pub async fn get_login_url(identity_provider: Option<String>) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// List every birth record, oldest first.
#[cfg(feature = "server")]
#[get("/api/children", session: tower_sessions::Session)]
pub async fn get_children() -> Result<Vec<ChildRecord>, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ChildRow;

    auth::require_user(&session).await?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let rows: Vec<ChildRow> = sqlx::query_as("SELECT * FROM children ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    rows.iter()
        .map(|row| row.to_record().map_err(ServerFnError::new))
        .collect()
}

#[cfg(not(feature = "server"))]
#[get("/api/children")]
pub async fn get_children() -> Result<Vec<ChildRecord>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Register a new birth record.
#[cfg(feature = "server")]
#[post("/api/children", session: tower_sessions::Session)]
pub async fn add_child(fields: ChildFields) -> Result<ChildRecord, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ChildRow;

    let user_id = auth::require_user(&session).await?;
    check_fields(&fields)?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let row: ChildRow = sqlx::query_as(
        r#"
        INSERT INTO children (
            first_name, last_name, gender, mother_name, father_name, weight,
            province, district, sector, cell, birth_date, registered_by
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(fields.gender.as_str())
    .bind(&fields.mother_name)
    .bind(&fields.father_name)
    .bind(fields.weight)
    .bind(&fields.birth_place.province)
    .bind(&fields.birth_place.district)
    .bind(&fields.birth_place.sector)
    .bind(&fields.birth_place.cell)
    .bind(fields.birth_date)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!("Child {} registered by {}", row.id, user_id);
    row.to_record().map_err(ServerFnError::new)
}

#[cfg(not(feature = "server"))]
#[post("/api/children")]
pub async fn add_child(fields: ChildFields) -> Result<ChildRecord, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Replace every field of an existing birth record.
#[cfg(feature = "server")]
#[post("/api/children/update", session: tower_sessions::Session)]
pub async fn update_child(id: ChildId, fields: ChildFields) -> Result<ChildRecord, ServerFnError> {
    use crate::db::get_pool;
    use crate::models::ChildRow;

    auth::require_user(&session).await?;
    check_fields(&fields)?;
    let row_id = i64::try_from(id.0).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let row: Option<ChildRow> = sqlx::query_as(
        r#"
        UPDATE children SET
            first_name = $2, last_name = $3, gender = $4, mother_name = $5,
            father_name = $6, weight = $7, province = $8, district = $9,
            sector = $10, cell = $11, birth_date = $12, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(row_id)
    .bind(&fields.first_name)
    .bind(&fields.last_name)
    .bind(fields.gender.as_str())
    .bind(&fields.mother_name)
    .bind(&fields.father_name)
    .bind(fields.weight)
    .bind(&fields.birth_place.province)
    .bind(&fields.birth_place.district)
    .bind(&fields.birth_place.sector)
    .bind(&fields.birth_place.cell)
    .bind(fields.birth_date)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServerFnError::new(e.to_string()))?;

    let Some(row) = row else {
        return Err(ServerFnError::new("Child not found"));
    };
    row.to_record().map_err(ServerFnError::new)
}

#[cfg(not(feature = "server"))]
#[post("/api/children/update")]
pub async fn update_child(id: ChildId, fields: ChildFields) -> Result<ChildRecord, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete a birth record.
#[cfg(feature = "server")]
#[post("/api/children/delete", session: tower_sessions::Session)]
pub async fn delete_child(id: ChildId) -> Result<(), ServerFnError> {
    use crate::db::get_pool;

    let user_id = auth::require_user(&session).await?;
    let row_id = i64::try_from(id.0).map_err(|e| ServerFnError::new(e.to_string()))?;

    let pool = get_pool()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let result = sqlx::query("DELETE FROM children WHERE id = $1")
        .bind(row_id)
        .execute(pool)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if result.rows_affected() == 0 {
        return Err(ServerFnError::new("Child not found"));
    }
    tracing::info!("Child {} deleted by {}", id, user_id);
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/children/delete")]
pub async fn delete_child(id: ChildId) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Server-side re-check of what the client form already validated.
#[cfg(feature = "server")]
fn check_fields(fields: &ChildFields) -> Result<(), ServerFnError> {
    let text = [
        &fields.first_name,
        &fields.last_name,
        &fields.mother_name,
        &fields.father_name,
        &fields.birth_place.province,
        &fields.birth_place.district,
        &fields.birth_place.sector,
        &fields.birth_place.cell,
    ];
    if text.iter().any(|s| s.trim().is_empty()) {
        return Err(ServerFnError::new("All fields are required"));
    }
    if !fields.weight.is_finite() || fields.weight <= 0.0 {
        return Err(ServerFnError::new("Weight must be positive"));
    }
    Ok(())
}
