//! # Identity provider: OAuth 2.0 authorization code flow with PKCE
//!
//! Signs registrars in through a single, environment-configured identity
//! provider (see [`OAuthConfig::identity`]).
//!
//! ## Flow
//!
//! 1. **[`generate_auth_url`](IdentityOAuth::generate_auth_url)** builds an
//!    authorization URL requesting `openid`, `email` and `profile`, generates a
//!    random PKCE challenge, and persists the CSRF state + verifier in the
//!    `oauth_states` table with a 10-minute expiry.
//!
//! 2. **[`exchange_code`](IdentityOAuth::exchange_code)** is called by the
//!    `/auth/callback` route in the `web` crate. It consumes the matching
//!    `oauth_states` row (validating state and expiry in one query), exchanges
//!    the code + verifier for an access token, fetches the OpenID userinfo
//!    document and upserts the user keyed on `provider = 'identity'` + `sub`.

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use reqwest::Client;
use serde::Deserialize;

use super::config::OAuthConfig;
use crate::db::get_pool;
use crate::models::User;

const PROVIDER: &str = "identity";

/// OpenID Connect userinfo response.
#[derive(Debug, Deserialize)]
struct UserInfoClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Identity provider OAuth handler.
pub struct IdentityOAuth {
    config: OAuthConfig,
}

impl IdentityOAuth {
    /// Create a handler for the configured provider, optionally pointed at
    /// another authorization endpoint.
    pub fn new(provider_override: Option<String>) -> Result<Self, String> {
        let config = OAuthConfig::identity(provider_override)?;
        Ok(Self { config })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate authorization URL with PKCE.
    pub async fn generate_auth_url(&self) -> Result<String, String> {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        let pool = get_pool().await.map_err(|e| e.to_string())?;

        sqlx::query(
            r#"
            INSERT INTO oauth_states (state, provider, pkce_verifier, expires_at)
            VALUES ($1, $2, $3, NOW() + INTERVAL '10 minutes')
            "#,
        )
        .bind(csrf_state.secret())
        .bind(PROVIDER)
        .bind(pkce_verifier.secret())
        .execute(pool)
        .await
        .map_err(|e| e.to_string())?;

        Ok(auth_url.to_string())
    }

    /// Exchange authorization code for tokens and get user info.
    pub async fn exchange_code(&self, code: &str, state: &str) -> Result<User, String> {
        let pool = get_pool().await.map_err(|e| e.to_string())?;

        let row: Option<(String,)> = sqlx::query_as(
            r#"
            DELETE FROM oauth_states
            WHERE state = $1 AND provider = $2 AND expires_at > NOW()
            RETURNING pkce_verifier
            "#,
        )
        .bind(state)
        .bind(PROVIDER)
        .fetch_optional(pool)
        .await
        .map_err(|e| e.to_string())?;

        let pkce_verifier = row.ok_or("Invalid or expired OAuth state")?.0;

        // No redirects on the token endpoint (SSRF)
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| e.to_string())?;

        let token_result = self
            .create_client()
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| format!("Token exchange failed: {}", e))?;

        let claims: UserInfoClaims = Client::new()
            .get(&self.config.userinfo_url)
            .bearer_auth(token_result.access_token().secret())
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (email, name, provider, provider_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (provider, provider_id)
            DO UPDATE SET
                email = EXCLUDED.email,
                name = EXCLUDED.name,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(&claims.email)
        .bind(&claims.name)
        .bind(PROVIDER)
        .bind(&claims.sub)
        .fetch_one(pool)
        .await
        .map_err(|e| e.to_string())?;

        tracing::info!("Signed in {} via identity provider", user.id);
        Ok(user)
    }
}
