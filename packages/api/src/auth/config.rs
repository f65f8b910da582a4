//! OAuth configuration from environment variables.

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

/// Identity provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub userinfo_url: String,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// Create the identity provider config from environment variables.
    ///
    /// `provider_override` replaces the authorization endpoint, which is how a
    /// development build points at a locally running provider. It is refused
    /// unless `IDENTITY_ALLOW_LOCAL_PROVIDER=true`.
    pub fn identity(provider_override: Option<String>) -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let client_id = std::env::var("IDENTITY_CLIENT_ID")
            .map_err(|_| "IDENTITY_CLIENT_ID not set")?;
        let client_secret = std::env::var("IDENTITY_CLIENT_SECRET")
            .map_err(|_| "IDENTITY_CLIENT_SECRET not set")?;
        let auth_url = std::env::var("IDENTITY_AUTH_URL")
            .map_err(|_| "IDENTITY_AUTH_URL not set")?;
        let token_url = std::env::var("IDENTITY_TOKEN_URL")
            .map_err(|_| "IDENTITY_TOKEN_URL not set")?;
        let userinfo_url = std::env::var("IDENTITY_USERINFO_URL")
            .map_err(|_| "IDENTITY_USERINFO_URL not set")?;
        let redirect_uri = std::env::var("AUTH_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:8080/auth/callback".to_string());

        let auth_url = match provider_override {
            Some(url) if url != auth_url => {
                if !local_provider_allowed() {
                    return Err(format!("Identity provider {url} is not allowed"));
                }
                url
            }
            _ => auth_url,
        };

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            auth_url: AuthUrl::new(auth_url).map_err(|e| e.to_string())?,
            token_url: TokenUrl::new(token_url).map_err(|e| e.to_string())?,
            userinfo_url,
            redirect_url: RedirectUrl::new(redirect_uri).map_err(|e| e.to_string())?,
        })
    }
}

fn local_provider_allowed() -> bool {
    std::env::var("IDENTITY_ALLOW_LOCAL_PROVIDER")
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
