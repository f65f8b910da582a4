//! # Client configuration: `registry.toml`
//!
//! Defines the TOML configuration the registry UI is built with. It decides
//! which identity provider the sign-in button sends users to.
//!
//! ## Structure
//!
//! ```toml
//! [identity]
//! production = false                                     # true: provider default
//! local_provider_url = "http://localhost:8080/dev/identity"  # used when not in production
//! ```
//!
//! All structs derive or implement `Default` so that a missing or empty config
//! file is equivalent to the default (development) configuration.

use serde::{Deserialize, Serialize};

use crate::backend::LoginConfig;

/// Top-level configuration stored in `registry.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub identity: IdentityConfig,
}

/// Identity provider selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// In production the identity provider's own default endpoint is used.
    #[serde(default)]
    pub production: bool,
    /// Provider endpoint used outside production, typically a locally running one.
    #[serde(default = "default_local_provider_url")]
    pub local_provider_url: String,
}

fn default_local_provider_url() -> String {
    "http://localhost:8080/dev/identity".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            production: false,
            local_provider_url: default_local_provider_url(),
        }
    }
}

impl RegistryConfig {
    /// Builder method to switch to the production identity provider.
    pub fn production(mut self) -> Self {
        self.identity.production = true;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "registry.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Options for [`crate::IdentityClient::login`].
    pub fn login_config(&self) -> LoginConfig {
        LoginConfig {
            identity_provider: if self.identity.production {
                None
            } else {
                Some(self.identity.local_provider_url.clone())
            },
        }
    }
}
