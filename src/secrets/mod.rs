//! Secret backends for the Trello credentials.
//!
//! Three credentials are needed per invocation: the API key, the API token,
//! and the member name. They are read fresh on every request and never
//! cached. Two backends exist for the same responsibility; exactly one is
//! selected at startup via [`SecretBackend`](crate::config::SecretBackend).

pub mod file;
pub mod vault;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{Config, SecretBackend};

pub use file::FileStore;
pub use vault::VaultStore;

/// Sub-field (or file) name for the API key.
pub const SECRET_KEY_NAME: &str = "appkey";
/// Sub-field (or file) name for the API token.
pub const SECRET_TOKEN_NAME: &str = "apptoken";
/// Sub-field (or file) name for the member name.
pub const SECRET_MEMBER_NAME: &str = "membername";

/// The credential triple required for Trello API access.
#[derive(Debug, Clone)]
pub struct TrelloSecrets {
    /// Trello API key
    pub api_key: String,
    /// Trello API token
    pub api_token: String,
    /// Member name whose boards are queried
    pub member: String,
}

impl TrelloSecrets {
    /// Assemble the triple from optional raw values; any absent or empty
    /// value means the backend holds no usable credential data.
    pub(crate) fn from_fields(
        api_key: Option<String>,
        api_token: Option<String>,
        member: Option<String>,
    ) -> Result<Self, SecretError> {
        match (api_key, api_token, member) {
            (Some(api_key), Some(api_token), Some(member))
                if !api_key.is_empty() && !api_token.is_empty() && !member.is_empty() =>
            {
                Ok(Self {
                    api_key,
                    api_token,
                    member,
                })
            }
            _ => Err(SecretError::NotFound),
        }
    }
}

/// Errors from credential retrieval.
#[derive(Debug, Error)]
pub enum SecretError {
    /// The backend lacks the configuration needed to attempt a fetch.
    #[error("vault address or token or trello member name not set")]
    NotConfigured,

    /// The backend answered but returned no usable credential data.
    #[error("could not locate trello secrets")]
    NotFound,

    /// A mounted credential file could not be read at either path.
    #[error("could not read {name} secret: {source}")]
    Unreadable {
        /// Which credential failed
        name: &'static str,
        /// The read failure
        #[source]
        source: std::io::Error,
    },
}

/// Trait for secret backends (Vault-style KV service, mounted files).
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &'static str;

    /// Check if this backend has the configuration it needs.
    fn configured(&self) -> bool;

    /// Fetch the credential triple.
    async fn fetch(&self) -> Result<TrelloSecrets, SecretError>;
}

/// Build the secret store selected by the configuration.
#[must_use]
pub fn build_store(config: &Config) -> Arc<dyn SecretStore> {
    match config.secret_backend {
        SecretBackend::Vault => Arc::new(VaultStore::from_config(config)),
        SecretBackend::File => Arc::new(FileStore::from_config(config)),
    }
}
