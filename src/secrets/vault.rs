//! Vault-style KV secret backend.
//!
//! Reads a single KV entry (default `secret/trello`) expected to carry the
//! `appkey`, `apptoken` and `membername` sub-fields. Address and token come
//! from configuration; if either is absent the fetch fails before any
//! network call is made.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::Config;

use super::{SecretError, SecretStore, TrelloSecrets};

/// Vault KV secret store.
pub struct VaultStore {
    address: Option<String>,
    token: Option<String>,
    secret_path: String,
    client: reqwest::Client,
}

impl VaultStore {
    /// Create a Vault store from the service configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            address: config.vault_address.clone(),
            token: config.vault_token.clone(),
            secret_path: config.vault_secret_path.clone(),
            client: reqwest::Client::new(),
        }
    }
}

/// KV read response wrapper.
#[derive(Debug, Deserialize)]
struct KvResponse {
    #[serde(default)]
    data: Option<KvData>,
}

/// Credential sub-fields of the Trello entry.
#[derive(Debug, Deserialize)]
struct KvData {
    #[serde(default)]
    appkey: Option<String>,
    #[serde(default)]
    apptoken: Option<String>,
    #[serde(default)]
    membername: Option<String>,
}

#[async_trait]
impl SecretStore for VaultStore {
    fn name(&self) -> &'static str {
        "vault"
    }

    fn configured(&self) -> bool {
        self.address.is_some() && self.token.is_some()
    }

    async fn fetch(&self) -> Result<TrelloSecrets, SecretError> {
        let (Some(address), Some(token)) = (&self.address, &self.token) else {
            return Err(SecretError::NotConfigured);
        };

        let url = format!("{}/v1/{}", address.trim_end_matches('/'), self.secret_path);

        let response = self
            .client
            .get(&url)
            .header("X-Vault-Token", token.as_str())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Vault request failed");
                SecretError::NotFound
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, path = %self.secret_path, "Vault returned error status");
            return Err(SecretError::NotFound);
        }

        let kv: KvResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse Vault response");
            SecretError::NotFound
        })?;

        let Some(data) = kv.data else {
            return Err(SecretError::NotFound);
        };

        TrelloSecrets::from_fields(data.appkey, data.apptoken, data.membername)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kv_response_parsing() {
        let json = r#"{
            "request_id": "a1b2",
            "lease_duration": 2764800,
            "data": {
                "appkey": "test-key",
                "apptoken": "test-token",
                "membername": "alice"
            }
        }"#;

        let kv: KvResponse = serde_json::from_str(json).unwrap();
        let data = kv.data.unwrap();
        assert_eq!(data.appkey.as_deref(), Some("test-key"));
        assert_eq!(data.membername.as_deref(), Some("alice"));
    }

    #[test]
    fn test_kv_response_without_data() {
        let kv: KvResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(kv.data.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_store_fails_before_any_request() {
        let store = VaultStore {
            address: None,
            token: Some("token".to_string()),
            secret_path: "secret/trello".to_string(),
            client: reqwest::Client::new(),
        };
        assert!(!store.configured());
        assert!(matches!(
            store.fetch().await,
            Err(SecretError::NotConfigured)
        ));
    }
}
