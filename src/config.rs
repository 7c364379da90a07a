//! Configuration for the Trello intake service.

use std::env;
use std::path::PathBuf;

/// Trello intake service configuration.
///
/// Populated once at process startup via [`Config::from_env`] and passed into
/// the handler state; nothing reads the environment at request time.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// Trello API base URL.
    pub api_url: String,
    /// Which secret backend serves the Trello credentials.
    pub secret_backend: SecretBackend,
    /// Vault server address (vault backend).
    pub vault_address: Option<String>,
    /// Vault access token (vault backend).
    pub vault_token: Option<String>,
    /// KV path holding the Trello credential entry (vault backend).
    pub vault_secret_path: String,
    /// Directory with one file per credential (file backend).
    pub secrets_dir: PathBuf,
    /// Fallback directory checked when a credential file is absent from
    /// `secrets_dir` (file backend).
    pub legacy_secrets_dir: PathBuf,
    /// Default board name used when the request supplies none.
    pub default_board: Option<String>,
    /// Default list name used when the request supplies none.
    pub default_list: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env::var("TRELLO_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8082),
            api_url: env::var("TRELLO_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| crate::client::TRELLO_API_URL.to_string()),
            secret_backend: env::var("SECRET_BACKEND")
                .ok()
                .map(|s| SecretBackend::from_name(&s))
                .unwrap_or_default(),
            vault_address: env::var("VAULT_ADDRESS").ok().filter(|s| !s.is_empty()),
            vault_token: env::var("VAULT_TOKEN").ok().filter(|s| !s.is_empty()),
            vault_secret_path: env::var("VAULT_SECRET_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "secret/trello".to_string()),
            secrets_dir: env::var("TRELLO_SECRETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/var/run/secrets/trello")),
            legacy_secrets_dir: env::var("TRELLO_LEGACY_SECRETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/run/secrets")),
            default_board: env::var("TRELLO_DEFAULT_BOARD").ok().filter(|s| !s.is_empty()),
            default_list: env::var("TRELLO_DEFAULT_LIST").ok().filter(|s| !s.is_empty()),
        }
    }
}

/// Secret backend selection.
///
/// The two backends are alternatives for the same responsibility; exactly one
/// is active per process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SecretBackend {
    /// Vault-style KV secret service reached over HTTP.
    #[default]
    Vault,
    /// Individually mounted credential files.
    File,
}

impl SecretBackend {
    /// Parse a backend name; anything that is not `file` selects vault.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "file" | "files" => Self::File,
            _ => Self::Vault,
        }
    }

    /// Backend name for logging.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vault => "vault",
            Self::File => "file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Use a mutex to serialize tests that modify environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let _lock = ENV_MUTEX.lock().unwrap();

        for var in [
            "TRELLO_PORT",
            "TRELLO_API_URL",
            "SECRET_BACKEND",
            "VAULT_ADDRESS",
            "VAULT_TOKEN",
            "VAULT_SECRET_PATH",
            "TRELLO_DEFAULT_BOARD",
            "TRELLO_DEFAULT_LIST",
        ] {
            env::remove_var(var);
        }

        let config = Config::from_env();
        assert_eq!(config.port, 8082);
        assert_eq!(config.api_url, "https://api.trello.com");
        assert_eq!(config.secret_backend, SecretBackend::Vault);
        assert!(config.vault_address.is_none());
        assert!(config.vault_token.is_none());
        assert_eq!(config.vault_secret_path, "secret/trello");
        assert!(config.default_board.is_none());
        assert!(config.default_list.is_none());
    }

    #[test]
    fn test_config_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        env::set_var("TRELLO_PORT", "9000");
        env::set_var("SECRET_BACKEND", "file");
        env::set_var("VAULT_ADDRESS", "http://vault:8200");
        env::set_var("VAULT_TOKEN", "test-token");
        env::set_var("TRELLO_DEFAULT_BOARD", "Main");

        let config = Config::from_env();
        assert_eq!(config.port, 9000);
        assert_eq!(config.secret_backend, SecretBackend::File);
        assert_eq!(config.vault_address, Some("http://vault:8200".to_string()));
        assert_eq!(config.vault_token, Some("test-token".to_string()));
        assert_eq!(config.default_board, Some("Main".to_string()));

        for var in [
            "TRELLO_PORT",
            "SECRET_BACKEND",
            "VAULT_ADDRESS",
            "VAULT_TOKEN",
            "TRELLO_DEFAULT_BOARD",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_vault_values_are_treated_as_unset() {
        let _lock = ENV_MUTEX.lock().unwrap();

        env::set_var("VAULT_ADDRESS", "");
        env::set_var("VAULT_TOKEN", "");

        let config = Config::from_env();
        assert!(config.vault_address.is_none());
        assert!(config.vault_token.is_none());

        env::remove_var("VAULT_ADDRESS");
        env::remove_var("VAULT_TOKEN");
    }

    #[test]
    fn test_backend_from_name() {
        assert_eq!(SecretBackend::from_name("file"), SecretBackend::File);
        assert_eq!(SecretBackend::from_name("FILE"), SecretBackend::File);
        assert_eq!(SecretBackend::from_name("vault"), SecretBackend::Vault);
        assert_eq!(SecretBackend::from_name("anything"), SecretBackend::Vault);
    }
}
