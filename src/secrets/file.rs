//! Mounted-file secret backend.
//!
//! Each credential is an individually named file under the secrets
//! directory. A primary directory is checked first, then a legacy one kept
//! for deployments that still mount secrets at the old path.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::Config;

use super::{
    SecretError, SecretStore, TrelloSecrets, SECRET_KEY_NAME, SECRET_MEMBER_NAME,
    SECRET_TOKEN_NAME,
};

/// Mounted-file secret store.
pub struct FileStore {
    dir: PathBuf,
    legacy_dir: PathBuf,
}

impl FileStore {
    /// Create a file store from the service configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.secrets_dir.clone(), config.legacy_secrets_dir.clone())
    }

    /// Create a file store over explicit directories.
    #[must_use]
    pub fn new(dir: PathBuf, legacy_dir: PathBuf) -> Self {
        Self { dir, legacy_dir }
    }

    /// Read one credential file, falling back to the legacy directory.
    ///
    /// The error carries the primary-path failure; the legacy path is a
    /// compatibility shim, not the canonical location.
    async fn read_credential(&self, name: &'static str) -> Result<String, SecretError> {
        match tokio::fs::read_to_string(self.dir.join(name)).await {
            Ok(value) => Ok(value),
            Err(primary_err) => {
                match tokio::fs::read_to_string(self.legacy_dir.join(name)).await {
                    Ok(value) => Ok(value),
                    Err(_) => Err(SecretError::Unreadable {
                        name,
                        source: primary_err,
                    }),
                }
            }
        }
    }
}

#[async_trait]
impl SecretStore for FileStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn configured(&self) -> bool {
        // Files are only checked at read time; a missing mount surfaces as
        // an Unreadable error on the first request.
        true
    }

    async fn fetch(&self) -> Result<TrelloSecrets, SecretError> {
        let api_key = self.read_credential(SECRET_KEY_NAME).await?;
        let api_token = self.read_credential(SECRET_TOKEN_NAME).await?;
        let member = self.read_credential(SECRET_MEMBER_NAME).await?;

        TrelloSecrets::from_fields(
            Some(api_key.trim().to_string()),
            Some(api_token.trim().to_string()),
            Some(member.trim().to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_secret(dir: &std::path::Path, name: &str, value: &str) {
        fs::write(dir.join(name), value).unwrap();
    }

    #[tokio::test]
    async fn test_reads_all_credentials_from_primary_dir() {
        let primary = tempfile::tempdir().unwrap();
        let legacy = tempfile::tempdir().unwrap();
        write_secret(primary.path(), SECRET_KEY_NAME, "test-key\n");
        write_secret(primary.path(), SECRET_TOKEN_NAME, "test-token");
        write_secret(primary.path(), SECRET_MEMBER_NAME, "alice");

        let store = FileStore::new(primary.path().into(), legacy.path().into());
        let secrets = store.fetch().await.unwrap();
        assert_eq!(secrets.api_key, "test-key");
        assert_eq!(secrets.api_token, "test-token");
        assert_eq!(secrets.member, "alice");
    }

    #[tokio::test]
    async fn test_falls_back_to_legacy_dir_per_credential() {
        let primary = tempfile::tempdir().unwrap();
        let legacy = tempfile::tempdir().unwrap();
        write_secret(primary.path(), SECRET_KEY_NAME, "test-key");
        write_secret(legacy.path(), SECRET_TOKEN_NAME, "legacy-token");
        write_secret(primary.path(), SECRET_MEMBER_NAME, "alice");

        let store = FileStore::new(primary.path().into(), legacy.path().into());
        let secrets = store.fetch().await.unwrap();
        assert_eq!(secrets.api_token, "legacy-token");
    }

    #[tokio::test]
    async fn test_missing_credential_at_both_paths_names_the_credential() {
        let primary = tempfile::tempdir().unwrap();
        let legacy = tempfile::tempdir().unwrap();
        write_secret(primary.path(), SECRET_KEY_NAME, "test-key");

        let store = FileStore::new(primary.path().into(), legacy.path().into());
        let err = store.fetch().await.unwrap_err();
        match err {
            SecretError::Unreadable { name, .. } => assert_eq!(name, SECRET_TOKEN_NAME),
            other => panic!("expected Unreadable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_credential_file_is_not_usable() {
        let primary = tempfile::tempdir().unwrap();
        let legacy = tempfile::tempdir().unwrap();
        write_secret(primary.path(), SECRET_KEY_NAME, "\n");
        write_secret(primary.path(), SECRET_TOKEN_NAME, "test-token");
        write_secret(primary.path(), SECRET_MEMBER_NAME, "alice");

        let store = FileStore::new(primary.path().into(), legacy.path().into());
        assert!(matches!(store.fetch().await, Err(SecretError::NotFound)));
    }
}
