use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::credential::Credential;
use crate::error::StoreError;

/// JSON file holding the single AniList credential.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or blank file means no credential yet.
    pub async fn load(&self) -> Result<Option<Credential>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no credential file");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Replace the stored credential. Written to a sibling temp file first so a
    /// crash never leaves a half-written credential behind.
    pub async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(credential)?;
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &body).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;

        info!(
            path = %self.path.display(),
            valid_until = credential.valid_until,
            "AniList credential saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "alpe-token-store-{name}-{}-{nanos}.json",
            std::process::id()
        ))
    }

    fn sample() -> Credential {
        Credential {
            token_type: "Bearer".to_string(),
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            valid_until: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn missing_and_blank_files_mean_no_credential() {
        let path = temp_path("blank");
        let store = TokenStore::new(&path);
        assert!(store.load().await.unwrap().is_none());

        tokio::fs::write(&path, b"  \n").await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn save_then_load_returns_the_same_credential() {
        let path = temp_path("roundtrip");
        let store = TokenStore::new(&path);

        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(sample()));
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let path = temp_path("corrupt");
        tokio::fs::write(&path, b"{\"access\":").await.unwrap();

        let err = TokenStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        let _ = tokio::fs::remove_file(&path).await;
    }
}
