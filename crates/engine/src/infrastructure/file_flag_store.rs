//! Flag storage backed by JSON files.
//!
//! Layout: `<root>/<scope>/<character>/<property>.json`. Writes go through a
//! temp file and a rename, so a crash never leaves a half-written blob.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use spellbinder_domain::CharacterId;

use crate::infrastructure::ports::{FlagStorePort, RepoError};

pub struct JsonFileFlagStore {
    dir: PathBuf,
}

impl JsonFileFlagStore {
    pub fn new(root: impl AsRef<Path>, scope: &str) -> Self {
        Self {
            dir: root.as_ref().join(sanitize(scope)),
        }
    }

    fn path_for(&self, id: &CharacterId, key: &str) -> PathBuf {
        self.dir
            .join(sanitize(id.as_str()))
            .join(format!("{}.json", sanitize(key)))
    }
}

/// Encode an id or key as one path segment.
///
/// ASCII letters, digits and `-` pass through; every other byte, `_`
/// included, becomes `_XX`. Distinct inputs therefore never share a file,
/// and no segment can contain a separator or `..`.
fn sanitize(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("_{byte:02X}"));
        }
    }
    encoded
}

#[async_trait]
impl FlagStorePort for JsonFileFlagStore {
    async fn read_blob(&self, id: &CharacterId, key: &str) -> Result<Option<Value>, RepoError> {
        let path = self.path_for(id, key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::database("read_blob", e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(RepoError::serialization)
    }

    async fn write_blob(
        &self,
        id: &CharacterId,
        key: &str,
        value: Value,
    ) -> Result<(), RepoError> {
        let path = self.path_for(id, key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepoError::database("write_blob", e))?;
        }

        let bytes = serde_json::to_vec_pretty(&value).map_err(RepoError::serialization)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| RepoError::database("write_blob", e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| RepoError::database("write_blob", e))?;

        tracing::debug!(character_id = %id, key, path = %path.display(), "Wrote flag blob");
        Ok(())
    }

    async fn clear_blob(&self, id: &CharacterId, key: &str) -> Result<(), RepoError> {
        match tokio::fs::remove_file(self.path_for(id, key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepoError::database("clear_blob", e)),
        }
    }
}
