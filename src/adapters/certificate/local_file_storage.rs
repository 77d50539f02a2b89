//! Filesystem-backed artifact storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ArtifactStorage;

/// Stores artifacts under a root directory on the local filesystem.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a relative path under the root, rejecting traversal.
    fn resolve(&self, path: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(path);
        let traversal = relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if traversal {
            return Err(DomainError::new(
                ErrorCode::InvalidInput,
                "Invalid storage path",
            ));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ArtifactStorage for LocalFileStorage {
    async fn store(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::new(ErrorCode::StorageError, format!("mkdir failed: {}", e))
            })?;
        }
        tokio::fs::write(&full, bytes).await.map_err(|e| {
            DomainError::new(ErrorCode::StorageError, format!("write failed: {}", e))
        })
    }

    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let full = self.resolve(path)?;
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::new(
                ErrorCode::StorageError,
                format!("read failed: {}", e),
            )),
        }
    }
}
