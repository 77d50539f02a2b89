//! Binary artifact storage port.
//!
//! Stores and serves opaque file artifacts: rendered certificates and
//! uploaded lecture videos, addressed by a relative storage path.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Storage for binary artifacts.
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Stores bytes at the given relative path, creating parent directories
    /// as needed.
    async fn store(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError>;

    /// Loads the bytes at the given relative path, or `None` if absent.
    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError>;
}
