//! In-memory ArtifactStorage.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::ArtifactStorage;

/// Mutex-guarded in-memory artifact store keyed by relative path.
#[derive(Default)]
pub struct InMemoryArtifactStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryArtifactStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous seeding helper for fixtures.
    pub fn seed(&self, path: &str, bytes: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
    }
}

#[async_trait]
impl ArtifactStorage for InMemoryArtifactStorage {
    async fn store(&self, path: &str, bytes: &[u8]) -> Result<(), DomainError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.files.lock().unwrap().get(path).cloned())
    }
}
