use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

use bytes::Bytes;

use crate::error::StoreError;
use crate::store::{ObjectStore, StoredObject};

#[derive(Debug, Default)]
struct Inner {
    objects: HashMap<String, Bytes>,
    public: HashSet<String>,
}

/// In-memory object store for tests and local development.
///
/// Honors the same contract as the remote backends, including
/// [`StoreError::NotFound`] on deleting a missing key. Clones share the
/// same underlying object map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object directly, bypassing the upload path
    pub fn insert(&self, key: impl Into<String>, content: impl Into<Bytes>) {
        let mut inner = self.inner.write().unwrap();
        inner.objects.insert(key.into(), content.into());
    }

    /// Get an object's content
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let inner = self.inner.read().unwrap();
        inner.objects.get(key).cloned()
    }

    /// Whether public read access has been granted for `key`
    pub fn is_public(&self, key: &str) -> bool {
        let inner = self.inner.read().unwrap();
        inner.public.contains(key)
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap();
        inner.objects.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        MemoryStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.objects.contains_key(key))
    }

    async fn put(&self, local_path: &Path, key: &str) -> Result<StoredObject, StoreError> {
        let content = tokio::fs::read(local_path)
            .await
            .map_err(|err| StoreError::source(local_path, err))?;

        let mut inner = self.inner.write().unwrap();
        inner.objects.insert(key.to_string(), Bytes::from(content));

        Ok(StoredObject {
            key: key.to_string(),
            url: format!("memory://{}", key),
        })
    }

    async fn set_public(&self, object: &StoredObject) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();

        if !inner.objects.contains_key(&object.key) {
            return Err(StoreError::NotFound {
                key: object.key.clone(),
            });
        }

        inner.public.insert(object.key.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().unwrap();

        if inner.objects.remove(key).is_none() {
            return Err(StoreError::NotFound {
                key: key.to_string(),
            });
        }

        inner.public.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_object_exists() {
        let store = MemoryStore::new();
        store.insert("images/photo.jpg", "bytes");

        assert!(store.exists("images/photo.jpg").await.unwrap());
        assert!(!store.exists("images/other.jpg").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_not_found() {
        let store = MemoryStore::new();

        let err = store.delete("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_clones_share_objects() {
        let store = MemoryStore::new();
        let view = store.clone();

        store.insert("a", "1");
        assert!(view.exists("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_public_requires_existing_object() {
        let store = MemoryStore::new();
        let ghost = StoredObject {
            key: "missing".to_string(),
            url: "memory://missing".to_string(),
        };

        let err = store.set_public(&ghost).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
