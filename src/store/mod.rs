pub mod memory;
pub mod s3;

pub use memory::MemoryStore;
pub use s3::S3Store;

use std::path::Path;

use crate::error::StoreError;

/// Handle to an object the store has accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Exact key the object lives under
    pub key: String,
    /// URL the object is reachable at once public access is granted
    pub url: String,
}

/// Capability interface for a remote bucket-like object store.
///
/// Every operation is a fallible network call. `exists` is a best-effort
/// read, not a reservation: another writer can claim a key between an
/// `exists` returning `false` and the following `put` (see [`crate::naming`]).
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether an object currently occupies `key`.
    ///
    /// `Ok(false)` means a definite not-found; transport or auth failures
    /// surface as [`StoreError::Unavailable`] and must never be read as
    /// "taken" or "free".
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Upload the file at `local_path` to exactly `key`.
    async fn put(&self, local_path: &Path, key: &str) -> Result<StoredObject, StoreError>;

    /// Grant public read access to a previously uploaded object.
    async fn set_public(&self, object: &StoredObject) -> Result<(), StoreError>;

    /// Remove the object at `key`.
    ///
    /// Fails with [`StoreError::NotFound`] when no object is there.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
