//! S3-backed media storage with collision-resistant unique key resolution.
//!
//! The interesting part lives in [`naming`]: picking an object key that is
//! free in a remote bucket without letting a contended (or hostile)
//! namespace turn one upload into an unbounded chain of existence checks.
//! Around it sit the [`store`] capability trait with S3 and in-memory
//! backends, and the [`upload`] orchestrator that ties resolution, upload,
//! and public-access granting together.

pub mod config;
pub mod error;
pub mod naming;
pub mod store;
pub mod upload;

pub use config::StoreConfig;
pub use error::StoreError;
pub use naming::NameResolver;
pub use store::{MemoryStore, ObjectStore, S3Store, StoredObject};
pub use upload::Uploader;
