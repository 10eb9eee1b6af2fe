//! Typed error definitions for stowage.
//! A small set of well-known failure modes shared by every store backend.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the request (network,
    /// timeout, auth). Never raised for a definite not-found.
    #[error("object store unavailable: {source}")]
    Unavailable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No object occupies the given key.
    #[error("no object at key {key}")]
    NotFound { key: String },

    /// The local file to upload could not be read.
    #[error("cannot read upload source {path}")]
    Source {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Name resolution hit its configured attempt ceiling without finding
    /// a free key.
    #[error("no free key found after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}

impl StoreError {
    /// Wrap a transport-level failure
    pub fn unavailable(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Unavailable {
            source: source.into(),
        }
    }

    /// Wrap a failure to read the local upload source
    pub fn source(path: impl Into<PathBuf>, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Source {
            path: path.into(),
            source: source.into(),
        }
    }
}
