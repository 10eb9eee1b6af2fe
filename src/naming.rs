//! Unique key resolution for bucket-like stores.
//!
//! Finding a free key costs one network round trip per candidate, so the
//! scheme for picking the next candidate after a collision matters. A
//! sequential suffix (`-1`, `-2`, ...) is enumerable: anyone who can fill
//! keys forces an unbounded chain of sequential checks for a single upload.
//! This resolver instead probes the bare desired name once, then switches
//! to fresh random tokens, keeping the expected number of checks near two
//! no matter how contended the namespace is.
//!
//! The existence check is a read, not a reservation. Two concurrent
//! resolutions can both observe a key as free and both upload to it, with
//! the later write winning at the store layer. Closing that gap needs a
//! conditional-put capability from the store; until then callers get
//! best-effort collision avoidance only.

use uuid::Uuid;

use crate::error::StoreError;
use crate::store::ObjectStore;

/// Resolves desired object names to keys that are free in the target store.
///
/// Stateless and reentrant; safe to share across concurrent resolutions.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    max_attempts: Option<u32>,
}

impl NameResolver {
    /// Resolver that keeps probing until a free key turns up
    pub fn new() -> Self {
        NameResolver { max_attempts: None }
    }

    /// Resolver that gives up with [`StoreError::AttemptsExhausted`] after
    /// `max_attempts` existence checks
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        NameResolver {
            max_attempts: Some(max_attempts),
        }
    }

    /// Find a key composed of `directory`, `base_name`, and `extension`
    /// that no object currently occupies.
    ///
    /// The first candidate is the bare desired name, so the common
    /// collision-free case yields a predictable, human-readable key in a
    /// single check. Every candidate after a collision carries a fresh
    /// `-<uuid>` disambiguator.
    ///
    /// `directory` is used as an opaque prefix and `base_name` as a
    /// literal stem (an empty stem is allowed); neither is normalized or
    /// sanitized here. `extension` includes its separator and is omitted
    /// entirely when absent.
    ///
    /// Store failures abort resolution immediately and are never treated
    /// as a collision; a key is only returned on a fresh negative
    /// existence check in this same call.
    pub async fn resolve(
        &self,
        store: &dyn ObjectStore,
        directory: &str,
        base_name: &str,
        extension: Option<&str>,
    ) -> Result<String, StoreError> {
        let mut attempt: u32 = 0;

        // Explicit loop rather than recursion: a pathological collision
        // sequence must not grow the stack
        loop {
            if let Some(max) = self.max_attempts {
                if attempt >= max {
                    return Err(StoreError::AttemptsExhausted { attempts: attempt });
                }
            }

            // The counter only decides whether a token is attached; the
            // token itself is never derived from it
            let disambiguator = if attempt == 0 {
                String::new()
            } else {
                format!("-{}", Uuid::new_v4())
            };

            let candidate = compose_key(directory, base_name, &disambiguator, extension);

            if store.exists(&candidate).await? {
                tracing::debug!(
                    "key {} taken on attempt {}, retrying with a fresh token",
                    candidate,
                    attempt
                );
                attempt += 1;
                continue;
            }

            if attempt > 0 {
                tracing::debug!("resolved {} after {} collisions", candidate, attempt);
            }
            return Ok(candidate);
        }
    }
}

/// Compose a candidate key exactly as the store will receive it.
///
/// The probed key and the later upload key must match byte-for-byte, so
/// all composition funnels through here.
pub fn compose_key(
    directory: &str,
    base_name: &str,
    disambiguator: &str,
    extension: Option<&str>,
) -> String {
    match extension {
        Some(ext) => format!("{}{}{}{}", directory, base_name, disambiguator, ext),
        None => format!("{}{}{}", directory, base_name, disambiguator),
    }
}
