use std::path::Path;
use std::sync::Arc;

use chrono::Utc;

use crate::error::StoreError;
use crate::naming::NameResolver;
use crate::store::ObjectStore;

/// Upload orchestrator for a single key prefix.
///
/// `save` picks a free key, uploads the file, grants public read access,
/// and hands back the URL. Objects land under a dated directory
/// (`prefix/YYYY/MM/`) so a bucket full of uploads stays browsable.
pub struct Uploader {
    store: Arc<dyn ObjectStore>,
    prefix: String,
    resolver: NameResolver,
}

impl Uploader {
    pub fn new(store: Arc<dyn ObjectStore>, prefix: impl Into<String>) -> Self {
        Uploader {
            store,
            prefix: normalize_dir(&prefix.into()),
            resolver: NameResolver::new(),
        }
    }

    /// Replace the default unbounded resolver (e.g. with a capped one)
    pub fn with_resolver(mut self, resolver: NameResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Upload the file at `local_path` under the desired `file_name`,
    /// returning the public URL of the stored object.
    ///
    /// The name is sanitized first; when the resulting key is taken it
    /// gains a random disambiguator, so a save never overwrites an object
    /// that was visible at resolution time.
    pub async fn save(&self, local_path: &Path, file_name: &str) -> Result<String, StoreError> {
        let target_dir = self.target_dir();
        let sanitized = sanitized_file_name(file_name);
        let (base_name, extension) = split_file_name(&sanitized);

        let key = self
            .resolver
            .resolve(self.store.as_ref(), &target_dir, base_name, extension)
            .await?;

        let object = self.store.put(local_path, &key).await?;
        self.store.set_public(&object).await?;

        tracing::debug!("stored {} at {}", file_name, object.key);
        Ok(object.url)
    }

    /// Remove a previously saved object by file name.
    ///
    /// `target_dir` is the dated directory the object was saved under;
    /// saves return the full URL, so callers keeping only names must also
    /// keep the directory.
    pub async fn delete(&self, file_name: &str, target_dir: &str) -> Result<(), StoreError> {
        let key = format!(
            "{}{}",
            normalize_dir(target_dir),
            sanitized_file_name(file_name)
        );
        self.store.delete(&key).await
    }

    /// Directory for objects saved this month
    pub fn target_dir(&self) -> String {
        format!("{}{}/", self.prefix, Utc::now().format("%Y/%m"))
    }
}

/// Normalize a directory prefix to end with exactly one `/` (empty stays
/// empty, meaning the bucket root)
fn normalize_dir(dir: &str) -> String {
    if dir.is_empty() {
        return String::new();
    }
    format!("{}/", dir.trim_end_matches('/'))
}

/// Tame an upload name: anything outside `A-Za-z0-9@._-` becomes `-`
pub fn sanitized_file_name(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Split a file name into stem and extension at the last dot.
///
/// The extension keeps its separator. Dotless names and leading-dot names
/// (".env") have no extension.
fn split_file_name(file_name: &str) -> (&str, Option<&str>) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => (&file_name[..idx], Some(&file_name[idx..])),
        _ => (file_name, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dir() {
        assert_eq!(normalize_dir("images"), "images/");
        assert_eq!(normalize_dir("images/"), "images/");
        assert_eq!(normalize_dir("a/b//"), "a/b/");
        assert_eq!(normalize_dir(""), "");
    }

    #[test]
    fn test_sanitized_file_name() {
        assert_eq!(sanitized_file_name("photo.jpg"), "photo.jpg");
        assert_eq!(sanitized_file_name("we ird/name!.jpg"), "we-ird-name-.jpg");
        assert_eq!(sanitized_file_name("café.png"), "caf-.png");
        assert_eq!(sanitized_file_name("user@host_v2-final.tar"), "user@host_v2-final.tar");
    }

    #[test]
    fn test_split_file_name() {
        assert_eq!(split_file_name("photo.jpg"), ("photo", Some(".jpg")));
        assert_eq!(split_file_name("archive.tar.gz"), ("archive.tar", Some(".gz")));
        assert_eq!(split_file_name("README"), ("README", None));
        assert_eq!(split_file_name(".env"), (".env", None));
        assert_eq!(split_file_name(""), ("", None));
    }
}
