use std::fmt;

/// Configuration for a single bucket-backed store.
///
/// Built once by the caller and passed explicitly into
/// [`S3Store::connect`](crate::store::S3Store::connect); nothing here is
/// read from ambient global state.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Bucket that receives every object
    pub bucket: String,
    /// Optional custom endpoint URL
    pub endpoint_url: Option<String>,
    /// Whether to use path-style addressing (required for some S3-compatible services)
    pub force_path_style: bool,
    /// Whether to skip credentials (for anonymous/public access)
    pub anonymous: bool,
    /// Optional default region override
    pub default_region: Option<String>,
    /// Base URL for composing public object URLs, replacing the bucket's
    /// virtual-hosted address (e.g. a CDN domain in front of the bucket)
    pub public_base_url: Option<String>,
}

impl StoreConfig {
    /// Configuration for a bucket with default AWS settings
    pub fn new(bucket: impl Into<String>) -> Self {
        StoreConfig {
            bucket: bucket.into(),
            endpoint_url: None,
            force_path_style: false,
            anonymous: false,
            default_region: None,
            public_base_url: None,
        }
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.endpoint_url {
            Some(endpoint) => write!(f, "{} ({})", self.bucket, endpoint),
            None => write!(f, "{}", self.bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = StoreConfig::new("media");
        assert_eq!(config.bucket, "media");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.force_path_style, false);
        assert_eq!(config.anonymous, false);
        assert_eq!(config.default_region, None);
        assert_eq!(config.public_base_url, None);
    }

    #[test]
    fn test_display_includes_endpoint() {
        let mut config = StoreConfig::new("media");
        assert_eq!(config.to_string(), "media");

        config.endpoint_url = Some("http://localhost:4566".to_string());
        assert_eq!(config.to_string(), "media (http://localhost:4566)");
    }
}
