use std::path::Path;

use aws_sdk_s3::Client;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::store::{ObjectStore, StoredObject};

/// AWS S3 (or S3-compatible) object store, bound to a single bucket
pub struct S3Store {
    client: Client,
    bucket: String,
    region: String,
    public_base_url: Option<String>,
}

impl S3Store {
    /// Connect using the default AWS configuration plus the overrides in
    /// `config`
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let mut sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest());

        // Handle anonymous access
        if config.anonymous {
            sdk_config = sdk_config.no_credentials();
        }

        let base_config = sdk_config.load().await;

        // Region is pinned at connect time so URL composition never
        // consults ambient state later
        let region = config
            .default_region
            .or_else(|| base_config.region().map(|r| r.as_ref().to_string()))
            .unwrap_or_else(|| "us-east-1".to_string());

        // Build S3-specific config
        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&base_config);

        if let Some(endpoint) = config.endpoint_url {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        if config.force_path_style {
            s3_config_builder = s3_config_builder.force_path_style(true);
        }

        let client = Client::from_conf(s3_config_builder.build());

        Ok(S3Store {
            client,
            bucket: config.bucket,
            region,
            public_base_url: config.public_base_url,
        })
    }

    /// Build a store from an already-configured client (e.g. one pointed
    /// at LocalStack in tests)
    pub fn from_client(client: Client, config: StoreConfig) -> Self {
        let region = config
            .default_region
            .unwrap_or_else(|| "us-east-1".to_string());

        S3Store {
            client,
            bucket: config.bucket,
            region,
            public_base_url: config.public_base_url,
        }
    }

    /// Public URL for a key: the configured base URL when present, else
    /// the bucket's virtual-hosted address
    fn object_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        // A missing object and an unreachable store are different answers:
        // only the service's own not-found maps to Ok(false)
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(err)) if err.err().is_not_found() => Ok(false),
            Err(err) => Err(StoreError::unavailable(err)),
        }
    }

    async fn put(&self, local_path: &Path, key: &str) -> Result<StoredObject, StoreError> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|err| StoreError::source(local_path, err))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(StoreError::unavailable)?;

        Ok(StoredObject {
            key: key.to_string(),
            url: self.object_url(key),
        })
    }

    async fn set_public(&self, object: &StoredObject) -> Result<(), StoreError> {
        self.client
            .put_object_acl()
            .bucket(&self.bucket)
            .key(&object.key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(StoreError::unavailable)?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        // DeleteObject succeeds on absent keys, so the not-found contract
        // needs its own check
        if !self.exists(key).await? {
            return Err(StoreError::NotFound {
                key: key.to_string(),
            });
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(StoreError::unavailable)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_store(config: StoreConfig) -> S3Store {
        let conf = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .build();
        S3Store::from_client(Client::from_conf(conf), config)
    }

    #[test]
    fn test_virtual_hosted_url() {
        let store = offline_store(StoreConfig::new("media"));
        assert_eq!(
            store.object_url("images/photo.jpg"),
            "https://media.s3.us-east-1.amazonaws.com/images/photo.jpg"
        );
    }

    #[test]
    fn test_region_override_in_url() {
        let mut config = StoreConfig::new("media");
        config.default_region = Some("eu-west-1".to_string());
        let store = offline_store(config);
        assert_eq!(
            store.object_url("a.txt"),
            "https://media.s3.eu-west-1.amazonaws.com/a.txt"
        );
    }

    #[test]
    fn test_public_base_url_override() {
        let mut config = StoreConfig::new("media");
        config.public_base_url = Some("https://cdn.example.com/".to_string());
        let store = offline_store(config);
        assert_eq!(
            store.object_url("images/photo.jpg"),
            "https://cdn.example.com/images/photo.jpg"
        );
    }
}
