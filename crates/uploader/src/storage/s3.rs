use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;

use super::ObjectStore;

/// Connection settings for an S3-compatible endpoint.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub access_secret: String,
    pub bucket: String,
}

/// Blob store backed by an S3-compatible service.
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    /// Build a client for the configured endpoint. Path-style addressing
    /// keeps bucket names out of DNS, which MinIO-style endpoints expect.
    pub fn new(cfg: S3Config) -> Self {
        let credentials =
            Credentials::new(cfg.access_key, cfg.access_secret, None, None, "static");
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(cfg.region))
            .endpoint_url(cfg.endpoint)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();
        Self {
            client: Client::from_conf(s3_config),
            bucket: cfg.bucket,
        }
    }

    /// Create the upload bucket when it does not exist yet. Runs once at
    /// startup, before the first request is served.
    pub async fn ensure_bucket(&self) -> Result<()> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(()),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => {
                self.client
                    .create_bucket()
                    .bucket(&self.bucket)
                    .send()
                    .await
                    .with_context(|| format!("creating bucket {}", self.bucket))?;
                tracing::info!(bucket = %self.bucket, "created upload bucket");
                Ok(())
            }
            Err(err) => Err(err).with_context(|| format!("checking bucket {}", self.bucket)),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, data: Bytes) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .with_context(|| format!("failed to store image {key}"))?;
        Ok(format!("s3://{}/{}", self.bucket, key))
    }
}
