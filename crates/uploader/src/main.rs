use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use image_uploader::{
    AppState, MemoryStore, ObjectStore, ProxyUrlBuilder, S3Config, S3Store, UrlSigner, run,
};

#[derive(Debug, Clone, ValueEnum)]
enum StorageBackend {
    S3,
    Memory,
}

#[derive(Parser)]
struct Args {
    #[clap(long, default_value = "0.0.0.0")]
    host: String,
    #[clap(long, default_value = "8080")]
    port: u16,

    /// Public base URL of the verifying image proxy.
    #[clap(long, env = "IMGPROXY_PUBLIC_URL")]
    base_url: String,
    /// Hex-encoded HMAC signing key shared with the proxy.
    #[clap(long, env = "IMGPROXY_SIGNING_KEY")]
    signing_key: String,
    /// Hex-encoded HMAC signing salt shared with the proxy.
    #[clap(long, env = "IMGPROXY_SIGNING_SALT")]
    signing_salt: String,

    #[clap(long, env = "STORAGE_BACKEND", value_enum, default_value = "s3")]
    storage: StorageBackend,
    #[clap(long, env = "IMG_UPLOAD_BUCKET")]
    bucket: String,

    // Connection settings for the s3 backend; the memory backend ignores them.
    #[clap(long, env = "RESOURCE_ENDPOINT")]
    endpoint: Option<String>,
    #[clap(long, env = "RESOURCE_REGION")]
    region: Option<String>,
    #[clap(long, env = "ACCESS_KEY")]
    access_key: Option<String>,
    #[clap(long, env = "ACCESS_SECRET")]
    access_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let signer = UrlSigner::from_hex(&args.signing_key, &args.signing_salt)
        .context("unusable signing configuration")?;
    let urls = Arc::new(ProxyUrlBuilder::new(args.base_url, signer));

    tracing::info!(storage = ?args.storage, "starting image uploader");

    let store: Arc<dyn ObjectStore> = match args.storage {
        StorageBackend::S3 => {
            let store = S3Store::new(S3Config {
                endpoint: args
                    .endpoint
                    .context("RESOURCE_ENDPOINT is required for the s3 backend")?,
                region: args
                    .region
                    .context("RESOURCE_REGION is required for the s3 backend")?,
                access_key: args
                    .access_key
                    .context("ACCESS_KEY is required for the s3 backend")?,
                access_secret: args
                    .access_secret
                    .context("ACCESS_SECRET is required for the s3 backend")?,
                bucket: args.bucket,
            });
            store.ensure_bucket().await.context("upload bucket is not usable")?;
            Arc::new(store)
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new(args.bucket)),
    };

    run(args.host, args.port, AppState { urls, store }).await
}
