pub mod error;
pub mod server;
pub mod signing;
pub mod storage;
pub mod urls;

pub use error::UploaderServerError;
pub use server::{AppState, router, run};
pub use signing::UrlSigner;
pub use storage::{MemoryStore, ObjectStore, S3Config, S3Store};
pub use urls::{ProxyUrlBuilder, TransformParams};
