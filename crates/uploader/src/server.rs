use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use uuid::Uuid;

use crate::error::UploaderServerError;
use crate::storage::ObjectStore;
use crate::urls::{ProxyUrlBuilder, TransformParams};

/// Maximum accepted upload body: 100 MB.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Everything a request needs: the URL builder (which holds the signing
/// secrets) and the blob store. Both are immutable once built.
#[derive(Clone)]
pub struct AppState {
    pub urls: Arc<ProxyUrlBuilder>,
    pub store: Arc<dyn ObjectStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/healthcheck",
            get(|| async move { (StatusCode::OK, "Ok").into_response() }),
        )
        .route("/", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

pub async fn run(host: String, port: u16, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!(%host, %port, "listening");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// `POST /`: store the uploaded image under a fresh key and answer with
/// the signed URL the proxy will derive variants from.
async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, UploaderServerError> {
    let (filename, data) = image_field(&mut multipart).await?;

    let key = object_key(&filename);
    tracing::info!(key = %key, bytes = data.len(), "storing upload");

    let locator = state.store.put(&key, data).await?;
    let url = state.urls.build(&locator, &TransformParams::default());
    tracing::info!(key = %key, locator = %locator, "upload stored");

    Ok((StatusCode::OK, format!("Image URL: {url}")).into_response())
}

/// Pull the `image` field out of the form. The field name must match the
/// name attribute of the upload form's file input.
async fn image_field(
    multipart: &mut Multipart,
) -> Result<(String, Bytes), UploaderServerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| UploaderServerError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|err| UploaderServerError::BadRequest(err.to_string()))?;
        return Ok((filename, data));
    }

    Err(UploaderServerError::BadRequest(
        "request is missing the \"image\" form field".to_string(),
    ))
}

/// Fresh storage key: a uuid, keeping the upload's file extension when it
/// has one. The extension is a rendering hint for the proxy, not a
/// validated content type.
fn object_key(filename: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(filename).extension().and_then(OsStr::to_str) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_keeps_the_extension() {
        let key = object_key("holiday photo.png");
        let stem = key.strip_suffix(".png").expect("extension kept");
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn object_key_without_extension_is_a_bare_uuid() {
        let key = object_key("photo");
        assert!(Uuid::parse_str(&key).is_ok());
    }

    #[test]
    fn object_keys_are_unique() {
        assert_ne!(object_key("a.png"), object_key("a.png"));
    }
}
