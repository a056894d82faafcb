use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors the upload boundary translates into HTTP responses.
///
/// The core signing and URL building never fail per request; everything
/// here comes from form parsing or the blob store.
#[derive(Debug, thiserror::Error)]
pub enum UploaderServerError {
    #[error("invalid upload request: {0}")]
    BadRequest(String),
    #[error("{0:#}")]
    Storage(#[from] anyhow::Error),
}

/// Trait implementation to convert this error into an axum http response.
/// The failure message goes into the body so clients can see what went
/// wrong; no retries happen on either side.
impl IntoResponse for UploaderServerError {
    fn into_response(self) -> Response {
        match self {
            bad_request @ UploaderServerError::BadRequest(_) => {
                tracing::warn!(error = %bad_request, "rejecting upload");
                (StatusCode::BAD_REQUEST, bad_request.to_string()).into_response()
            }
            storage @ UploaderServerError::Storage(_) => {
                tracing::error!(error = %storage, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, storage.to_string()).into_response()
            }
        }
    }
}
