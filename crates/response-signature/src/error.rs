use axum::http::StatusCode;
use axum_core::response::{IntoResponse as AxumCoreIntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Failed to parse private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedDigest(String),
    #[error("Failed to sign response body: {0}")]
    Signing(String),
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Trait implementation to convert this error into an axum http response
impl AxumCoreIntoResponse for SignatureError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Something wrong happened.",
        )
            .into_response()
    }
}
