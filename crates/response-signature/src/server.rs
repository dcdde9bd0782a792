use anyhow::{Context, Result};

use axum::{
    Router,
    body::Bytes,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::middleware::ResponseSignature;

#[derive(Clone, Debug)]
pub struct AppState {
    pub signature: ResponseSignature,
}

/// Demo routes, all wrapped in the signing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(|| async move { (StatusCode::OK, "Ok").into_response() }))
        .route("/echo", post(echo_handler))
        .route("/status/{code}", get(status_handler))
        .layer(state.signature.layer())
}

pub async fn run(host: String, port: u16, state: AppState) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%addr, signing = state.signature.is_enabled(), "listening");

    axum::serve(listener, router(state))
        .await
        .context("serving http")?;

    Ok(())
}

async fn echo_handler(body: Bytes) -> impl IntoResponse {
    (StatusCode::OK, body)
}

async fn status_handler(Path(code): Path<u16>) -> impl IntoResponse {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, code.to_string()).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "invalid status code").into_response(),
    }
}
