//! The signing middleware.
//!
//! Only `200 OK` responses are signed, and only when a private key is
//! configured. Everything else passes through untouched and without any
//! cryptographic work.
//!
//! For a signed response the body is materialized, stripped of leading and
//! trailing whitespace, signed, and the encoded signature is placed in the
//! `Response-Signature` header. The body itself is handed on unmodified.
//!
//! A client verifies with:
//!
//! ```text
//! signature = base64_decode(percent_decode(headers["Response-Signature"]))
//! valid     = pkcs1v15_verify(public_key, sha256, signature, trim(body))
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request, Response, StatusCode};
use axum_core::response::IntoResponse;
use http_body_util::BodyExt;

use crate::body::{SignableBody, normalize};
use crate::config::{DigestAlgorithm, SignatureOptions};
use crate::encoding::encode_signature;
use crate::error::SignatureError;
use crate::signing::{ResponseSigner, load_private_key};

/// Header carrying the encoded body signature.
pub const SIGNATURE_HEADER: HeaderName = HeaderName::from_static("response-signature");

/// Signing policy and key holder, fixed at construction.
///
/// Cheap to clone; every clone shares the same parsed key.
#[derive(Clone)]
pub struct ResponseSignature {
    signer: Option<Arc<dyn ResponseSigner>>,
    digest: DigestAlgorithm,
}

impl ResponseSignature {
    /// Builds the middleware state from PEM key text.
    ///
    /// `None` or an empty string disables signing; options are not inspected
    /// in that case. A non-empty key that does not parse, or an unknown
    /// digest, is an error.
    pub fn new(private_key: Option<&str>, options: &SignatureOptions) -> Result<Self, SignatureError> {
        match private_key {
            None | Some("") => Ok(Self::disabled()),
            Some(pem) => {
                let signer = load_private_key(pem)?;
                let digest = options.digest_algorithm()?;
                Ok(Self::with_signer(signer, digest))
            }
        }
    }

    /// Passthrough mode: no response is ever signed.
    pub fn disabled() -> Self {
        Self { signer: None, digest: DigestAlgorithm::default() }
    }

    /// Uses an already parsed key holder.
    pub fn with_signer(signer: Arc<dyn ResponseSigner>, digest: DigestAlgorithm) -> Self {
        Self { signer: Some(signer), digest }
    }

    pub fn is_enabled(&self) -> bool {
        self.signer.is_some()
    }

    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    pub fn signer(&self) -> Option<&Arc<dyn ResponseSigner>> {
        self.signer.as_ref()
    }

    pub fn should_sign(&self, status: StatusCode) -> bool {
        self.signer.is_some() && status == StatusCode::OK
    }

    /// Signs `body` after normalization and returns the encoded header value,
    /// or `None` when signing is disabled.
    pub fn sign_body(&self, body: &[u8]) -> Result<Option<String>, SignatureError> {
        let Some(signer) = &self.signer else {
            return Ok(None);
        };
        let normalized = normalize(body);
        let signature = signer.sign(self.digest, normalized)?;
        tracing::debug!(
            algorithm = signer.algorithm(),
            digest = %self.digest,
            signed_bytes = normalized.len(),
            "signed response body"
        );
        Ok(Some(encode_signature(&signature)))
    }

    /// Adds the signature header to a qualifying response.
    ///
    /// The returned response carries the very body value that was passed in;
    /// only the header map changes. Non-qualifying responses are returned as
    /// they came.
    pub fn sign_response<B: SignableBody>(&self, mut response: Response<B>) -> Result<Response<B>, SignatureError> {
        if !self.should_sign(response.status()) {
            return Ok(response);
        }

        let Some(encoded) = self.sign_body(&response.body().signable_bytes())? else {
            return Ok(response);
        };
        let value = HeaderValue::try_from(encoded)
            .map_err(|e| SignatureError::Signing(format!("encoding header value: {e}")))?;
        response.headers_mut().insert(SIGNATURE_HEADER, value);
        Ok(response)
    }

    /// Collects a streamed body into memory, then signs it.
    ///
    /// The downstream body holds the collected bytes unchanged. Trailers are
    /// not carried over.
    async fn sign_streamed(&self, response: Response<Body>) -> Result<Response<Body>, SignatureError> {
        let (parts, body) = response.into_parts();
        let bytes = body
            .collect()
            .await
            .map_err(|e| SignatureError::Body(e.to_string()))?
            .to_bytes();
        let response = self.sign_response(Response::from_parts(parts, bytes))?;
        Ok(response.map(Body::from))
    }

    pub fn layer(&self) -> ResponseSignatureLayer {
        ResponseSignatureLayer::new(self.clone())
    }
}

impl fmt::Debug for ResponseSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseSignature")
            .field("algorithm", &self.signer.as_ref().map(|s| s.algorithm()))
            .field("digest", &self.digest)
            .finish()
    }
}

/// Tower layer that signs `200 OK` responses of the wrapped service.
#[derive(Clone, Debug)]
pub struct ResponseSignatureLayer {
    signature: ResponseSignature,
}

impl ResponseSignatureLayer {
    pub fn new(signature: ResponseSignature) -> Self {
        Self { signature }
    }
}

impl<S> tower::Layer<S> for ResponseSignatureLayer {
    type Service = ResponseSignatureService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ResponseSignatureService {
            inner,
            signature: self.signature.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResponseSignatureService<S> {
    inner: S,
    signature: ResponseSignature,
}

impl<S, ReqBody> tower::Service<Request<ReqBody>> for ResponseSignatureService<S>
where
    S: tower::Service<Request<ReqBody>, Response = Response<Body>> + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let signature = self.signature.clone();
        let future = self.inner.call(req);

        Box::pin(async move {
            let response = future.await?;
            if !signature.should_sign(response.status()) {
                return Ok(response);
            }

            // never fall back to an unsigned 200
            match signature.sign_streamed(response).await {
                Ok(response) => Ok(response),
                Err(err) => {
                    tracing::error!(error = %err, "failed to sign response");
                    Ok(err.into_response())
                }
            }
        })
    }
}
