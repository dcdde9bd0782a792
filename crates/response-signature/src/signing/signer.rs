use crate::config::DigestAlgorithm;
use crate::error::SignatureError;

/// A private-key holder that signs response bodies.
///
/// Implementations are sync — signing is CPU-bound and runs inside the
/// request future.
pub trait ResponseSigner: Send + Sync {
    /// Sign `data` using `digest` inside the key's signature scheme.
    /// Returns raw signature bytes.
    fn sign(&self, digest: DigestAlgorithm, data: &[u8]) -> Result<Vec<u8>, SignatureError>;

    /// SubjectPublicKeyInfo PEM of the matching public key.
    fn public_key_pem(&self) -> Result<String, SignatureError>;

    /// Algorithm identifier string (e.g. "rsa-pkcs1v15").
    fn algorithm(&self) -> &str;
}
