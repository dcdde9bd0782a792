use std::sync::Arc;

use rsa::pkcs8::der::pem;

use super::rsa::RsaSigner;
use super::secp256k1::Secp256k1Signer;
use super::signer::ResponseSigner;
use crate::error::SignatureError;

/// Parses PEM private key text into a key holder.
///
/// The PEM label selects the parser: `RSA PRIVATE KEY` (PKCS#1),
/// `EC PRIVATE KEY` (SEC1, secp256k1) or `PRIVATE KEY` (PKCS#8, RSA first,
/// then secp256k1). Surrounding whitespace is ignored.
pub fn load_private_key(text: &str) -> Result<Arc<dyn ResponseSigner>, SignatureError> {
    let document = format!("{}\n", text.trim());
    let text = document.as_str();
    let label = pem::decode_label(text.as_bytes())
        .map_err(|e| SignatureError::InvalidPrivateKey(format!("not a PEM document: {e}")))?;

    let signer: Arc<dyn ResponseSigner> = match label {
        "RSA PRIVATE KEY" => Arc::new(RsaSigner::from_pkcs1_pem(text)?),
        "EC PRIVATE KEY" => Arc::new(Secp256k1Signer::from_sec1_pem(text)?),
        "PRIVATE KEY" => match RsaSigner::from_pkcs8_pem(text) {
            Ok(signer) => Arc::new(signer),
            Err(_) => Arc::new(Secp256k1Signer::from_pkcs8_pem(text).map_err(|_| {
                SignatureError::InvalidPrivateKey(
                    "PKCS#8 key is neither RSA nor secp256k1".to_string(),
                )
            })?),
        },
        other => {
            return Err(SignatureError::InvalidPrivateKey(format!(
                "unsupported PEM label `{other}`"
            )));
        }
    };
    Ok(signer)
}
