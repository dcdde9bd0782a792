pub mod body;
pub mod config;
pub mod encoding;
pub mod error;
pub mod middleware;
pub mod server;
pub mod signing;

pub use body::SignableBody;
pub use config::{DigestAlgorithm, SignatureOptions};
pub use error::SignatureError;
pub use middleware::{ResponseSignature, ResponseSignatureLayer, ResponseSignatureService, SIGNATURE_HEADER};
pub use server::{AppState, router, run};
pub use signing::{ResponseSigner, RsaSigner, Secp256k1Signer, load_private_key};
