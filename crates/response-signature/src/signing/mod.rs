mod key;
mod rsa;
mod secp256k1;
mod signer;

pub use key::load_private_key;
pub use self::rsa::RsaSigner;
pub use secp256k1::Secp256k1Signer;
pub use signer::ResponseSigner;
