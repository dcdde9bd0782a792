use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use response_signature::{AppState, ResponseSignature, ResponseSigner, SignatureOptions, run};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    #[clap(long, default_value = "127.0.0.1")]
    host: String,
    #[clap(long, default_value = "3000")]
    port: u16,
    /// PEM private key text. Empty disables signing.
    #[clap(long, env = "RESPONSE_SIGNATURE_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    /// Path to a PEM private key, used when no key text is given.
    #[clap(long, env = "RESPONSE_SIGNATURE_PRIVATE_KEY_FILE")]
    private_key_file: Option<PathBuf>,
    #[clap(long, env = "RESPONSE_SIGNATURE_DIGEST")]
    digest: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let private_key = match (args.private_key, args.private_key_file) {
        (Some(text), _) => Some(text),
        (None, Some(path)) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("reading private key from {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let options = SignatureOptions { digest: args.digest };
    let signature = ResponseSignature::new(private_key.as_deref(), &options)
        .context("configuring response signatures")?;

    match signature.signer() {
        Some(signer) => tracing::info!(
            algorithm = signer.algorithm(),
            digest = %signature.digest(),
            "signing 200 responses"
        ),
        None => tracing::warn!("no private key configured, responses will not be signed"),
    }

    run(args.host, args.port, AppState { signature }).await
}
