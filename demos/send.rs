//! Sends a PDF for signature using `DROPBOX_SIGN_API_KEY` from the environment.
//!
//! ```sh
//! DROPBOX_SIGN_API_KEY=... cargo run --example send -- contract.pdf "Alice <a@x.com>" "Bob <b@x.com>"
//! ```

use std::env;
use std::fs;

use anyhow::{Context as _, bail};
use base64::Engine as _;
use base64::prelude::BASE64_STANDARD;
use signature_request_client::{
    Participant, ProviderConfig, SignatureRequestClient, SignatureRequestInput,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn parse_participant(raw: &str) -> anyhow::Result<Participant> {
    let (name, rest) = raw
        .split_once('<')
        .with_context(|| format!("expected `Name <email>`, got `{raw}`"))?;
    let email = rest.trim_end_matches('>').trim();
    Ok(Participant::new(name.trim(), email))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: send <file.pdf> <Name <email>>...");
    };
    let participants = args
        .map(|raw| parse_participant(&raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let bytes = fs::read(&path).with_context(|| format!("reading {path}"))?;
    let input = SignatureRequestInput::new(participants, BASE64_STANDARD.encode(bytes));

    let client = SignatureRequestClient::new(&ProviderConfig::from_env()?)?;
    let response = client.create_signature_request(&input).await?;

    info!(%path, %response, "signature request sent");

    Ok(())
}
