//! Signature request submission to Dropbox Sign.
//!
//! The flow is deliberately short:
//! - validate the API key and caller input
//! - build the multipart payload (metadata, ordered signers, one file)
//! - `POST` it to `signature_request/send` with Basic auth and relay the result

mod builder;
mod client;
mod config;
mod defaults;
mod transport;
mod types;

pub use builder::RequestBuilder;
pub use client::SignatureRequestClient;
pub use config::{API_KEY_VAR, API_URL_VAR, Credential, DEFAULT_TIMEOUT, ProviderConfig, TIMEOUT_VAR};
pub use defaults::RequestDefaults;
pub use transport::{HttpTransport, Transport};
pub use types::{
    DocumentSubmission, FilePart, Participant, ProviderResponse, SignatureRequestInput,
    SignatureRequestPayload, SignerGroup, SigningType,
};
