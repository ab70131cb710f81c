#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![cfg_attr(
    test,
    expect(
        clippy::unwrap_used,
        clippy::missing_assert_message,
        reason = "Tests"
    )
)]

pub mod error;
pub mod signature_request;

pub use error::{Error, Kind};
pub use signature_request::{
    Credential, DocumentSubmission, HttpTransport, Participant, ProviderConfig, ProviderResponse,
    RequestBuilder, RequestDefaults, SignatureRequestClient, SignatureRequestInput,
    SignatureRequestPayload, SigningType, Transport,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Dropbox Sign (formerly HelloSign) API base URL.
pub const DEFAULT_HOST: &str = "https://api.hellosign.com/v3/";

/// Endpoint path, relative to the host, that creates and sends a signature request.
pub const SEND_PATH: &str = "signature_request/send";
