use reqwest::Client as ReqwestClient;

use crate::Result;
use crate::signature_request::{
    DocumentSubmission, HttpTransport, ProviderConfig, ProviderResponse, RequestBuilder,
    SignatureRequestInput, Transport,
};

/// Builds and sends signature requests.
///
/// Each call is independent: one payload, one `POST`, one response. Nothing
/// is retried.
#[derive(Clone, Debug)]
pub struct SignatureRequestClient<T = HttpTransport> {
    builder: RequestBuilder,
    transport: T,
}

impl SignatureRequestClient<HttpTransport> {
    /// Creates a client that talks HTTP to the configured provider host.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client with a custom HTTP client.
    ///
    /// The configured timeout is not applied to `client`.
    pub fn with_client(config: &ProviderConfig, client: ReqwestClient) -> Result<Self> {
        let transport = HttpTransport::with_client(config, client)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> SignatureRequestClient<T> {
    #[must_use]
    pub fn with_transport(config: &ProviderConfig, transport: T) -> Self {
        Self {
            builder: RequestBuilder::new(config),
            transport,
        }
    }

    #[must_use]
    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the payload for `input` and sends it to the provider.
    ///
    /// Configuration and validation failures are returned before the
    /// transport is touched.
    pub async fn create_signature_request(
        &self,
        input: &SignatureRequestInput,
    ) -> Result<ProviderResponse> {
        let payload = self.builder.build(input)?;
        let credential = self.builder.credential()?;

        self.transport.send(payload, &credential).await
    }

    /// Accepts a submission from the signing portal form.
    pub async fn submit(&self, submission: DocumentSubmission) -> Result<ProviderResponse> {
        #[cfg(feature = "tracing")]
        {
            let signing_type = submission.signing_type()?;
            tracing::info!(
                %signing_type,
                participants = submission.participants.len(),
                "submitting document for signature"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            submission.signing_type()?;
        }

        self.create_signature_request(&submission.into()).await
    }
}
