use async_trait::async_trait;
use base64::Engine as _;
use base64::prelude::BASE64_STANDARD;
use reqwest::Client as ReqwestClient;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Request, StatusCode};
use serde_json::Value;
use url::Url;

use crate::Result;
use crate::error::Error;
use crate::signature_request::{Credential, ProviderConfig, ProviderResponse, SignatureRequestPayload};

/// Sends a built payload to the provider.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        payload: SignatureRequestPayload,
        credential: &Credential,
    ) -> Result<ProviderResponse>;
}

/// Transport backed by a `reqwest` client posting to `signature_request/send`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    endpoint: Url,
    client: ReqwestClient,
}

impl HttpTransport {
    /// Creates a transport whose client enforces the configured timeout.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(config.timeout).build()?;
        Self::with_client(config, client)
    }

    /// Creates a transport with a custom HTTP client.
    pub fn with_client(config: &ProviderConfig, client: ReqwestClient) -> Result<Self> {
        Ok(Self {
            endpoint: config.endpoint(crate::SEND_PATH)?,
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        payload: SignatureRequestPayload,
        credential: &Credential,
    ) -> Result<ProviderResponse> {
        let request = self
            .client
            .request(Method::POST, self.endpoint.clone())
            .header(AUTHORIZATION, basic_auth_header(credential)?)
            .multipart(into_form(payload)?)
            .build()?;

        execute(&self.client, request).await
    }
}

/// `Basic base64("<key>:")`, marked sensitive so it is never logged by `reqwest`.
pub(crate) fn basic_auth_header(credential: &Credential) -> Result<HeaderValue> {
    let encoded = BASE64_STANDARD.encode(format!("{}:", credential.expose()));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| Error::configuration(format!("invalid API key: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}

fn into_form(payload: SignatureRequestPayload) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in payload.text_fields() {
        form = form.text(name, value);
    }

    let file = payload.file;
    let part = Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)?;

    Ok(form.part(SignatureRequestPayload::FILE_FIELD, part))
}

async fn execute(client: &ReqwestClient, request: Request) -> Result<ProviderResponse> {
    #[cfg(feature = "tracing")]
    let (method, path) = (request.method().clone(), request.url().path().to_owned());

    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(%method, %path, error = %e, "signature request transport failure");
            return Err(Error::provider(None, e.to_string()));
        }
    };

    let status_code = response.status();
    if !status_code.is_success() {
        let body = response.text().await;

        #[cfg(feature = "tracing")]
        {
            if let Err(e) = &body {
                tracing::warn!(
                    %method,
                    %path,
                    status = status_code.as_u16(),
                    error = %e,
                    "failed to read provider error body"
                );
            }
        }

        let message = body
            .ok()
            .and_then(|body| error_message(&body))
            .unwrap_or_else(|| fallback_message(status_code));

        #[cfg(feature = "tracing")]
        tracing::warn!(
            %method,
            %path,
            status = status_code.as_u16(),
            %message,
            "signature provider rejected request"
        );

        return Err(Error::provider(Some(status_code), message));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(%method, %path, status = status_code.as_u16(), "signature request accepted");

    response
        .json::<Value>()
        .await
        .map_err(|e| Error::provider(Some(status_code), e.to_string()))
}

/// Extracts a non-empty message from the provider's `error` field.
///
/// Dropbox Sign nests the text under `error.error_msg`; a plain string is
/// used as is. Anything else, including empty strings, yields `None`.
fn error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    let message = match value.get("error")? {
        Value::String(message) => message.as_str(),
        Value::Object(fields) => fields.get("error_msg").and_then(Value::as_str)?,
        _ => return None,
    };

    (!message.is_empty()).then(|| message.to_owned())
}

fn fallback_message(status_code: StatusCode) -> String {
    format!("request failed with status code {}", status_code.as_u16())
}
