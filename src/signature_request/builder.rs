use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use secrecy::SecretString;

use crate::Result;
use crate::error::Error;
use crate::signature_request::{
    Credential, FilePart, ProviderConfig, RequestDefaults, SignatureRequestInput,
    SignatureRequestPayload, SignerGroup,
};

/// Standard alphabet, padding optional, as browsers and `FileReader` emit both.
const FILE_CONTENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Assembles provider payloads from caller input.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    api_key: Option<SecretString>,
    defaults: RequestDefaults,
}

impl RequestBuilder {
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            defaults: config.defaults.clone(),
        }
    }

    #[must_use]
    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    pub fn credential(&self) -> Result<Credential> {
        Credential::resolve(self.api_key.as_ref())
    }

    /// Builds the multipart payload for `input`.
    ///
    /// Fails with a configuration error when no API key is set, and with a
    /// validation error for an empty or blank participant list or for file
    /// content that does not decode to at least one byte.
    pub fn build(&self, input: &SignatureRequestInput) -> Result<SignatureRequestPayload> {
        self.credential()?;

        if input.participants.is_empty() {
            return Err(Error::validation("at least one participant is required"));
        }

        let signers = input
            .participants
            .iter()
            .enumerate()
            .map(|(index, participant)| {
                if participant.name.trim().is_empty() || participant.email.trim().is_empty() {
                    return Err(Error::validation(format!(
                        "participant {} requires a name and an email",
                        index + 1
                    )));
                }
                Ok(SignerGroup {
                    email: participant.email.clone(),
                    name: participant.name.clone(),
                    order: index + 1,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let bytes = decode_file_content(&input.file_content)?;

        let payload = SignatureRequestPayload {
            title: self.defaults.title.clone(),
            subject: self.defaults.subject.clone(),
            message: self.defaults.message.clone(),
            test_mode: self.defaults.test_mode,
            signers,
            file: FilePart {
                file_name: self.defaults.file_name.clone(),
                content_type: self.defaults.content_type.clone(),
                bytes,
            },
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            signers = payload.signers.len(),
            file_bytes = payload.file.bytes.len(),
            file_name = %payload.file.file_name,
            test_mode = payload.test_mode,
            "built signature request payload"
        );

        Ok(payload)
    }
}

/// Decodes base64 file content, accepting a `data:<mime>;base64,` prefix.
pub(crate) fn decode_file_content(content: &str) -> Result<Vec<u8>> {
    let content = content.trim();
    let encoded = match content.strip_prefix("data:") {
        Some(rest) => match rest.split_once(',') {
            Some((meta, data)) if meta.ends_with(";base64") => data,
            _ => {
                return Err(Error::validation(
                    "file content is invalid: data url is not base64 encoded",
                ));
            }
        },
        None => content,
    };

    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = FILE_CONTENT_ENGINE.decode(compact)?;
    if bytes.is_empty() {
        return Err(Error::validation("file content is invalid: no bytes decoded"));
    }

    Ok(bytes)
}
