use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::Result;
use crate::error::Error;

/// Opaque body returned by the provider on success.
pub type ProviderResponse = serde_json::Value;

/// A person asked to sign. Position in the participant list is the signing order.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

impl Participant {
    #[must_use]
    pub fn new<N: Into<String>, E: Into<String>>(name: N, email: E) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Input for a single signature request.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignatureRequestInput {
    pub participants: Vec<Participant>,
    /// Base64-encoded document bytes, optionally as a `data:` URL.
    pub file_content: String,
}

impl SignatureRequestInput {
    #[must_use]
    pub fn new(participants: Vec<Participant>, file_content: String) -> Self {
        Self {
            participants,
            file_content,
        }
    }
}

/// Signing flow requested by the web form.
///
/// Parsed and validated but not forwarded to the provider.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum SigningType {
    #[default]
    Regular,
    Notary,
}

impl SigningType {
    pub fn parse(value: &str) -> Result<SigningType> {
        match value.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(SigningType::Regular),
            "notary" => Ok(SigningType::Notary),
            other => Err(Error::validation(format!(
                "invalid signing_type `{other}`; expected one of: regular|notary"
            ))),
        }
    }
}

impl FromStr for SigningType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SigningType::parse(s)
    }
}

/// Document submission as posted by the signing portal form.
///
/// Only `participants` and `base64_content` reach the provider. The form's
/// title, subject and message are accepted for compatibility and ignored in
/// favour of the configured [`RequestDefaults`](super::RequestDefaults).
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSubmission {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub signing_type: Option<String>,
    pub base64_content: String,
}

impl DocumentSubmission {
    pub fn signing_type(&self) -> Result<SigningType> {
        self.signing_type
            .as_deref()
            .map_or(Ok(SigningType::default()), SigningType::parse)
    }
}

impl From<DocumentSubmission> for SignatureRequestInput {
    fn from(submission: DocumentSubmission) -> Self {
        Self::new(submission.participants, submission.base64_content)
    }
}

/// Fields describing one signer inside the request payload.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerGroup {
    pub email: String,
    pub name: String,
    /// 1-based signing order.
    pub order: usize,
}

#[non_exhaustive]
#[derive(Clone, Eq, PartialEq)]
pub struct FilePart {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Multipart submission ready to be sent to the provider.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignatureRequestPayload {
    pub title: String,
    pub subject: String,
    pub message: String,
    pub test_mode: bool,
    pub signers: Vec<SignerGroup>,
    pub file: FilePart,
}

impl SignatureRequestPayload {
    /// Form field name of the single file part.
    pub const FILE_FIELD: &'static str = "file[0]";

    /// Text fields in the order they are written to the multipart body.
    #[must_use]
    pub fn text_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("title".to_owned(), self.title.clone()),
            ("subject".to_owned(), self.subject.clone()),
            ("message".to_owned(), self.message.clone()),
            (
                "test_mode".to_owned(),
                if self.test_mode { "1" } else { "0" }.to_owned(),
            ),
        ];

        for (index, signer) in self.signers.iter().enumerate() {
            fields.push((
                format!("signers[{index}][email_address]"),
                signer.email.clone(),
            ));
            fields.push((format!("signers[{index}][name]"), signer.name.clone()));
            fields.push((format!("signers[{index}][order]"), signer.order.to_string()));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    #[test]
    fn signing_type_parses_case_insensitively() {
        assert_eq!(SigningType::parse(" Notary ").unwrap(), SigningType::Notary);
        assert_eq!("REGULAR".parse::<SigningType>().unwrap(), SigningType::Regular);
        assert_eq!(SigningType::Notary.to_string(), "notary");

        let err = SigningType::parse("witness").unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);
    }

    #[test]
    fn submission_deserializes_form_body() {
        let submission: DocumentSubmission = serde_json::from_value(serde_json::json!({
            "title": "Document Title",
            "subject": "Document Subject",
            "message": "Please sign this document.",
            "participants": [{ "name": "Alice", "email": "a@x.com" }],
            "signingType": "notary",
            "base64Content": "JVBERi0=",
        }))
        .unwrap();

        assert_eq!(submission.signing_type().unwrap(), SigningType::Notary);
        let input = SignatureRequestInput::from(submission);
        assert_eq!(input.participants, vec![Participant::new("Alice", "a@x.com")]);
        assert_eq!(input.file_content, "JVBERi0=");
    }

    #[test]
    fn missing_signing_type_defaults_to_regular() {
        let submission: DocumentSubmission = serde_json::from_value(serde_json::json!({
            "participants": [],
            "base64Content": "",
        }))
        .unwrap();

        assert_eq!(submission.signing_type().unwrap(), SigningType::Regular);
    }

    #[test]
    fn text_fields_use_provider_names() {
        let payload = SignatureRequestPayload {
            title: "t".to_owned(),
            subject: "s".to_owned(),
            message: "m".to_owned(),
            test_mode: false,
            signers: vec![SignerGroup {
                email: "a@x.com".to_owned(),
                name: "Alice".to_owned(),
                order: 1,
            }],
            file: FilePart {
                file_name: "document.pdf".to_owned(),
                content_type: "application/pdf".to_owned(),
                bytes: vec![1, 2, 3],
            },
        };

        let fields = payload.text_fields();
        assert_eq!(fields[3], ("test_mode".to_owned(), "0".to_owned()));
        assert_eq!(
            &fields[4..],
            &[
                ("signers[0][email_address]".to_owned(), "a@x.com".to_owned()),
                ("signers[0][name]".to_owned(), "Alice".to_owned()),
                ("signers[0][order]".to_owned(), "1".to_owned()),
            ]
        );
        assert_eq!(
            format!("{:?}", payload.file),
            r#"FilePart { file_name: "document.pdf", content_type: "application/pdf", len: 3, .. }"#
        );
    }
}
