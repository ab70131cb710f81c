use std::error::Error as StdError;
use std::fmt;

use reqwest::StatusCode;

/// Broad category of an [`Error`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// A required configuration value (the provider credential) is missing.
    Configuration,
    /// Caller-supplied input was rejected before any network call.
    Validation,
    /// The provider answered with a non-success status or could not be reached.
    Provider,
    /// The HTTP client or request could not be constructed.
    Internal,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Configuration => "configuration",
            Kind::Validation => "validation",
            Kind::Provider => "provider",
            Kind::Internal => "internal",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    #[must_use]
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    #[must_use]
    pub fn configuration<S: Into<String>>(reason: S) -> Self {
        Configuration {
            reason: reason.into(),
        }
        .into()
    }

    #[must_use]
    pub fn validation<S: Into<String>>(reason: S) -> Self {
        Validation {
            reason: reason.into(),
        }
        .into()
    }

    #[must_use]
    pub fn provider<S: Into<String>>(status_code: Option<StatusCode>, message: S) -> Self {
        Provider {
            status_code,
            message: message.into(),
        }
        .into()
    }

    /// Human-readable message carried by a [`Kind::Provider`] error.
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        self.downcast_ref::<Provider>().map(|p| p.message.as_str())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{}: {}", self.kind, src),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Configuration {
    pub reason: String,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl StdError for Configuration {}

#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl StdError for Validation {}

/// Failure reported by, or while reaching, the signature provider.
///
/// `status_code` is `None` when no response was received.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Provider {
    pub status_code: Option<StatusCode>,
    pub message: String,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to send signature request: {}", self.message)
    }
}

impl StdError for Provider {}

impl From<Configuration> for Error {
    fn from(err: Configuration) -> Self {
        Error::with_source(Kind::Configuration, err)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<Provider> for Error {
    fn from(err: Provider) -> Self {
        Error::with_source(Kind::Provider, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::validation(format!("invalid provider url: {err}"))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::validation(format!("file content is invalid: {err}"))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::with_source(Kind::Internal, err)
        } else {
            Error::provider(err.status(), err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_exposes_message() {
        let err = Error::provider(Some(StatusCode::BAD_REQUEST), "Invalid signer");

        assert_eq!(err.kind(), Kind::Provider);
        assert_eq!(err.provider_message(), Some("Invalid signer"));
        assert_eq!(
            err.to_string(),
            "provider: failed to send signature request: Invalid signer"
        );
    }

    #[test]
    fn validation_error_downcasts() {
        let err = Error::validation("file content is invalid");

        assert_eq!(err.kind(), Kind::Validation);
        assert_eq!(err.provider_message(), None);
        let inner = err.downcast_ref::<Validation>().unwrap();
        assert_eq!(inner.reason, "file content is invalid");
    }
}
