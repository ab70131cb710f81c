use std::env;
use std::fmt;
use std::time::Duration;

use bon::Builder;
use secrecy::{ExposeSecret as _, SecretString};
use url::Url;

use crate::Result;
use crate::error::Error;
use crate::signature_request::RequestDefaults;

pub const API_KEY_VAR: &str = "DROPBOX_SIGN_API_KEY";
pub const API_URL_VAR: &str = "DROPBOX_SIGN_API_URL";
pub const TIMEOUT_VAR: &str = "DROPBOX_SIGN_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider API key. Never printed; `Debug` is redacted.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    /// Wraps an API key, rejecting blank values as missing configuration.
    pub fn new<S: Into<String>>(key: S) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::configuration("Dropbox Sign API key is required"));
        }
        Ok(Self(SecretString::new(key.into_boxed_str())))
    }

    /// Resolves an optional configured key into a credential.
    pub(crate) fn resolve(api_key: Option<&SecretString>) -> Result<Self> {
        match api_key {
            Some(key) => Self::new(key.expose_secret()),
            None => Err(Error::configuration("Dropbox Sign API key is required")),
        }
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Connection settings for the signature provider.
#[non_exhaustive]
#[derive(Builder, Clone, Debug)]
pub struct ProviderConfig {
    #[builder(default = default_host())]
    pub host: Url,
    #[builder(into)]
    pub api_key: Option<SecretString>,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
    #[builder(default)]
    pub defaults: RequestDefaults,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ProviderConfig {
    /// Reads `DROPBOX_SIGN_API_KEY`, `DROPBOX_SIGN_API_URL` and
    /// `DROPBOX_SIGN_TIMEOUT_SECS`.
    ///
    /// A missing key is not an error here; it surfaces as a configuration
    /// error on the first request.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).ok();
        let host = env::var(API_URL_VAR).ok();
        let timeout = env::var(TIMEOUT_VAR).ok();

        Self::from_raw(api_key, host.as_deref(), timeout.as_deref())
    }

    pub fn from_raw(
        api_key: Option<String>,
        host: Option<&str>,
        timeout_secs: Option<&str>,
    ) -> Result<Self> {
        let host = host.map(Url::parse).transpose()?.unwrap_or_else(default_host);
        let timeout = timeout_secs
            .map(|raw| {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| Error::validation(format!("invalid {TIMEOUT_VAR} `{raw}`: {e}")))?;
                if secs == 0 {
                    return Err(Error::validation(format!(
                        "invalid {TIMEOUT_VAR} `{raw}`: timeout must be at least one second"
                    )));
                }
                Ok(Duration::from_secs(secs))
            })
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self::builder()
            .host(host)
            .maybe_api_key(api_key.map(|key| SecretString::new(key.into_boxed_str())))
            .timeout(timeout)
            .build())
    }

    /// Returns the configured key, or a configuration error when it is absent or blank.
    pub fn credential(&self) -> Result<Credential> {
        Credential::resolve(self.api_key.as_ref())
    }

    /// Resolves `path` against the host, treating the host as a directory.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut host = self.host.clone();
        if !host.path().ends_with('/') {
            let dir = format!("{}/", host.path());
            host.set_path(&dir);
        }
        Ok(host.join(path)?)
    }
}

fn default_host() -> Url {
    Url::parse(crate::DEFAULT_HOST).expect("default host is a valid url")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;

    #[test]
    fn endpoint_keeps_version_segment() {
        let config = ProviderConfig::from_raw(None, Some("https://api.hellosign.com/v3"), None)
            .unwrap();

        assert_eq!(
            config.endpoint(crate::SEND_PATH).unwrap().as_str(),
            "https://api.hellosign.com/v3/signature_request/send"
        );
        assert_eq!(
            ProviderConfig::default()
                .endpoint(crate::SEND_PATH)
                .unwrap()
                .as_str(),
            "https://api.hellosign.com/v3/signature_request/send"
        );
    }

    #[test]
    fn missing_or_blank_key_is_configuration_error() {
        let missing = ProviderConfig::default().credential().unwrap_err();
        assert_eq!(missing.kind(), Kind::Configuration);

        let blank = ProviderConfig::from_raw(Some("  ".to_owned()), None, None)
            .unwrap()
            .credential()
            .unwrap_err();
        assert_eq!(blank.kind(), Kind::Configuration);
    }

    #[test]
    fn raw_values_are_validated() {
        let err = ProviderConfig::from_raw(None, Some("not a url"), None).unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);

        let err = ProviderConfig::from_raw(None, None, Some("soon")).unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);

        let err = ProviderConfig::from_raw(None, None, Some("0")).unwrap_err();
        assert_eq!(err.kind(), Kind::Validation);
        assert!(err.to_string().contains("at least one second"));

        let config = ProviderConfig::from_raw(Some("key".to_owned()), None, Some("5")).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        config.credential().unwrap();
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("super-secret").unwrap();
        assert_eq!(format!("{credential:?}"), "Credential([REDACTED])");
    }
}
