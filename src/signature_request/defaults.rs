use bon::Builder;

pub const DEFAULT_TITLE: &str = "Please sign this agreement";
pub const DEFAULT_SUBJECT: &str = "Agreement Signing Request";
pub const DEFAULT_MESSAGE: &str = "Please sign this document to proceed.";
pub const DEFAULT_FILE_NAME: &str = "document.pdf";
pub const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// Fixed values written into every signature request.
///
/// Defaults keep test mode on, so requests are not legally binding until a
/// caller opts out with `test_mode(false)`.
#[non_exhaustive]
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct RequestDefaults {
    #[builder(default = DEFAULT_TITLE.to_owned(), into)]
    pub title: String,
    #[builder(default = DEFAULT_SUBJECT.to_owned(), into)]
    pub subject: String,
    #[builder(default = DEFAULT_MESSAGE.to_owned(), into)]
    pub message: String,
    #[builder(default = true)]
    pub test_mode: bool,
    #[builder(default = DEFAULT_FILE_NAME.to_owned(), into)]
    pub file_name: String,
    #[builder(default = DEFAULT_CONTENT_TYPE.to_owned(), into)]
    pub content_type: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self::builder().build()
    }
}
