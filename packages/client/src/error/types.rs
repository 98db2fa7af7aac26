use std::path::PathBuf;

use super::BoxError;

/// A Result alias where the Err case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the certificate pipeline and the API transport.
///
/// None of these are retried; each carries enough context (file path or URL
/// plus the underlying cause) to diagnose the failing step.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The credentials document could not be read or is not well-formed markup.
    #[error("failed to parse credentials document {path}: {source}")]
    DocumentParse {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The document parsed but holds no `PublishProfile` certificate.
    #[error("no management certificate in {path}: {detail}")]
    CredentialNotFound { path: PathBuf, detail: String },

    /// The certificate attribute is not valid base64.
    #[error("management certificate is not valid base64: {0}")]
    InvalidCertificateEncoding(#[from] base64::DecodeError),

    /// The decoded bytes are not a PKCS#12 container openable with the empty secret.
    #[error("keystore format error: {detail}")]
    KeyStoreFormat {
        detail: String,
        #[source]
        source: Option<openssl::error::ErrorStack>,
    },

    /// Writing, reading or removing the persisted store failed.
    #[error("keystore file {path}: {source}")]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TLS client context could not be built from the store.
    #[error("TLS initialization failed: {0}")]
    TlsInitialization(String),

    /// The endpoint and subscription id do not compose into an https URL.
    #[error("invalid management endpoint {endpoint}: {detail}")]
    InvalidEndpoint { endpoint: String, detail: String },

    /// Writing formatted responses to the output sink failed.
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),

    /// DNS, TCP, TLS handshake or HTTP exchange failed.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: url::Url,
        #[source]
        source: BoxError,
    },
}
