use std::path::Path;

use super::BoxError;
use super::types::Error;

/// Creates an `Error` for an unreadable or malformed credentials document.
pub fn document_parse<E: Into<BoxError>>(path: &Path, e: E) -> Error {
    Error::DocumentParse {
        path: path.to_path_buf(),
        source: e.into(),
    }
}

/// Creates an `Error` for a document without a usable certificate attribute.
pub fn credential_not_found(path: &Path, detail: impl Into<String>) -> Error {
    Error::CredentialNotFound {
        path: path.to_path_buf(),
        detail: detail.into(),
    }
}

/// Creates an `Error` for a PKCS#12 container that cannot be opened or encoded.
pub fn keystore_format(
    detail: impl Into<String>,
    source: Option<openssl::error::ErrorStack>,
) -> Error {
    Error::KeyStoreFormat {
        detail: detail.into(),
        source,
    }
}

/// Creates an `Error` for a failed operation on the persisted store.
pub fn store_io(path: &Path, source: std::io::Error) -> Error {
    Error::StoreIo {
        path: path.to_path_buf(),
        source,
    }
}

/// Creates an `Error` for a TLS context that cannot be built.
pub fn tls_init(detail: impl std::fmt::Display) -> Error {
    Error::TlsInitialization(detail.to_string())
}

/// Creates an `Error` for an endpoint that is not a usable https URL.
pub fn invalid_endpoint(endpoint: impl Into<String>, detail: impl std::fmt::Display) -> Error {
    Error::InvalidEndpoint {
        endpoint: endpoint.into(),
        detail: detail.to_string(),
    }
}

/// Creates an `Error` for a failed write of formatted output.
pub fn output(source: std::io::Error) -> Error {
    Error::Output(source)
}

/// Creates an `Error` for a failed exchange with `url`.
pub fn transport<E: Into<BoxError>>(url: &url::Url, e: E) -> Error {
    Error::Transport {
        url: url.clone(),
        source: e.into(),
    }
}
