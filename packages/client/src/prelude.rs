//! Types needed to go from a publish settings file to formatted API output

pub use crate::client::{ApiClient, ApiEndpoint, ApiResponse};
pub use crate::config::{ClientConfig, TlsSettings};
pub use crate::credential::{Credential, ProfileMetadata, extract_credential};
pub use crate::error::{Error, Result};
pub use crate::format::{RawFormatter, ResponseFormatter, XmlFormatter};
pub use crate::keystore::{ProvisionedStore, provision};
pub use crate::tls::{TlsClientContext, TlsContextFactory};

// HTTP standard types from http crate
pub use ::http::StatusCode;

// URL handling
pub use url::Url;
