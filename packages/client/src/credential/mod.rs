//! Management certificate extraction from `.publishsettings` documents
//!
//! The document is treated as generic markup: find the `PublishProfile`
//! element and read its `ManagementCertificate` attribute. The value is not
//! validated here; base64 and PKCS#12 problems surface during provisioning.

mod metadata;

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

pub use metadata::{ProfileMetadata, SubscriptionEntry};

use crate::error::{self, Result};

const PROFILE_ELEMENT: &str = "PublishProfile";
const SUBSCRIPTION_ELEMENT: &str = "Subscription";
const CERTIFICATE_ATTRIBUTE: &str = "ManagementCertificate";

/// Raw base64 management certificate plus what the document says about it.
///
/// The certificate text is wiped from memory when the credential is dropped.
pub struct Credential {
    certificate: Zeroizing<String>,
    metadata: ProfileMetadata,
    origin: PathBuf,
}

impl Credential {
    /// Parse an in-memory credentials document. `origin` is only used for
    /// error messages and logging.
    pub fn from_document(text: &str, origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let doc = roxmltree::Document::parse(text).map_err(|e| error::document_parse(&origin, e))?;

        let profile = doc
            .descendants()
            .find(|node| node.has_tag_name(PROFILE_ELEMENT))
            .ok_or_else(|| {
                error::credential_not_found(&origin, format!("no <{PROFILE_ELEMENT}> element"))
            })?;

        // Schema 2.0 documents moved the attribute onto each <Subscription>.
        let certificate = profile
            .attribute(CERTIFICATE_ATTRIBUTE)
            .or_else(|| {
                profile
                    .children()
                    .filter(|node| node.has_tag_name(SUBSCRIPTION_ELEMENT))
                    .find_map(|node| node.attribute(CERTIFICATE_ATTRIBUTE))
            })
            .ok_or_else(|| {
                error::credential_not_found(
                    &origin,
                    format!("<{PROFILE_ELEMENT}> has no {CERTIFICATE_ATTRIBUTE} attribute"),
                )
            })?;

        let metadata = ProfileMetadata::from_profile(&profile);
        tracing::debug!(
            "Read {} characters of management certificate from {}",
            certificate.len(),
            origin.display()
        );

        Ok(Self {
            certificate: Zeroizing::new(certificate.to_string()),
            metadata,
            origin,
        })
    }

    /// The base64 text exactly as it appeared in the document
    pub fn certificate_base64(&self) -> &str {
        &self.certificate
    }

    pub fn metadata(&self) -> &ProfileMetadata {
        &self.metadata
    }

    /// Path of the document this credential was read from
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("certificate", &format_args!("<{} base64 chars>", self.certificate.len()))
            .field("metadata", &self.metadata)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Read the credentials document at `path` and return its management certificate.
///
/// Fails with [`Error::DocumentParse`](crate::Error::DocumentParse) when the file
/// cannot be read or is not well-formed markup, and with
/// [`Error::CredentialNotFound`](crate::Error::CredentialNotFound) when the
/// profile element or its certificate attribute is missing.
pub fn extract_credential(path: impl AsRef<Path>) -> Result<Credential> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| error::document_parse(path, e))?;
    let credential = Credential::from_document(&text, path)?;
    tracing::info!(
        "Loaded management certificate from {} ({} subscription entries)",
        path.display(),
        credential.metadata().subscriptions.len()
    );
    Ok(credential)
}
