//! Builder methods for client configuration

use std::path::PathBuf;
use std::time::Duration;

use rustls::pki_types::CertificateDer;

use super::types::{ClientConfig, TlsSettings};
use crate::error::{self, Result};

impl TlsSettings {
    /// Add trust anchors from PEM text (one or more `CERTIFICATE` blocks).
    ///
    /// Blocks with any other tag are skipped. Fails with
    /// [`Error::TlsInitialization`](crate::Error::TlsInitialization) when the
    /// text holds no certificate at all.
    pub fn with_extra_roots_pem(mut self, pem_text: &str) -> Result<Self> {
        let blocks = pem::parse_many(pem_text).map_err(error::tls_init)?;
        let before = self.extra_roots.len();
        for block in blocks {
            if block.tag() == "CERTIFICATE" {
                self.extra_roots
                    .push(CertificateDer::from(block.contents().to_vec()));
            } else {
                tracing::warn!("Ignoring PEM block '{}' in trust anchor file", block.tag());
            }
        }
        if self.extra_roots.len() == before {
            return Err(error::tls_init("no CERTIFICATE block in trust anchor PEM"));
        }
        Ok(self)
    }

    /// Add one DER-encoded trust anchor.
    #[must_use]
    pub fn with_extra_root(mut self, der: CertificateDer<'static>) -> Self {
        self.extra_roots.push(der);
        self
    }

    /// Enable or disable the platform trust store.
    #[must_use]
    pub fn with_platform_roots(mut self, enabled: bool) -> Self {
        self.use_platform_roots = enabled;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl ClientConfig {
    /// Override the management API base.
    ///
    /// A trailing `/` is added when missing so that the subscription id lands
    /// as its own path segment.
    #[must_use]
    pub fn with_endpoint(mut self, mut endpoint: url::Url) -> Self {
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        self.endpoint = endpoint;
        self
    }

    /// Persist the transient keystore somewhere other than `temp.cert`.
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    #[must_use]
    pub fn with_tls(mut self, tls: TlsSettings) -> Self {
        self.tls = tls;
        self
    }
}
