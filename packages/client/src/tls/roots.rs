//! Server trust anchors

use rustls::RootCertStore;

use crate::config::TlsSettings;
use crate::error::{self, Result};

/// Root store for verifying the management endpoint.
///
/// Platform roots come first, falling back to the bundled webpki roots when
/// the platform store reports errors. Extra roots are added on top; they never
/// replace the defaults.
pub(crate) fn build_root_store(settings: &TlsSettings) -> Result<RootCertStore> {
    let mut root_store = RootCertStore::empty();

    if settings.use_platform_roots {
        let cert_result = rustls_native_certs::load_native_certs();
        for cert in cert_result.certs {
            if let Err(e) = root_store.add(cert) {
                tracing::warn!("Failed to add system certificate: {}", e);
            }
        }

        if !cert_result.errors.is_empty() || root_store.is_empty() {
            for err in &cert_result.errors {
                tracing::warn!("Certificate load error: {}", err);
            }
            root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        }

        tracing::debug!("Loaded {} platform trust anchors", root_store.len());
    }

    for cert in &settings.extra_roots {
        root_store
            .add(cert.clone())
            .map_err(|e| error::tls_init(format!("invalid extra trust anchor: {e}")))?;
    }

    if root_store.is_empty() {
        return Err(error::tls_init(
            "no trust anchors: platform roots disabled and no extra roots given",
        ));
    }

    Ok(root_store)
}
