use std::path::PathBuf;
use std::time::Duration;

use rustls::pki_types::CertificateDer;

/// Settings for the client-authenticated TLS context
#[derive(Debug, Clone)]
pub struct TlsSettings {
    /// Trust the platform certificate store (webpki roots when it cannot be loaded)
    pub use_platform_roots: bool,
    /// Additional trust anchors, added to the platform roots
    pub extra_roots: Vec<CertificateDer<'static>>,
    /// Upper bound for TCP connect plus TLS handshake
    pub connect_timeout: Duration,
}

/// Everything needed to go from a publish settings file to API calls
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Path of the downloaded `.publishsettings` document
    pub publish_settings: PathBuf,
    /// Subscription the queries run against
    pub subscription_id: String,
    /// Management API base, e.g. `https://management.core.windows.net/`
    pub endpoint: url::Url,
    /// Where the password-less PKCS#12 store is persisted for the run
    pub store_path: PathBuf,
    /// Value of the `x-ms-version` header
    pub api_version: String,
    pub tls: TlsSettings,
}
