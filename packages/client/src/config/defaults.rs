//! Default values for client configuration

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use super::types::{ClientConfig, TlsSettings};

/// Service-management API base used when no override is configured.
pub const DEFAULT_ENDPOINT: &str = "https://management.core.windows.net/";

/// File name of the transient keystore, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "temp.cert";

/// API version sent in every `x-ms-version` header.
pub const API_VERSION: &str = "2012-03-01";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`DEFAULT_ENDPOINT`], parsed once
static DEFAULT_ENDPOINT_URL: LazyLock<url::Url> = LazyLock::new(|| {
    url::Url::parse(DEFAULT_ENDPOINT)
        .unwrap_or_else(|e| panic!("DEFAULT_ENDPOINT is not an absolute URL: {e}"))
});

impl Default for TlsSettings {
    fn default() -> Self {
        Self {
            use_platform_roots: true,
            extra_roots: Vec::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for `subscription_id` using the default endpoint,
    /// store location and API version.
    pub fn new(publish_settings: impl Into<PathBuf>, subscription_id: impl Into<String>) -> Self {
        Self {
            publish_settings: publish_settings.into(),
            subscription_id: subscription_id.into(),
            endpoint: DEFAULT_ENDPOINT_URL.clone(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            api_version: API_VERSION.to_string(),
            tls: TlsSettings::default(),
        }
    }
}
