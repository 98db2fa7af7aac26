use std::sync::Arc;
use std::time::Duration;

use rustls::ClientConfig;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;

use super::{material, roots};
use crate::config::TlsSettings;
use crate::error::{self, Result};
use crate::keystore::{KeyMaterial, ProvisionedStore};

/// Builds [`TlsClientContext`]s from provisioned keystores
#[derive(Debug, Clone)]
pub struct TlsContextFactory {
    settings: TlsSettings,
    provider: Arc<CryptoProvider>,
}

impl TlsContextFactory {
    /// Factory using the ring crypto provider.
    pub fn new(settings: TlsSettings) -> Self {
        Self::with_provider(settings, Arc::new(rustls::crypto::ring::default_provider()))
    }

    pub fn with_provider(settings: TlsSettings, provider: Arc<CryptoProvider>) -> Self {
        Self { settings, provider }
    }

    /// Client context presenting the store's certificate.
    ///
    /// Fails with [`Error::TlsInitialization`](crate::Error::TlsInitialization)
    /// when the store has no private key or the key is unusable with the
    /// certificate.
    pub fn build(&self, store: &ProvisionedStore) -> Result<TlsClientContext> {
        self.build_from_material(store.material())
    }

    pub fn build_from_material(&self, key_material: &KeyMaterial) -> Result<TlsClientContext> {
        let chain = material::certificate_chain(key_material)?;
        let key = material::private_key(key_material)?;
        let root_store = roots::build_root_store(&self.settings)?;

        let mut config = ClientConfig::builder_with_provider(self.provider.clone())
            .with_safe_default_protocol_versions()
            .map_err(error::tls_init)?
            .with_root_certificates(root_store)
            .with_client_auth_cert(chain.clone(), key)
            .map_err(|e| error::tls_init(format!("client certificate rejected: {e}")))?;
        config.alpn_protocols = vec![b"http/1.1".to_vec()];

        tracing::debug!(
            "TLS client context ready ({} certificate(s) in client chain)",
            chain.len()
        );

        Ok(TlsClientContext {
            config: Arc::new(config),
            connect_timeout: self.settings.connect_timeout,
            client_certificate: chain.into_iter().next(),
        })
    }
}

/// Reusable, immutable handle that opens client-authenticated connections.
///
/// Cloning shares the underlying configuration.
#[derive(Clone)]
pub struct TlsClientContext {
    config: Arc<ClientConfig>,
    connect_timeout: Duration,
    client_certificate: Option<CertificateDer<'static>>,
}

impl TlsClientContext {
    /// The rustls configuration, for transports that drive TLS themselves
    pub fn client_config(&self) -> Arc<ClientConfig> {
        self.config.clone()
    }

    /// DER of the certificate presented to servers
    pub fn client_certificate(&self) -> Option<&CertificateDer<'static>> {
        self.client_certificate.as_ref()
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Open a TLS connection to the host and port of `url`.
    ///
    /// TCP connect and handshake together are bounded by the connect timeout.
    /// Any failure is reported as [`Error::Transport`](crate::Error::Transport).
    pub async fn connect(&self, url: &url::Url) -> Result<TlsStream<TcpStream>> {
        let host = url
            .host_str()
            .ok_or_else(|| error::transport(url, "URL has no host"))?;
        // IPv6 literals come bracketed from the URL
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let port = url
            .port_or_known_default()
            .ok_or_else(|| error::transport(url, "URL has no port"))?;
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| error::transport(url, format!("invalid server name '{host}': {e}")))?;

        tracing::debug!("Opening TLS connection to {}:{}", host, port);
        let connector = TlsConnector::from(self.config.clone());

        let handshake = async {
            let tcp_stream = TcpStream::connect((host, port)).await?;
            tcp_stream.set_nodelay(true)?;
            connector.connect(server_name, tcp_stream).await
        };

        let tls_stream = tokio::time::timeout(self.connect_timeout, handshake)
            .await
            .map_err(|elapsed| error::transport(url, elapsed))?
            .map_err(|e| error::transport(url, e))?;

        tracing::debug!("TLS connection established to {}:{}", host, port);
        Ok(tls_stream)
    }
}

impl std::fmt::Debug for TlsClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsClientContext")
            .field("connect_timeout", &self.connect_timeout)
            .field("has_client_certificate", &self.client_certificate.is_some())
            .finish()
    }
}
