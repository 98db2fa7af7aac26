//! Shared fixtures: a throwaway PKI, publish settings documents and a stub
//! management endpoint that demands a client certificate.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use azmgmt_client::config::TlsSettings;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, IsCa,
    Issuer, KeyPair, SanType,
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;

pub const SUBSCRIPTION_ID: &str = "40a031a0-5444-4209-8136-ce768a393840";

pub const HOSTED_SERVICES_BODY: &str = concat!(
    r#"<HostedServices xmlns="http://schemas.microsoft.com/windowsazure">"#,
    r#"<HostedService><ServiceName>web-frontend</ServiceName></HostedService>"#,
    r#"</HostedServices>"#,
    "\n<!-- second line is not part of the response -->"
);

pub const FORBIDDEN_BODY: &str = concat!(
    r#"<Error xmlns="http://schemas.microsoft.com/windowsazure">"#,
    r#"<Code>ForbiddenError</Code>"#,
    r#"<Message>The server failed to authenticate the request.</Message>"#,
    r#"</Error>"#,
    "\r\ntrailer"
);

/// Test CA with a `localhost` server certificate
pub struct Pki {
    pub ca_der: CertificateDer<'static>,
    issuer: Issuer<'static, KeyPair>,
    pub server_cert: CertificateDer<'static>,
    pub server_key: Vec<u8>,
}

/// A client certificate signed by the test CA
pub struct ClientIdentity {
    pub cert_der: Vec<u8>,
    pub key_pkcs8: Vec<u8>,
    /// Empty-secret PKCS#12 holding certificate and key
    pub pkcs12_der: Vec<u8>,
}

impl Pki {
    pub fn new() -> Self {
        let mut params = CertificateParams::new(Vec::<String>::new()).expect("CA params");
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        let mut dn = DistinguishedName::new();
        dn.push(DnType::OrganizationName, "azmgmt tests");
        dn.push(DnType::CommonName, "azmgmt test CA");
        params.distinguished_name = dn;

        let ca_key = KeyPair::generate().expect("CA key");
        let ca_cert = params.clone().self_signed(&ca_key).expect("CA certificate");
        let ca_der = ca_cert.der().clone();
        let issuer = Issuer::new(params, ca_key);

        let mut server_params = CertificateParams::new(Vec::<String>::new()).expect("server params");
        server_params.subject_alt_names =
            vec![SanType::DnsName("localhost".try_into().expect("dns name"))];
        server_params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
        let mut dn = DistinguishedName::new();
        dn.push(DnType::CommonName, "localhost");
        server_params.distinguished_name = dn;
        let server_key = KeyPair::generate().expect("server key");
        let server_cert = server_params
            .signed_by(&server_key, &issuer)
            .expect("server certificate");

        Self {
            ca_der,
            issuer,
            server_cert: server_cert.der().clone(),
            server_key: server_key.serialize_der(),
        }
    }

    pub fn client(&self, common_name: &str) -> ClientIdentity {
        let mut params = CertificateParams::new(Vec::<String>::new()).expect("client params");
        params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ClientAuth];
        let mut dn = DistinguishedName::new();
        dn.push(DnType::CommonName, common_name);
        params.distinguished_name = dn;

        let key = KeyPair::generate().expect("client key");
        let cert = params.signed_by(&key, &self.issuer).expect("client certificate");
        let cert_der = cert.der().to_vec();
        let key_pkcs8 = key.serialize_der();
        let pkcs12_der = empty_secret_pkcs12(&cert_der, &key_pkcs8);

        ClientIdentity {
            cert_der,
            key_pkcs8,
            pkcs12_der,
        }
    }

    /// Trust only the test CA
    pub fn tls_settings(&self) -> TlsSettings {
        TlsSettings::default()
            .with_platform_roots(false)
            .with_extra_root(self.ca_der.clone())
    }
}

pub fn empty_secret_pkcs12(cert_der: &[u8], key_pkcs8: &[u8]) -> Vec<u8> {
    let cert = openssl::x509::X509::from_der(cert_der).expect("certificate DER");
    let key = openssl::pkey::PKey::private_key_from_pkcs8(key_pkcs8).expect("PKCS#8 key");
    let mut builder = openssl::pkcs12::Pkcs12::builder();
    builder.name("management").cert(&cert).pkey(&key);
    builder
        .build2("")
        .expect("build PKCS#12")
        .to_der()
        .expect("encode PKCS#12")
}

/// Container with the certificate but no private key
pub fn certificate_only_pkcs12(cert_der: &[u8]) -> Vec<u8> {
    let cert = openssl::x509::X509::from_der(cert_der).expect("certificate DER");
    let mut builder = openssl::pkcs12::Pkcs12::builder();
    builder.name("management").cert(&cert);
    builder
        .build2("")
        .expect("build PKCS#12")
        .to_der()
        .expect("encode PKCS#12")
}

/// Write a publish settings document whose profile carries `certificate` verbatim.
pub fn write_publish_settings(dir: &Path, certificate: &str) -> PathBuf {
    let path = dir.join("test.publishsettings");
    let doc = format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<PublishData>
  <PublishProfile
    PublishMethod="AzureServiceManagementAPI"
    Url="https://management.core.windows.net/"
    ManagementCertificate="{certificate}">
    <Subscription Id="{SUBSCRIPTION_ID}" Name="Test subscription" />
  </PublishProfile>
</PublishData>
"#
    );
    std::fs::write(&path, doc).expect("write publish settings");
    path
}

pub fn publish_settings_for(dir: &Path, identity: &ClientIdentity) -> PathBuf {
    write_publish_settings(dir, &STANDARD.encode(&identity.pkcs12_der))
}

/// What the stub saw for one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub api_version: Option<String>,
    pub host: Option<String>,
}

/// HTTPS stub answering 200 to the expected client certificate and 403 to
/// any other certificate issued by the test CA.
pub struct StubServer {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

/// TLS server configuration that requires a client certificate from the test CA
fn server_config(pki: &Pki) -> Arc<ServerConfig> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());

    let mut roots = RootCertStore::empty();
    roots.add(pki.ca_der.clone()).expect("CA as client root");
    let verifier = WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider.clone())
        .build()
        .expect("client verifier");

    let config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .expect("protocol versions")
        .with_client_cert_verifier(verifier)
        .with_single_cert(
            vec![pki.server_cert.clone()],
            PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(pki.server_key.clone())),
        )
        .expect("server config");
    Arc::new(config)
}

impl StubServer {
    pub async fn start(pki: &Pki, expected_client_cert: &[u8]) -> Self {
        Self::start_with(pki, expected_client_cert, None).await
    }

    /// Like [`StubServer::start`], but requests whose path ends with
    /// `broken_suffix` are recorded and then have their connection dropped
    /// without a response.
    pub async fn start_failing_on(pki: &Pki, expected_client_cert: &[u8], broken_suffix: &str) -> Self {
        Self::start_with(pki, expected_client_cert, Some(broken_suffix.to_string())).await
    }

    async fn start_with(pki: &Pki, expected_client_cert: &[u8], broken_suffix: Option<String>) -> Self {
        let acceptor = TlsAcceptor::from(server_config(pki));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let expected = Arc::new(expected_client_cert.to_vec());
        let broken_suffix = Arc::new(broken_suffix);

        let recorder = requests.clone();
        let handle = tokio::spawn(async move {
            loop {
                let Ok((tcp, _)) = listener.accept().await else {
                    break;
                };
                let acceptor = acceptor.clone();
                let expected = expected.clone();
                let recorder = recorder.clone();
                let broken_suffix = broken_suffix.clone();
                tokio::spawn(async move {
                    let Ok(tls) = acceptor.accept(tcp).await else {
                        return;
                    };
                    let authorized = tls
                        .get_ref()
                        .1
                        .peer_certificates()
                        .and_then(|certs| certs.first())
                        .is_some_and(|cert| cert.as_ref() == expected.as_slice());

                    let service = service_fn(move |req: Request<Incoming>| {
                        let recorder = recorder.clone();
                        let broken_suffix = broken_suffix.clone();
                        async move {
                            let header = |name: &str| {
                                req.headers()
                                    .get(name)
                                    .and_then(|v| v.to_str().ok())
                                    .map(str::to_string)
                            };
                            let path = req.uri().path().to_string();
                            recorder.lock().expect("recorder lock").push(RecordedRequest {
                                method: req.method().to_string(),
                                path: path.clone(),
                                api_version: header("x-ms-version"),
                                host: header("host"),
                            });

                            if broken_suffix.as_deref().is_some_and(|suffix| path.ends_with(suffix)) {
                                return Err(std::io::Error::other("connection dropped by stub"));
                            }

                            let (status, body) = if authorized {
                                (StatusCode::OK, HOSTED_SERVICES_BODY)
                            } else {
                                (StatusCode::FORBIDDEN, FORBIDDEN_BODY)
                            };
                            let response = Response::builder()
                                .status(status)
                                .header("content-type", "application/xml; charset=utf-8")
                                .body(Full::new(Bytes::from_static(body.as_bytes())))
                                .expect("stub response");
                            Ok(response)
                        }
                    });

                    let _ = hyper::server::conn::http1::Builder::new()
                        .serve_connection(TokioIo::new(tls), service)
                        .await;
                });
            }
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Base URL using the `localhost` name the server certificate is issued for
    pub fn endpoint(&self) -> url::Url {
        url::Url::parse(&format!("https://localhost:{}/", self.addr.port())).expect("stub url")
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("recorder lock").clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// mTLS endpoint that sends the status line, headers and the first body line,
/// then keeps the connection open without sending the rest of the body.
pub struct StallingServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl StallingServer {
    pub const FIRST_LINE: &'static str = "<HostedServices/>";

    pub async fn start(pki: &Pki) -> Self {
        let acceptor = TlsAcceptor::from(server_config(pki));
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stalling server");
        let addr = listener.local_addr().expect("stalling server address");

        let handle = tokio::spawn(async move {
            loop {
                let Ok((tcp, _)) = listener.accept().await else {
                    break;
                };
                let acceptor = acceptor.clone();
                tokio::spawn(async move {
                    let Ok(mut tls) = acceptor.accept(tcp).await else {
                        return;
                    };

                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match tls.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }

                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/xml\r\ncontent-length: 1048576\r\n\r\n{}\n",
                        Self::FIRST_LINE
                    );
                    if tls.write_all(response.as_bytes()).await.is_err() || tls.flush().await.is_err() {
                        return;
                    }
                    // the remaining body never arrives
                    tokio::time::sleep(std::time::Duration::from_secs(300)).await;
                    drop(tls);
                });
            }
        });

        Self { addr, handle }
    }

    pub fn endpoint(&self) -> url::Url {
        url::Url::parse(&format!("https://localhost:{}/", self.addr.port())).expect("stalling url")
    }
}

impl Drop for StallingServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
