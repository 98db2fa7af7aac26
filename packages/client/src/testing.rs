//! Test fixtures: self-signed identities packed as empty-secret PKCS#12

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::PKey;
use openssl::x509::X509;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};

use crate::credential::Credential;

pub(crate) struct Identity {
    pub cert_der: Vec<u8>,
    pub key_pkcs8: Vec<u8>,
    pub pkcs12_der: Vec<u8>,
}

/// Self-signed ECDSA P-256 client certificate with common name `cn`.
pub(crate) fn client_identity(cn: &str) -> Identity {
    let mut params = CertificateParams::new(Vec::<String>::new()).expect("params");
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, cn);
    params.distinguished_name = dn;

    let key_pair = KeyPair::generate().expect("key pair");
    let cert = params.self_signed(&key_pair).expect("self-signed certificate");

    let mut identity = Identity {
        cert_der: cert.der().to_vec(),
        key_pkcs8: key_pair.serialize_der(),
        pkcs12_der: Vec::new(),
    };
    identity.pkcs12_der = pkcs12_with_secret(&identity, "");
    identity
}

pub(crate) fn pkcs12_with_secret(identity: &Identity, secret: &str) -> Vec<u8> {
    let cert = X509::from_der(&identity.cert_der).expect("certificate DER");
    let key = PKey::private_key_from_pkcs8(&identity.key_pkcs8).expect("PKCS#8 key");
    let mut builder = Pkcs12::builder();
    builder.name("fixture").cert(&cert).pkey(&key);
    builder
        .build2(secret)
        .expect("build PKCS#12")
        .to_der()
        .expect("encode PKCS#12")
}

pub(crate) fn certificate_only_pkcs12(identity: &Identity) -> Vec<u8> {
    let cert = X509::from_der(&identity.cert_der).expect("certificate DER");
    let mut builder = Pkcs12::builder();
    builder.name("fixture").cert(&cert);
    builder
        .build2("")
        .expect("build PKCS#12")
        .to_der()
        .expect("encode PKCS#12")
}

pub(crate) fn credential_for(pkcs12_der: &[u8]) -> Credential {
    credential_from_text(&STANDARD.encode(pkcs12_der))
}

pub(crate) fn credential_from_text(certificate: &str) -> Credential {
    let doc = format!(
        r#"<PublishData><PublishProfile PublishMethod="AzureServiceManagementAPI" Url="https://management.core.windows.net/" ManagementCertificate="{certificate}"><Subscription Id="sub-1" Name="Fixture"/></PublishProfile></PublishData>"#
    );
    Credential::from_document(&doc, "fixture.publishsettings").expect("fixture document")
}
