//! Empty-secret PKCS#12 decoding and encoding
//!
//! OpenSSL's `PKCS12_parse` tries both encodings of an empty password (the
//! zero-length BMPString and the absent password) when given `""`. Toolkits
//! that only try one of them reject the same container with an unrelated
//! decryption error.

use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::provider::Provider;
use openssl::stack::Stack;
use openssl::x509::X509;

use crate::error::{self, Result};

/// Protection secret of every container read or written here.
pub const EMPTY_SECRET: &str = "";

const FRIENDLY_NAME: &str = "management-certificate";

/// Certificate and key material held by a keystore
#[derive(Clone)]
pub struct KeyMaterial {
    /// Leaf certificate presented to the server
    pub certificate: X509,
    /// `None` when the container only carries certificates
    pub private_key: Option<PKey<Private>>,
    /// Further certificates bundled with the leaf
    pub chain: Vec<X509>,
}

impl KeyMaterial {
    /// Whether both hold the same certificates and the same private key.
    pub fn matches(&self, other: &KeyMaterial) -> Result<bool> {
        if der(&self.certificate)? != der(&other.certificate)? {
            return Ok(false);
        }
        if self.chain.len() != other.chain.len() {
            return Ok(false);
        }
        for (a, b) in self.chain.iter().zip(&other.chain) {
            if der(a)? != der(b)? {
                return Ok(false);
            }
        }
        match (&self.private_key, &other.private_key) {
            (None, None) => Ok(true),
            (Some(a), Some(b)) => {
                let same_key = a.public_eq(b)
                    && pkcs8(a)?.as_slice() == pkcs8(b)?.as_slice();
                Ok(same_key)
            }
            _ => Ok(false),
        }
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("certificate", &self.certificate.subject_name())
            .field("has_private_key", &self.private_key.is_some())
            .field("chain_len", &self.chain.len())
            .finish()
    }
}

/// Open a DER PKCS#12 container protected by the empty secret.
pub fn open(der_bytes: &[u8]) -> Result<KeyMaterial> {
    let container = Pkcs12::from_der(der_bytes)
        .map_err(|e| error::keystore_format("bytes are not a PKCS#12 container", Some(e)))?;

    let parsed = match container.parse2(EMPTY_SECRET) {
        Ok(parsed) => parsed,
        Err(first) => {
            // Containers exported by older tooling use RC2/3DES, which OpenSSL 3
            // only decrypts with the legacy provider. It stays loaded for this
            // retry only.
            tracing::debug!("PKCS#12 open failed ({first}); retrying with legacy algorithms");
            let _legacy = Provider::try_load(None, "legacy", true).map_err(|_| {
                error::keystore_format(
                    "container cannot be opened with the empty secret",
                    Some(first.clone()),
                )
            })?;
            container.parse2(EMPTY_SECRET).map_err(|_| {
                error::keystore_format(
                    "container cannot be opened with the empty secret",
                    Some(first),
                )
            })?
        }
    };

    let mut chain: Vec<X509> = parsed
        .ca
        .map(|stack| stack.into_iter().collect())
        .unwrap_or_default();

    // Without a private key OpenSSL reports every certificate under `ca`.
    let certificate = match parsed.cert {
        Some(cert) => cert,
        None if !chain.is_empty() => chain.remove(0),
        None => return Err(error::keystore_format("container holds no certificate", None)),
    };

    if parsed.pkey.is_none() {
        tracing::warn!("PKCS#12 container holds a certificate but no private key");
    }

    Ok(KeyMaterial {
        certificate,
        private_key: parsed.pkey,
        chain,
    })
}

/// Encode `material` as a DER PKCS#12 container protected by the empty secret.
pub fn encode(material: &KeyMaterial) -> Result<Vec<u8>> {
    let mut builder = Pkcs12::builder();
    builder.name(FRIENDLY_NAME).cert(&material.certificate);
    if let Some(key) = &material.private_key {
        builder.pkey(key);
    }
    if !material.chain.is_empty() {
        let mut stack = Stack::new().map_err(|e| error::keystore_format("allocation failed", Some(e)))?;
        for cert in &material.chain {
            stack
                .push(cert.clone())
                .map_err(|e| error::keystore_format("allocation failed", Some(e)))?;
        }
        builder.ca(stack);
    }

    let container = builder
        .build2(EMPTY_SECRET)
        .map_err(|e| error::keystore_format("failed to build PKCS#12 container", Some(e)))?;
    container
        .to_der()
        .map_err(|e| error::keystore_format("failed to encode PKCS#12 container", Some(e)))
}

fn der(cert: &X509) -> Result<Vec<u8>> {
    cert.to_der()
        .map_err(|e| error::keystore_format("failed to encode certificate", Some(e)))
}

fn pkcs8(key: &PKey<Private>) -> Result<zeroize::Zeroizing<Vec<u8>>> {
    key.private_key_to_pkcs8()
        .map(zeroize::Zeroizing::new)
        .map_err(|e| error::keystore_format("failed to encode private key", Some(e)))
}

/// PKCS#8 DER of the private key, wiped on drop
pub(crate) fn private_key_pkcs8(key: &PKey<Private>) -> Result<zeroize::Zeroizing<Vec<u8>>> {
    pkcs8(key)
}

/// DER of one certificate
pub(crate) fn certificate_der(cert: &X509) -> Result<Vec<u8>> {
    der(cert)
}
