//! Conversion of keystore contents into rustls types

use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};

use crate::error::{self, Result};
use crate::keystore::{KeyMaterial, pkcs12};

/// Leaf-first certificate chain as presented in the handshake
pub(crate) fn certificate_chain(material: &KeyMaterial) -> Result<Vec<CertificateDer<'static>>> {
    std::iter::once(&material.certificate)
        .chain(&material.chain)
        .map(|cert| pkcs12::certificate_der(cert).map(CertificateDer::from))
        .collect()
}

/// PKCS#8 private key; a store without one cannot authenticate.
pub(crate) fn private_key(material: &KeyMaterial) -> Result<PrivateKeyDer<'static>> {
    let key = material
        .private_key
        .as_ref()
        .ok_or_else(|| error::tls_init("keystore has no private key entry, only certificates"))?;
    let pkcs8 = pkcs12::private_key_pkcs8(key)?;
    Ok(PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(pkcs8.to_vec())))
}
