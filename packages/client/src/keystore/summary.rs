use x509_parser::prelude::*;

use crate::error::{self, Result};

/// Human-readable identity of a management certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    pub subject: String,
    pub issuer: String,
    /// Upper-case hex SHA-1 of the DER encoding, the identifier the management
    /// portal shows for uploaded certificates
    pub thumbprint: String,
}

impl CertificateSummary {
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (_, cert) = parse_x509_certificate(der).map_err(|e| {
            error::keystore_format(format!("certificate is not valid X.509: {e}"), None)
        })?;

        let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, der);

        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            thumbprint: hex::encode_upper(digest.as_ref()),
        })
    }
}
