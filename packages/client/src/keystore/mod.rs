//! Keystore provisioning
//!
//! Turns the base64 management certificate into a password-less PKCS#12
//! store held in memory and mirrored to a transient file. Nothing here touches
//! the network; the only side effect is the one file write.

pub mod pkcs12;
mod store_file;
mod summary;

use std::fmt;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use zeroize::Zeroizing;

pub use pkcs12::{EMPTY_SECRET, KeyMaterial};
pub use store_file::StoreFile;
pub use summary::CertificateSummary;

use crate::credential::Credential;
use crate::error::{self, Result};

/// In-memory keystore plus its on-disk copy.
///
/// Created once per run. The file is deleted by [`ProvisionedStore::close`] or,
/// failing that, when the store is dropped.
pub struct ProvisionedStore {
    material: KeyMaterial,
    file: StoreFile,
}

impl ProvisionedStore {
    pub fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Location of the persisted copy
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn has_private_key(&self) -> bool {
        self.material.private_key.is_some()
    }

    /// Re-read the persisted copy with the empty secret.
    pub fn reopen(&self) -> Result<KeyMaterial> {
        let bytes = Zeroizing::new(
            std::fs::read(self.path()).map_err(|e| error::store_io(self.path(), e))?,
        );
        pkcs12::open(&bytes)
    }

    /// Subject, issuer and thumbprint of the leaf certificate.
    pub fn certificate_summary(&self) -> Result<CertificateSummary> {
        let der = pkcs12::certificate_der(&self.material.certificate)?;
        CertificateSummary::from_der(&der)
    }

    /// Delete the persisted copy now, keeping nothing on disk.
    pub fn close(self) -> Result<()> {
        let path = self.path().to_path_buf();
        self.file.remove()?;
        tracing::debug!("Closed keystore {}", path.display());
        Ok(())
    }
}

impl fmt::Debug for ProvisionedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedStore")
            .field("material", &self.material)
            .field("path", &self.path())
            .finish()
    }
}

/// Build the keystore for `credential` and persist it at `store_path`.
///
/// Steps, each with its own failure:
/// 1. base64 decode: [`Error::InvalidCertificateEncoding`](crate::Error::InvalidCertificateEncoding),
///    nothing is written;
/// 2. open as PKCS#12 with the empty secret: [`Error::KeyStoreFormat`](crate::Error::KeyStoreFormat);
/// 3. write the store back out with the empty secret: [`Error::StoreIo`](crate::Error::StoreIo).
pub fn provision(credential: &Credential, store_path: impl AsRef<Path>) -> Result<ProvisionedStore> {
    let store_path = store_path.as_ref();

    let der = decode_certificate(credential.certificate_base64())?;
    let material = pkcs12::open(&der)?;
    let encoded = Zeroizing::new(pkcs12::encode(&material)?);
    let file = StoreFile::create(store_path, &encoded)?;

    let store = ProvisionedStore { material, file };
    match store.certificate_summary() {
        Ok(summary) => tracing::info!(
            "Provisioned keystore {} for {} (thumbprint {})",
            store_path.display(),
            summary.subject,
            summary.thumbprint
        ),
        Err(e) => tracing::warn!("Provisioned keystore {} but could not summarize certificate: {}", store_path.display(), e),
    }
    Ok(store)
}

/// Decode the attribute text; whitespace inside the value is ignored.
fn decode_certificate(text: &str) -> Result<Zeroizing<Vec<u8>>> {
    let compact: Zeroizing<String> =
        Zeroizing::new(text.chars().filter(|c| !c.is_ascii_whitespace()).collect());
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(Zeroizing::new(bytes))
}
