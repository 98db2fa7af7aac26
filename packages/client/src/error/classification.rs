use std::error::Error as StdError;
use std::io;

use super::types::Error;

impl Error {
    /// Returns true if the failure happened while reading the credentials document.
    #[must_use]
    pub fn is_credential(&self) -> bool {
        matches!(
            self,
            Error::DocumentParse { .. } | Error::CredentialNotFound { .. }
        )
    }

    /// Returns true if the certificate material itself was rejected.
    #[must_use]
    pub fn is_certificate(&self) -> bool {
        matches!(
            self,
            Error::InvalidCertificateEncoding(_)
                | Error::KeyStoreFormat { .. }
                | Error::TlsInitialization(_)
        )
    }

    /// Returns true if the error came from the network exchange.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Returns true if a transport error was caused by a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if !self.is_transport() {
            return false;
        }
        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<tokio::time::error::Elapsed>() {
                return true;
            }
            if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
                if hyper_err.is_timeout() {
                    return true;
                }
            }
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }

    /// Get the URL associated with this error, if any
    #[must_use]
    pub fn url(&self) -> Option<&url::Url> {
        match self {
            Error::Transport { url, .. } => Some(url),
            _ => None,
        }
    }
}
