//! Client-authenticated TLS
//!
//! Builds a rustls client configuration that presents the provisioned
//! management certificate, and opens connections with it. The crypto provider
//! is selected per configuration; nothing is installed process-wide.

mod context;
mod material;
mod roots;

pub use context::{TlsClientContext, TlsContextFactory};
