//! Configuration for the provisioning pipeline and the HTTPS transport
//!
//! Plain structs with `Default` values matching the service's published
//! conventions, adjusted through `with_*` builder methods.

pub mod builders;
pub mod defaults;
pub mod types;

pub use defaults::{API_VERSION, DEFAULT_CONNECT_TIMEOUT, DEFAULT_ENDPOINT, DEFAULT_STORE_PATH};
pub use types::{ClientConfig, TlsSettings};
