//! Management API client
//!
//! [`ApiEndpoint`] composes the base URL, [`ApiClient`] issues versioned GETs
//! through a shared [`TlsClientContext`](crate::tls::TlsClientContext) and
//! returns [`ApiResponse`] values.

pub mod core;
pub mod endpoint;
pub mod response;

pub use self::core::ApiClient;
pub use endpoint::ApiEndpoint;
pub use response::ApiResponse;
