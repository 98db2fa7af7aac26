//! Error types for the provisioning pipeline and the HTTPS transport
//!
//! Every stage reports through one [`Error`] enum so callers can propagate with
//! `?` from extraction all the way to the API call.

pub mod classification;
pub mod constructors;
pub mod types;

pub use constructors::*;
pub use types::{Error, Result};

// Boxed cause carried by transport failures
pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
