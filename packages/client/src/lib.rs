//! # azmgmt client
//!
//! Certificate provisioning and client-authenticated HTTPS for the
//! service-management API.
//!
//! ## Pipeline
//!
//! 1. [`credential::extract_credential`] reads the `ManagementCertificate`
//!    attribute from a `.publishsettings` document.
//! 2. [`keystore::provision`] decodes it, opens the PKCS#12 container with the
//!    empty secret and persists a password-less copy for the run.
//! 3. [`tls::TlsContextFactory`] turns the store into a reusable
//!    [`tls::TlsClientContext`] that presents the certificate.
//! 4. [`client::ApiClient`] issues versioned GETs and returns status plus the
//!    first line of the body.
//!
//! ## Usage
//!
//! ```no_run
//! use azmgmt_client::prelude::*;
//!
//! # async fn run() -> azmgmt_client::Result<()> {
//! let config = ClientConfig::new("my.publishsettings", "40a031a0-5444-4209-8136-ce768a393840");
//! let credential = extract_credential(&config.publish_settings)?;
//! let store = provision(&credential, &config.store_path)?;
//! let context = TlsContextFactory::new(config.tls.clone()).build(&store)?;
//! let endpoint = ApiEndpoint::new(&config.endpoint, &config.subscription_id)?;
//!
//! let client = ApiClient::new(context, endpoint);
//! let response = client.get("/services/hostedservices").await?;
//! println!("{}", XmlFormatter::default().format(&response.body));
//!
//! store.close()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod format;
pub mod keystore;
pub mod operations;
pub mod tls;

pub mod prelude;

#[cfg(test)]
mod testing;

pub use crate::error::{Error, Result};
