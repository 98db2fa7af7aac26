//! # azmgmt
//!
//! Query the service-management API with the management certificate from a
//! downloaded `.publishsettings` file.
//!
//! ```no_run
//! use azmgmt::{ClientConfig, ResponseFormatter, ServiceManager, XmlFormatter};
//!
//! # async fn run() -> azmgmt::Result<()> {
//! let manager = ServiceManager::connect(ClientConfig::new(
//!     "my.publishsettings",
//!     "40a031a0-5444-4209-8136-ce768a393840",
//! ))?;
//!
//! let response = manager.hosted_services().await?;
//! println!("{}", XmlFormatter::default().format(&response.body));
//!
//! manager.close()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod manager;
pub mod query;

pub use manager::{RunOutcome, ServiceManager};
pub use query::Query;

// Re-export the client pipeline
pub use azmgmt_client::config::{DEFAULT_ENDPOINT, DEFAULT_STORE_PATH};
pub use azmgmt_client::prelude::*;
pub use azmgmt_client as client;
