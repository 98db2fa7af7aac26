//! Operations against the management API

pub mod get;

pub use get::{VERSION_HEADER, get};
