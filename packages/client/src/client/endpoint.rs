use std::fmt;

use crate::error::{self, Result};

/// Management API base composed with a subscription id,
/// e.g. `https://management.core.windows.net/<subscription-id>`.
///
/// Resource paths are appended by plain concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: String,
}

impl ApiEndpoint {
    /// Compose `base` and `subscription_id`.
    ///
    /// `base` gets a trailing `/` when it lacks one. The result must be an
    /// absolute https URL.
    pub fn new(base: &url::Url, subscription_id: &str) -> Result<Self> {
        if base.scheme() != "https" {
            return Err(error::invalid_endpoint(base.as_str(), "scheme must be https"));
        }
        if subscription_id.is_empty() || subscription_id.contains(['/', '?', '#']) {
            return Err(error::invalid_endpoint(
                base.as_str(),
                format!("subscription id '{subscription_id}' is not a single path segment"),
            ));
        }

        let separator = if base.as_str().ends_with('/') { "" } else { "/" };
        let composed = format!("{}{}{}", base.as_str(), separator, subscription_id);
        url::Url::parse(&composed).map_err(|e| error::invalid_endpoint(&composed, e))?;

        Ok(Self { base: composed })
    }

    /// The composed base, without a trailing `/`
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Full URL for `resource_path` (expected to start with `/`).
    pub fn resource_url(&self, resource_path: &str) -> Result<url::Url> {
        let full = format!("{}{}", self.base, resource_path);
        url::Url::parse(&full).map_err(|e| error::invalid_endpoint(full, e))
    }
}

impl fmt::Display for ApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
