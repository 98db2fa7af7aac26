use super::{ApiEndpoint, ApiResponse};
use crate::config::API_VERSION;
use crate::error::Result;
use crate::operations::get;
use crate::tls::TlsClientContext;

/// Issues GETs against one endpoint with one client certificate.
///
/// Holds no per-request state; every call opens its own connection, so calls
/// are independent of each other.
#[derive(Debug, Clone)]
pub struct ApiClient {
    context: TlsClientContext,
    endpoint: ApiEndpoint,
    api_version: String,
}

impl ApiClient {
    pub fn new(context: TlsClientContext, endpoint: ApiEndpoint) -> Self {
        Self {
            context,
            endpoint,
            api_version: API_VERSION.to_string(),
        }
    }

    /// Send a different `x-ms-version` value.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    pub fn context(&self) -> &TlsClientContext {
        &self.context
    }

    /// GET `resource_path` below the endpoint, returning status and first body line.
    pub async fn get(&self, resource_path: &str) -> Result<ApiResponse> {
        let url = self.endpoint.resource_url(resource_path)?;
        get::execute(&self.context, &url, &self.api_version).await
    }
}
