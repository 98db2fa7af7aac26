//! Versioned GET against the management API

use bytes::Bytes;
use http::header::{HOST, HeaderValue};
use http::{Method, Request};
use http_body_util::{BodyExt, Empty};
use hyper::body::Body;
use hyper_util::rt::TokioIo;

use crate::client::{ApiEndpoint, ApiResponse};
use crate::config::API_VERSION;
use crate::error::{self, Result};
use crate::tls::TlsClientContext;

/// Header carrying the management API version
pub const VERSION_HEADER: &str = "x-ms-version";

/// GET `endpoint + resource_path` with the default API version.
///
/// Whatever the server answers is returned, including 4xx/5xx statuses; only
/// failures to complete the exchange are errors.
pub async fn get(
    context: &TlsClientContext,
    endpoint: &ApiEndpoint,
    resource_path: &str,
) -> Result<ApiResponse> {
    let url = endpoint.resource_url(resource_path)?;
    execute(context, &url, API_VERSION).await
}

/// One request on a fresh connection: connect, send, read status and body.
pub(crate) async fn execute(
    context: &TlsClientContext,
    url: &url::Url,
    api_version: &str,
) -> Result<ApiResponse> {
    tracing::info!("Service Management request: {}", url);

    let request = build_request(url, api_version).map_err(|e| error::transport(url, e))?;
    let stream = context.connect(url).await?;

    let (mut sender, connection) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .map_err(|e| error::transport(url, e))?;
    let driver = tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::debug!("Connection closed with error: {}", e);
        }
    });

    let response = sender
        .send_request(request)
        .await
        .map_err(|e| error::transport(url, e))?;
    let status = response.status();
    let body = read_first_line(response.into_body())
        .await
        .map_err(|e| error::transport(url, e))?;

    // No further requests on this connection.
    drop(sender);
    driver.abort();

    if status.is_success() {
        tracing::debug!("{} answered {} ({} bytes)", url, status, body.len());
    } else {
        // 403 here usually means the certificate is not registered with the subscription
        tracing::warn!("{} answered {}", url, status);
    }

    Ok(ApiResponse::from_raw(status, &body))
}

/// Read body frames until the first line break or the end of the body.
///
/// Bytes past the line break that arrived in the same frame are kept; the
/// caller cuts them off. The rest of the body is never read.
async fn read_first_line<B>(mut body: B) -> std::result::Result<Vec<u8>, B::Error>
where
    B: Body<Data = Bytes> + Unpin,
{
    let mut received = Vec::new();
    while let Some(frame) = body.frame().await {
        if let Ok(data) = frame?.into_data() {
            let line_done = data.iter().any(|b| matches!(b, b'\n' | b'\r'));
            received.extend_from_slice(&data);
            if line_done {
                break;
            }
        }
    }
    Ok(received)
}

fn build_request(url: &url::Url, api_version: &str) -> std::result::Result<Request<Empty<Bytes>>, http::Error> {
    let host = url.host_str().unwrap_or_default();
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    let path_and_query = &url[url::Position::BeforePath..url::Position::AfterQuery];

    Request::builder()
        .method(Method::GET)
        .uri(path_and_query)
        .header(HOST, HeaderValue::from_str(&authority)?)
        .header(VERSION_HEADER, api_version)
        .body(Empty::<Bytes>::new())
}
