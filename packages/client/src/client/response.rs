use http::StatusCode;

/// Status and first body line of one API call.
///
/// The service answers on a single line, so only the first line of the body
/// is kept; anything after the first line break is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub(crate) fn from_raw(status: StatusCode, body: &[u8]) -> Self {
        Self {
            status,
            body: first_line(body),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Text up to the first `\n`, `\r` or `\r\n`; empty input gives an empty string.
pub(crate) fn first_line(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.find(['\n', '\r']) {
        Some(end) => text[..end].to_string(),
        None => text.into_owned(),
    }
}
