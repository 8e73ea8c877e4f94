//! Transport construction, response checks and multipart encoding.

use std::time::Duration;

use crate::error::LegalChatError;

/// Build a reqwest client for the configured timeout.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LegalChatError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(4)
        .build()
        .map_err(|e| LegalChatError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Turn a non-2xx response into an error, passing 2xx responses through.
pub async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, LegalChatError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_to_error(status.as_u16(), &body))
}

/// Map an HTTP status and body to an error.
///
/// FastAPI wraps failures as `{"detail": "..."}`; that detail is used as the
/// message when present, otherwise the raw body.
pub fn status_to_error(status: u16, body: &str) -> LegalChatError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string());
    LegalChatError::api(status, message)
}

/// Encode a single-file `multipart/form-data` body under field `field`.
pub fn build_file_multipart(
    boundary: &str,
    field: &str,
    file_name: &str,
    mime_type: &str,
    data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{}\"\r\n",
            escape_quoted(file_name)
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}

/// Guess a content type from a file extension.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "doc" => "application/msword",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
