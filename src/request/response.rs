//! Result of an executed request.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::Serialize;

/// Outcome of [`Request::execute`](super::Request::execute).
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code of the final response.
    pub status_code: u16,
    /// Response body; empty when it was written to a file.
    pub body: Vec<u8>,
    /// Number of body bytes received.
    pub bytes_written: u64,
    /// File the body was written to, if any.
    pub file: Option<PathBuf>,
    /// Transfer details, present when info collection was requested.
    pub info: Option<TransferInfo>,
    /// Wall time spent in `execute`.
    pub duration: Duration,
}

impl Response {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Details of a completed transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferInfo {
    /// URL the request was sent to.
    pub url: String,
    /// URL of the final response (differs after redirects).
    pub effective_url: String,
    /// HTTP status code.
    pub status_code: u16,
    /// `Content-Type` header, if sent.
    pub content_type: Option<String>,
    /// `Content-Length` header, if sent.
    pub content_length: Option<u64>,
    /// Number of response headers.
    pub header_count: usize,
    /// Body bytes received.
    pub size_download: u64,
    /// Total transfer time in seconds.
    pub total_time: f64,
}

impl TransferInfo {
    /// Captures the header-derived fields; size and time are filled in once
    /// the body has been consumed.
    pub(crate) fn from_response(url: &str, response: &reqwest::Response) -> Self {
        let headers = response.headers();
        Self {
            url: url.to_string(),
            effective_url: response.url().to_string(),
            status_code: response.status().as_u16(),
            content_type: headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(std::string::ToString::to_string),
            content_length: headers
                .get(CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok()),
            header_count: headers.len(),
            size_download: 0,
            total_time: 0.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response(status_code: u16, body: &[u8]) -> Response {
        Response {
            status_code,
            body: body.to_vec(),
            bytes_written: body.len() as u64,
            file: None,
            info: None,
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_response_is_success_range() {
        assert!(response(200, b"").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(301, b"").is_success());
        assert!(!response(404, b"").is_success());
    }

    #[test]
    fn test_response_text_is_lossy() {
        assert_eq!(response(200, b"hello").text(), "hello");
        assert_eq!(response(200, &[0x68, 0xff]).text(), "h\u{fffd}");
    }

    #[test]
    fn test_transfer_info_serializes_as_json() {
        let info = TransferInfo {
            url: "https://example.com/a".to_string(),
            effective_url: "https://example.com/b".to_string(),
            status_code: 200,
            content_type: Some("text/html".to_string()),
            content_length: None,
            header_count: 3,
            size_download: 12,
            total_time: 0.5,
        };
        let json: serde_json::Value = serde_json::to_value(&info).unwrap();
        assert_eq!(json["effective_url"], "https://example.com/b");
        assert_eq!(json["status_code"], 200);
        assert_eq!(json["content_length"], serde_json::Value::Null);
        assert_eq!(json["size_download"], 12);
    }
}
