//! Error types for the request module.
//!
//! Every variant carries the context (URL, path, header or proxy) needed to
//! tell the user what went wrong without the originating builder at hand.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while executing a [`Request`](super::Request).
#[derive(Debug, Error)]
pub enum RequestError {
    /// `execute` was called before a URL was set.
    #[error("no URL set on request")]
    MissingUrl,

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// A header name or value cannot be sent over HTTP.
    #[error("invalid header: {name}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// The proxy string could not be used.
    #[error("invalid proxy: {proxy}")]
    InvalidProxy {
        /// The proxy as given by the caller.
        proxy: String,
    },

    /// The HTTP engine rejected the accumulated client configuration.
    #[error("failed to configure HTTP client: {source}")]
    Client {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP error response while fail-on-error is enabled.
    #[error("HTTP {status} requesting {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while writing the response body.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl RequestError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>) -> Self {
        Self::InvalidHeader { name: name.into() }
    }

    /// Creates an invalid proxy error.
    pub fn invalid_proxy(proxy: impl Into<String>) -> Self {
        Self::InvalidProxy {
            proxy: proxy.into(),
        }
    }

    /// Creates a client configuration error.
    pub fn client(source: reqwest::Error) -> Self {
        Self::Client { source }
    }

    /// Creates a network error, or a timeout error when reqwest reports one.
    pub fn transfer(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: the variants need a URL
// or path the source errors don't carry.
