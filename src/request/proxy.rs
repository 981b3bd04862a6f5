//! Proxy settings applied to a request's transfer engine.

use std::fmt;
use std::str::FromStr;

use url::Url;

use super::constants::DEFAULT_PROXY_PORT;
use super::error::RequestError;

/// Proxy protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyKind {
    /// Plain HTTP proxy (CONNECT for HTTPS targets).
    #[default]
    Http,
    /// SOCKS4 proxy.
    Socks4,
    /// SOCKS5 proxy.
    Socks5,
}

impl ProxyKind {
    /// URL scheme understood by the HTTP engine.
    #[must_use]
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Socks4 => "socks4",
            Self::Socks5 => "socks5",
        }
    }
}

/// A proxy server, with optional credentials.
///
/// ```
/// use fetcher_core::request::{Proxy, ProxyKind};
///
/// let proxy = Proxy::new(ProxyKind::Socks5, "127.0.0.1", 9050).auth("user", "secret");
/// assert_eq!(proxy.url(), "socks5://127.0.0.1:9050");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Proxy {
    kind: ProxyKind,
    host: String,
    port: u16,
    credentials: Option<(String, String)>,
}

impl Proxy {
    /// Creates a proxy without credentials.
    pub fn new(kind: ProxyKind, host: impl Into<String>, port: u16) -> Self {
        Self {
            kind,
            host: host.into(),
            port,
            credentials: None,
        }
    }

    /// Attaches basic-auth credentials.
    #[must_use]
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Proxy protocol.
    #[must_use]
    pub fn kind(&self) -> ProxyKind {
        self.kind
    }

    /// Proxy host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Proxy port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Username, when credentials are set.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|(user, _)| user.as_str())
    }

    /// Proxy URL without credentials.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.kind.scheme(), self.host, self.port)
    }

    pub(crate) fn to_reqwest(&self) -> Result<reqwest::Proxy, RequestError> {
        let url = self.url();
        let mut proxy =
            reqwest::Proxy::all(url.as_str()).map_err(|_| RequestError::invalid_proxy(url))?;
        if let Some((username, password)) = &self.credentials {
            proxy = proxy.basic_auth(username, password);
        }
        Ok(proxy)
    }
}

// Keeps the password out of logs.
impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username())
            .finish_non_exhaustive()
    }
}

impl FromStr for Proxy {
    type Err = RequestError;

    /// Parses `[scheme://][user:pass@]host[:port]`.
    ///
    /// Schemes are `http`, `socks4` and `socks5` (default `http`); a missing
    /// port defaults to 1080.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };
        let parsed = Url::parse(&with_scheme).map_err(|_| RequestError::invalid_proxy(s))?;

        let kind = match parsed.scheme() {
            "http" => ProxyKind::Http,
            "socks4" => ProxyKind::Socks4,
            "socks5" => ProxyKind::Socks5,
            _ => return Err(RequestError::invalid_proxy(s)),
        };
        let host = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| RequestError::invalid_proxy(s))?;
        let port = parsed.port().unwrap_or(DEFAULT_PROXY_PORT);

        let mut proxy = Self::new(kind, host, port);
        if !parsed.username().is_empty() {
            proxy = proxy.auth(parsed.username(), parsed.password().unwrap_or_default());
        }
        Ok(proxy)
    }
}
