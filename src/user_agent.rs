//! User-Agent strings.
//!
//! Requests identify the tool by default. [`UserAgent`] describes a browser
//! User-Agent for servers that only talk to browsers.

use std::fmt;

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/fetcher";

/// Default User-Agent for requests (identifies the tool).
#[must_use]
pub fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("fetcher/{version} (+{PROJECT_UA_URL})")
}

/// Browser product token used by Firefox and most other browsers.
pub const BROWSER_FIREFOX: &str = "Mozilla/5.0";

/// Operating system token of a browser User-Agent.
///
/// Windows variants use the `Windows NT` version tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Os {
    Windows81,
    Windows8,
    Windows7,
    WindowsVista,
    WindowsServer2003,
    WindowsXpX64,
    WindowsXp,
    Windows2000Sp1,
    Windows2000,
    WindowsNt40,
    WindowsMillennium,
    Windows98,
    Windows95,
    WindowsCe,
    /// Any other platform token, used verbatim.
    Other(String),
}

impl Os {
    /// The platform token as it appears in the User-Agent.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Windows81 => "Windows NT 6.3",
            Self::Windows8 => "Windows NT 6.2",
            Self::Windows7 => "Windows NT 6.1",
            Self::WindowsVista => "Windows NT 6.0",
            Self::WindowsServer2003 | Self::WindowsXpX64 => "Windows NT 5.2",
            Self::WindowsXp => "Windows NT 5.1",
            Self::Windows2000Sp1 => "Windows NT 5.01",
            Self::Windows2000 => "Windows NT 5.0",
            Self::WindowsNt40 => "Windows NT 4.0",
            Self::WindowsMillennium => "Windows 98; Win 9x 4.90",
            Self::Windows98 => "Windows 98",
            Self::Windows95 => "Windows 95",
            Self::WindowsCe => "Windows CE",
            Self::Other(token) => token,
        }
    }
}

/// Browser User-Agent descriptor.
///
/// Renders as `Mozilla/5.0 (<os>[; rv:<os_version>]) <browser>/<browser_version>`.
///
/// ```
/// use fetcher_core::user_agent::{Os, UserAgent};
///
/// let ua = UserAgent::new("Firefox", "115.0", Os::Windows7).os_version("115.0");
/// assert_eq!(
///     ua.to_string(),
///     "Mozilla/5.0 (Windows NT 6.1; rv:115.0) Firefox/115.0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    pub browser: String,
    pub browser_version: String,
    pub os: Os,
    pub os_version: Option<String>,
}

impl UserAgent {
    /// Creates a descriptor without an OS version.
    pub fn new(browser: impl Into<String>, browser_version: impl Into<String>, os: Os) -> Self {
        Self {
            browser: browser.into(),
            browser_version: browser_version.into(),
            os,
            os_version: None,
        }
    }

    /// Sets the `rv:` version inside the platform comment.
    #[must_use]
    pub fn os_version(mut self, os_version: impl Into<String>) -> Self {
        self.os_version = Some(os_version.into());
        self
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{BROWSER_FIREFOX} ({}", self.os.token())?;
        if let Some(version) = &self.os_version {
            write!(f, "; rv:{version}")?;
        }
        write!(f, ") {}/{}", self.browser, self.browser_version)
    }
}
