//! Constants for the request module.

/// Maximum redirect hops when following locations.
pub const MAX_REDIRECTS: usize = 10;

/// Proxy port used when a proxy string omits one.
pub const DEFAULT_PROXY_PORT: u16 = 1080;
