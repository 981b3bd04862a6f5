//! Fluent HTTP request builder.
//!
//! The builder accumulates request options and hands them to `reqwest` in a
//! single [`Request::execute`] call. It does not speak HTTP itself: pooling,
//! TLS, redirects and proxy protocols all come from the engine.
//!
//! # Features
//!
//! - GET, POST (with optional body) and DELETE
//! - Headers, referrer and User-Agent
//! - Redirect following with optional automatic `Referer`
//! - HTTP, SOCKS4 and SOCKS5 proxies with basic auth
//! - Transfer and connect timeouts (seconds or milliseconds)
//! - Streaming the body to a file
//! - Optional transfer info (effective URL, sizes, timing)
//!
//! # Example
//!
//! ```no_run
//! use fetcher_core::request::Request;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let response = Request::new_with_url("https://example.com/page.html")
//!     .file("page_001.html")
//!     .collect_info(true)
//!     .execute()
//!     .await?;
//! println!("saved {} bytes in {:?}", response.bytes_written, response.duration);
//! # Ok(())
//! # }
//! ```

mod builder;
mod constants;
mod error;
mod proxy;
mod response;

pub use builder::{ConnectionOptions, Request};
pub use constants::{DEFAULT_PROXY_PORT, MAX_REDIRECTS};
pub use error::RequestError;
pub use proxy::{Proxy, ProxyKind};
pub use response::{Response, TransferInfo};
