//! Fetcher Core Library
//!
//! This library provides a fluent builder around an HTTP transfer engine and
//! a naming schema for saving fetched documents under sequential names.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`request`] - Request builder, proxy settings and responses
//! - [`schema`] - Templated file names with increment and datetime tokens
//! - [`user_agent`] - Default and browser User-Agent strings

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod request;
pub mod schema;
pub mod user_agent;

// Re-export commonly used types
pub use request::{Proxy, ProxyKind, Request, RequestError, Response, TransferInfo};
pub use schema::{ComponentKind, NamingSchema, SchemaError};
