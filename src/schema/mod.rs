//! Sequential file naming schemas.
//!
//! A [`NamingSchema`] expands a template such as `page_{INCREMENT}.html` into a
//! new name on every call, substituting each mapped placeholder according to
//! its [`ComponentKind`]:
//!
//! - [`ComponentKind::Increment`] - the counter, `1`, `2`, ...
//! - [`ComponentKind::IncrementZeroFilled`] - the counter padded to a fixed
//!   width, `001`, `002`, ... (fails once the counter outgrows the width)
//! - [`ComponentKind::DateTime`] - one instant, captured on first use and
//!   reused, rendered with a `Ymd_His`-style format
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use fetcher_core::schema::{ComponentKind, NamingSchema};
//!
//! let mut schema = NamingSchema::new(
//!     "{DATETIME}_page_{INCREMENT}.html",
//!     [
//!         ("{DATETIME}", ComponentKind::DateTime),
//!         ("{INCREMENT}", ComponentKind::Increment),
//!     ],
//! );
//! let instant = NaiveDate::from_ymd_opt(2020, 1, 1)
//!     .and_then(|d| d.and_hms_opt(12, 0, 0))
//!     .unwrap();
//! schema.set_date_time(instant);
//!
//! assert_eq!(schema.next().unwrap(), "20200101_120000_page_1.html");
//! ```

mod clock;
mod error;
mod format;
mod naming;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ComponentKindParseError, SchemaError};
pub use format::{DEFAULT_DATE_TIME_FORMAT, format_date_time};
pub use naming::{ComponentKind, NamingSchema};
