//! The [`NamingSchema`] template expander.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use tracing::trace;

use super::clock::{BoxedClock, Clock, SystemClock};
use super::error::{ComponentKindParseError, SchemaError};
use super::format::{DEFAULT_DATE_TIME_FORMAT, format_date_time};

/// How a placeholder's replacement value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// The current increment as a plain decimal number.
    Increment,
    /// The current increment left-padded with `0` to the schema's width.
    IncrementZeroFilled,
    /// The schema's cached instant, formatted with its datetime format.
    DateTime,
}

impl ComponentKind {
    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "increment",
            Self::IncrementZeroFilled => "increment_zerofilled",
            Self::DateTime => "datetime",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = ComponentKindParseError;

    /// Accepts `increment`, `increment_zerofilled` and `datetime`, in any case
    /// and optionally wrapped in `#` (`#increment#`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_matches('#').to_ascii_lowercase();
        match name.as_str() {
            "increment" => Ok(Self::Increment),
            "increment_zerofilled" => Ok(Self::IncrementZeroFilled),
            "datetime" => Ok(Self::DateTime),
            _ => Err(ComponentKindParseError {
                name: s.to_string(),
            }),
        }
    }
}

/// Stateful template expander producing sequential names.
///
/// Every call to [`next`](Self::next) advances the increment by one and renders
/// the template, replacing each mapped placeholder at every occurrence.
///
/// # Example
///
/// ```
/// use fetcher_core::schema::{ComponentKind, NamingSchema};
///
/// let mut schema = NamingSchema::new(
///     "page_{INCREMENT}.html",
///     [("{INCREMENT}", ComponentKind::IncrementZeroFilled)],
/// );
/// schema.set_increment_width(3);
///
/// assert_eq!(schema.next().unwrap(), "page_001.html");
/// assert_eq!(schema.next().unwrap(), "page_002.html");
/// ```
#[derive(Debug)]
pub struct NamingSchema {
    template: String,
    components: Vec<(String, ComponentKind)>,
    increment: i64,
    upcoming: Option<i64>,
    increment_width: usize,
    date_time: Option<NaiveDateTime>,
    date_time_format: String,
    clock: BoxedClock,
}

impl NamingSchema {
    /// Creates a schema from a template and a placeholder mapping.
    ///
    /// Mapping order is kept; a placeholder listed twice keeps its first
    /// position and takes the last kind. Nothing is validated here.
    pub fn new<I, K>(template: impl Into<String>, components: I) -> Self
    where
        I: IntoIterator<Item = (K, ComponentKind)>,
        K: Into<String>,
    {
        let mut mapped: Vec<(String, ComponentKind)> = Vec::new();
        for (token, kind) in components {
            let token = token.into();
            match mapped.iter_mut().find(|(existing, _)| *existing == token) {
                Some(entry) => entry.1 = kind,
                None => mapped.push((token, kind)),
            }
        }

        Self {
            template: template.into(),
            components: mapped,
            increment: 0,
            upcoming: Some(1),
            increment_width: 0,
            date_time: None,
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
            clock: BoxedClock(Box::new(SystemClock)),
        }
    }

    /// Replaces the clock used to capture the instant on first DATETIME render.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = BoxedClock(Box::new(clock));
        self
    }

    /// Makes the next call to [`next`](Self::next) yield `start`.
    ///
    /// Zero and negative starts are accepted.
    pub fn set_increment_start(&mut self, start: i64) {
        self.upcoming = Some(start);
    }

    /// Sets the zero-fill width for [`ComponentKind::IncrementZeroFilled`].
    pub fn set_increment_width(&mut self, width: usize) {
        self.increment_width = width;
    }

    /// Sets the format for subsequent DATETIME renders.
    ///
    /// See [`format_date_time`](super::format_date_time) for the tokens.
    pub fn set_date_time_format(&mut self, format: impl Into<String>) {
        self.date_time_format = format.into();
    }

    /// Pins the instant used by DATETIME components.
    pub fn set_date_time(&mut self, instant: NaiveDateTime) {
        self.date_time = Some(instant);
    }

    /// The template this schema renders.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The current increment (the value used by the last render).
    #[must_use]
    pub fn increment(&self) -> i64 {
        self.increment
    }

    /// The cached instant, if one was set or captured.
    #[must_use]
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        self.date_time
    }

    /// Advances the increment and renders the template.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::WidthExceeded`] when a zero-filled placeholder is
    /// mapped and the increment has more characters than the configured width.
    /// The increment stays advanced.
    ///
    /// Returns [`SchemaError::IncrementOverflow`] once `i64::MAX` has been
    /// rendered; a name is never repeated.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<String, SchemaError> {
        let value = self
            .upcoming
            .ok_or_else(|| SchemaError::increment_overflow(self.increment))?;
        self.increment = value;
        self.upcoming = value.checked_add(1);

        let mut rendered = self.template.clone();
        for index in 0..self.components.len() {
            let kind = self.components[index].1;
            let value = self.component_value(kind)?;
            let token = &self.components[index].0;
            if !token.is_empty() {
                rendered = rendered.replace(token.as_str(), &value);
            }
        }

        trace!(increment = self.increment, name = %rendered, "rendered naming schema");
        Ok(rendered)
    }

    fn component_value(&mut self, kind: ComponentKind) -> Result<String, SchemaError> {
        match kind {
            ComponentKind::Increment => Ok(self.increment.to_string()),
            ComponentKind::IncrementZeroFilled => zero_fill(self.increment, self.increment_width),
            ComponentKind::DateTime => {
                let clock = &self.clock.0;
                let instant = *self.date_time.get_or_insert_with(|| clock.now());
                Ok(format_date_time(&instant, &self.date_time_format))
            }
        }
    }
}

impl Iterator for NamingSchema {
    type Item = Result<String, SchemaError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(NamingSchema::next(self))
    }
}

/// Left-pads `value` with zeros to `width` characters (after any sign).
fn zero_fill(value: i64, width: usize) -> Result<String, SchemaError> {
    let natural = value.to_string();
    if natural.len() > width {
        return Err(SchemaError::width_exceeded(value, width));
    }
    Ok(format!("{value:0width$}"))
}
