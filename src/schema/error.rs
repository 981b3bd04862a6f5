//! Error types for the schema module.

use thiserror::Error;

/// Errors raised while rendering a naming schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A zero-filled increment has more characters than the configured width.
    ///
    /// The value is never truncated and the width never silently grows, so the
    /// caller has to pick a larger width (or a smaller start).
    #[error("increment {value} exceeds zero-fill width {width}")]
    WidthExceeded {
        /// The increment value that did not fit.
        value: i64,
        /// The configured zero-fill width.
        width: usize,
    },

    /// The increment already rendered `i64::MAX` and cannot advance.
    #[error("increment cannot advance past {last}")]
    IncrementOverflow {
        /// The last rendered increment.
        last: i64,
    },
}

impl SchemaError {
    /// Creates a width-exceeded error.
    #[must_use]
    pub fn width_exceeded(value: i64, width: usize) -> Self {
        Self::WidthExceeded { value, width }
    }

    /// Creates an increment-overflow error.
    #[must_use]
    pub fn increment_overflow(last: i64) -> Self {
        Self::IncrementOverflow { last }
    }
}

/// Returned when a component kind name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component kind '{name}' (expected increment, increment_zerofilled or datetime)")]
pub struct ComponentKindParseError {
    /// The rejected input.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_exceeded_display_carries_value_and_width() {
        let error = SchemaError::width_exceeded(100, 2);
        let msg = error.to_string();
        assert!(msg.contains("100"), "Expected value in: {msg}");
        assert!(msg.contains("width 2"), "Expected width in: {msg}");
    }

    #[test]
    fn test_increment_overflow_display() {
        let msg = SchemaError::increment_overflow(i64::MAX).to_string();
        assert!(msg.contains(&i64::MAX.to_string()), "Expected last value in: {msg}");
    }

    #[test]
    fn test_component_kind_parse_error_display() {
        let error = ComponentKindParseError {
            name: "counter".to_string(),
        };
        assert!(error.to_string().contains("'counter'"));
    }
}
