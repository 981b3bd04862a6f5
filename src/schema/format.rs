//! Letter-token date formatting for DATETIME components.
//!
//! Each recognized letter expands to one calendar field; any other character
//! is copied as-is, and a backslash copies the character after it literally.
//! The default format `Ymd_His` renders `2020-01-01 12:00:00` as
//! `20200101_120000`.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Default datetime format (`yyyyMMdd_HHmmss`).
pub const DEFAULT_DATE_TIME_FORMAT: &str = "Ymd_His";

/// Renders `instant` using the letter-token `format`.
///
/// | token | field |
/// |---|---|
/// | `Y` / `y` | year, 4 / 2 digits |
/// | `m` / `n` | month, zero-padded / plain |
/// | `d` / `j` | day, zero-padded / plain |
/// | `H` / `G` | hour 0-23, zero-padded / plain |
/// | `h` / `g` | hour 1-12, zero-padded / plain |
/// | `A` / `a` | `AM`/`PM`, `am`/`pm` |
/// | `i` | minutes |
/// | `s` | seconds |
/// | `v` | milliseconds |
/// | `D` / `l` | weekday, short / long name |
/// | `M` / `F` | month, short / long name |
#[must_use]
pub fn format_date_time(instant: &NaiveDateTime, format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            'Y' => out.push_str(&format!("{:04}", instant.year())),
            'y' => out.push_str(&format!("{:02}", instant.year().rem_euclid(100))),
            'm' => out.push_str(&format!("{:02}", instant.month())),
            'n' => out.push_str(&instant.month().to_string()),
            'd' => out.push_str(&format!("{:02}", instant.day())),
            'j' => out.push_str(&instant.day().to_string()),
            'H' => out.push_str(&format!("{:02}", instant.hour())),
            'G' => out.push_str(&instant.hour().to_string()),
            'h' => out.push_str(&format!("{:02}", instant.hour12().1)),
            'g' => out.push_str(&instant.hour12().1.to_string()),
            'A' => out.push_str(if instant.hour12().0 { "PM" } else { "AM" }),
            'a' => out.push_str(if instant.hour12().0 { "pm" } else { "am" }),
            'i' => out.push_str(&format!("{:02}", instant.minute())),
            's' => out.push_str(&format!("{:02}", instant.second())),
            // Leap seconds report nanoseconds >= 1e9.
            'v' => out.push_str(&format!("{:03}", (instant.nanosecond() / 1_000_000).min(999))),
            'D' => out.push_str(&instant.format("%a").to_string()),
            'l' => out.push_str(&instant.format("%A").to_string()),
            'M' => out.push_str(&instant.format("%b").to_string()),
            'F' => out.push_str(&instant.format("%B").to_string()),
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_default_format_renders_compact_timestamp() {
        let at = instant(2020, 1, 1, 12, 0, 0);
        assert_eq!(format_date_time(&at, DEFAULT_DATE_TIME_FORMAT), "20200101_120000");
    }

    #[test]
    fn test_date_only_format() {
        let at = instant(2020, 1, 1, 12, 0, 0);
        assert_eq!(format_date_time(&at, "Y-m-d"), "2020-01-01");
        assert_eq!(format_date_time(&at, "H-i"), "12-00");
    }

    #[test]
    fn test_unpadded_tokens() {
        let at = instant(2021, 3, 7, 9, 5, 4);
        assert_eq!(format_date_time(&at, "j.n.y G"), "7.3.21 9");
    }

    #[test]
    fn test_twelve_hour_tokens() {
        let afternoon = instant(2021, 3, 7, 15, 30, 0);
        assert_eq!(format_date_time(&afternoon, "h:i A"), "03:30 PM");
        assert_eq!(format_date_time(&afternoon, "g a"), "3 pm");

        let midnight = instant(2021, 3, 7, 0, 0, 0);
        assert_eq!(format_date_time(&midnight, "g A"), "12 AM");
    }

    #[test]
    fn test_names() {
        let at = instant(2020, 1, 1, 0, 0, 0);
        assert_eq!(format_date_time(&at, "D l M F"), "Wed Wednesday Jan January");
    }

    #[test]
    fn test_milliseconds() {
        let at = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_milli_opt(0, 0, 0, 42)
            .unwrap();
        assert_eq!(format_date_time(&at, "s.v"), "00.042");
    }

    #[test]
    fn test_backslash_escapes_token_letters() {
        let at = instant(2020, 1, 1, 12, 0, 0);
        assert_eq!(format_date_time(&at, "\\Y\\m Y"), "Ym 2020");
    }

    #[test]
    fn test_unknown_characters_are_literal() {
        let at = instant(2020, 1, 1, 12, 0, 0);
        assert_eq!(format_date_time(&at, "[Y]-x_"), "[2020]-x_");
    }

    #[test]
    fn test_empty_format() {
        let at = instant(2020, 1, 1, 12, 0, 0);
        assert_eq!(format_date_time(&at, ""), "");
    }
}
