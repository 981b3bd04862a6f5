//! Integration tests for naming schemas through the public API.

use chrono::{NaiveDate, NaiveDateTime};
use fetcher_core::schema::{ComponentKind, FixedClock, NamingSchema, SchemaError};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .expect("valid test instant")
}

#[test]
fn test_increment_scenario() {
    let mut schema = NamingSchema::new(
        "page_{INCREMENT}.html",
        [("{INCREMENT}", ComponentKind::Increment)],
    );
    schema.set_increment_start(1);

    assert_eq!(schema.next(), Ok("page_1.html".to_string()));
    assert_eq!(schema.next(), Ok("page_2.html".to_string()));
}

#[test]
fn test_zero_filled_overflow_scenario() {
    let mut schema = NamingSchema::new(
        "page_{INCREMENT}.html",
        [("{INCREMENT}", ComponentKind::IncrementZeroFilled)],
    );
    schema.set_increment_start(99);
    schema.set_increment_width(2);

    assert_eq!(schema.next(), Ok("page_99.html".to_string()));
    let error = schema.next().expect_err("100 needs three digits");
    assert_eq!(error, SchemaError::WidthExceeded { value: 100, width: 2 });
    assert_eq!(error.to_string(), "increment 100 exceeds zero-fill width 2");
}

#[test]
fn test_date_time_format_change_scenario() {
    let mut schema = NamingSchema::new(
        "{DATETIME}_page.html",
        [("{DATETIME}", ComponentKind::DateTime)],
    );
    schema.set_date_time(at(2020, 1, 1, 12, 0, 0));

    let first = schema.next().expect("renders");
    assert_eq!(first, "20200101_120000_page.html");

    schema.set_date_time_format("Y-m-d");
    assert_eq!(schema.next(), Ok("2020-01-01_page.html".to_string()));
    // Already returned names are unaffected.
    assert_eq!(first, "20200101_120000_page.html");

    schema.set_date_time_format("H-i");
    assert_eq!(schema.next(), Ok("12-00_page.html".to_string()));
}

#[test]
fn test_lazy_date_time_is_stable_across_calls() {
    let mut schema = NamingSchema::new(
        "{DATETIME}-{INCREMENT}",
        [
            ("{DATETIME}", ComponentKind::DateTime),
            ("{INCREMENT}", ComponentKind::Increment),
        ],
    )
    .with_clock(FixedClock(at(2023, 12, 31, 23, 59, 58)));

    let names: Vec<String> = (0..3).map(|_| schema.next().expect("renders")).collect();
    assert_eq!(
        names,
        vec![
            "20231231_235958-1",
            "20231231_235958-2",
            "20231231_235958-3"
        ]
    );
}

#[test]
fn test_system_clock_capture_is_reused() {
    let mut schema = NamingSchema::new("{D}", [("{D}", ComponentKind::DateTime)]);
    schema.set_date_time_format("Ymd_His.v");

    let first = schema.next().expect("renders");
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = schema.next().expect("renders");
    assert_eq!(first, second);
    assert!(schema.date_time().is_some());
}

#[test]
fn test_schema_as_iterator() {
    let mut schema = NamingSchema::new("img{N}.png", [("{N}", ComponentKind::IncrementZeroFilled)]);
    schema.set_increment_width(2);
    schema.set_increment_start(98);

    let results: Vec<Result<String, SchemaError>> = schema.by_ref().take(3).collect();
    assert_eq!(results[0], Ok("img98.png".to_string()));
    assert_eq!(results[1], Ok("img99.png".to_string()));
    assert!(results[2].is_err());
    assert_eq!(schema.increment(), 100);
}

#[test]
fn test_schema_moves_across_threads() {
    let mut schema = NamingSchema::new("{N}", [("{N}", ComponentKind::Increment)]);
    let handle = std::thread::spawn(move || {
        schema.next().expect("renders");
        schema
    });
    let mut schema = handle.join().expect("thread finished");
    assert_eq!(schema.next(), Ok("2".to_string()));
}

#[test]
fn test_shared_schema_behind_mutex_never_repeats() {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    let schema = Arc::new(Mutex::new(NamingSchema::new(
        "{N}",
        [("{N}", ComponentKind::Increment)],
    )));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let schema = Arc::clone(&schema);
            std::thread::spawn(move || {
                (0..50)
                    .map(|_| schema.lock().expect("lock").next().expect("renders"))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for name in handle.join().expect("thread finished") {
            assert!(seen.insert(name), "duplicate name");
        }
    }
    assert_eq!(seen.len(), 200);
}
