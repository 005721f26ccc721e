use std::cmp::Ordering;

use chrono::NaiveDate;

use super::*;
use crate::error::ValidationError;
use crate::testutil::date;

fn task(id: u64, title: &str, due: NaiveDate) -> Task {
    Task::create(TaskId(id), title, "", due, Priority::Medium).unwrap()
}

#[test]
fn test_create_starts_incomplete() {
    let t = Task::create(TaskId(1), "Pay rent", "monthly", date(2030, 1, 1), Priority::High).unwrap();
    assert_eq!(t.id(), TaskId(1));
    assert_eq!(t.title(), "Pay rent");
    assert_eq!(t.description(), "monthly");
    assert_eq!(t.due_date(), date(2030, 1, 1));
    assert_eq!(t.priority(), Priority::High);
    assert!(!t.is_completed());
}

#[test]
fn test_create_trims_text() {
    let t = Task::create(TaskId(1), "  Pay rent \n", "  note ", date(2030, 1, 1), Priority::Low).unwrap();
    assert_eq!(t.title(), "Pay rent");
    assert_eq!(t.description(), "note");
}

#[test]
fn test_create_rejects_empty_title() {
    let err = Task::create(TaskId(1), "", "desc", date(2030, 1, 1), Priority::High).unwrap_err();
    assert_eq!(err, ValidationError::EmptyTitle);

    let err = Task::create(TaskId(1), "   ", "desc", date(2030, 1, 1), Priority::High).unwrap_err();
    assert_eq!(err, ValidationError::EmptyTitle);
}

#[test]
fn test_toggle_twice_restores() {
    let mut t = task(1, "Water plants", date(2025, 6, 1));
    t.toggle_completion();
    assert!(t.is_completed());
    t.toggle_completion();
    assert!(!t.is_completed());
}

#[test]
fn test_compare_due_only_looks_at_date() {
    let early = task(1, "B", date(2025, 1, 1));
    let late = task(2, "A", date(2025, 2, 1));
    let same_day = task(3, "C", date(2025, 1, 1));

    assert_eq!(early.compare_due(&late), Ordering::Less);
    assert_eq!(late.compare_due(&early), Ordering::Greater);
    assert_eq!(early.compare_due(&same_day), Ordering::Equal);
}

#[test]
fn test_priority_parse_case_insensitive() {
    assert_eq!("High".parse::<Priority>(), Ok(Priority::High));
    assert_eq!("medium".parse::<Priority>(), Ok(Priority::Medium));
    assert_eq!(" LOW ".parse::<Priority>(), Ok(Priority::Low));
    assert_eq!(
        "urgent".parse::<Priority>(),
        Err(ValidationError::UnknownPriority("urgent".to_string()))
    );
}

#[test]
fn test_priority_cycle() {
    assert_eq!(Priority::High.next(), Priority::Medium);
    assert_eq!(Priority::Low.next(), Priority::High);
    assert_eq!(Priority::High.prev(), Priority::Low);
    assert_eq!(Priority::default(), Priority::High);
    assert_eq!(Priority::Medium.to_string(), "Medium");
}

#[test]
fn test_default_format_parses_exact_text() {
    let fmt = DateFormat::default();
    assert_eq!(fmt.pattern(), "dd-MM-yyyy");
    assert_eq!(fmt.parse("05-03-2025"), Ok(date(2025, 3, 5)));
    assert_eq!(fmt.parse("29-02-2024"), Ok(date(2024, 2, 29)));
}

#[test]
fn test_default_format_rejects_malformed_text() {
    let fmt = DateFormat::default();
    for text in [
        "2025-01-01",
        "5-3-2025",
        "05-3-2025",
        "05-03-25",
        "05/03/2025",
        "05-03-2025 ",
        "05-03-20256",
        "aa-03-2025",
        "+5-03-2025",
        "",
    ] {
        assert!(
            matches!(fmt.parse(text), Err(ValidationError::InvalidDate { .. })),
            "expected '{}' to be rejected",
            text
        );
    }
}

#[test]
fn test_default_format_rejects_impossible_dates() {
    let fmt = DateFormat::default();
    assert!(fmt.parse("31-02-2025").is_err());
    assert!(fmt.parse("29-02-2025").is_err());
    assert!(fmt.parse("00-01-2025").is_err());
    assert!(fmt.parse("01-13-2025").is_err());
}

#[test]
fn test_year_zero_rejected() {
    let fmt = DateFormat::default();
    assert!(matches!(
        fmt.parse("01-01-0000"),
        Err(ValidationError::InvalidDate { .. })
    ));
    assert_eq!(fmt.parse("01-01-0001"), Ok(date(1, 1, 1)));
    assert_eq!(fmt.parse("31-12-9999"), Ok(date(9999, 12, 31)));
}

#[test]
fn test_invalid_date_error_names_pattern() {
    let err = DateFormat::default().parse("2025-01-01").unwrap_err();
    assert_eq!(err.to_string(), "enter date in format dd-MM-yyyy (got '2025-01-01')");
}

#[test]
fn test_format_pads_fields() {
    let fmt = DateFormat::default();
    assert_eq!(fmt.format(date(2030, 1, 1)), "01-01-2030");
    assert_eq!(fmt.format(date(2025, 12, 9)), "09-12-2025");
}

#[test]
fn test_custom_pattern() {
    let fmt = DateFormat::new("yyyy/MM/dd").unwrap();
    assert_eq!(fmt.parse("2025/03/05"), Ok(date(2025, 3, 5)));
    assert_eq!(fmt.format(date(2025, 3, 5)), "2025/03/05");
    assert!(fmt.parse("05-03-2025").is_err());
}

#[test]
fn test_bad_patterns_rejected() {
    assert!(DateFormat::new("dd-MM").is_err());
    assert!(DateFormat::new("dd-dd-yyyy").is_err());
    assert!(DateFormat::new("dd-MMM-yyyy").is_err());
    assert!(DateFormat::new("yy-MM-dd").is_err());
    assert!(DateFormat::new("").is_err());
}

#[test]
fn test_pattern_from_str_matches_default() {
    let parsed: DateFormat = "dd-MM-yyyy".parse().unwrap();
    assert_eq!(parsed, DateFormat::default());
}
