//! # Delay Calculator
//!
//! Date arithmetic over the order lifecycle. Everything takes an explicit
//! `today` so callers and tests control the clock; the `*_now` variants
//! read the local date.
//!
//! An order is delayed only while it sits at the laboratory: the status
//! must be `sent` and the expected return date must be strictly in the
//! past. Orders without an expected return date are never delayed.

use crate::models::ProsthesisOrder;
use crate::state_machine::OrderStatus;
use chrono::{Local, NaiveDate};

/// Whether the order is overdue at the laboratory as of `today`.
/// A recorded return date ends the delay regardless of status.
pub fn is_delayed(order: &ProsthesisOrder, today: NaiveDate) -> bool {
    if order.status != OrderStatus::Sent || order.return_date.is_some() {
        return false;
    }
    match order.expected_return_date {
        Some(expected) => expected < today,
        None => false,
    }
}

/// Whole days past the expected return date, or `None` when the order is
/// not delayed. A delayed order is always at least one day late.
pub fn days_late(order: &ProsthesisOrder, today: NaiveDate) -> Option<i64> {
    if !is_delayed(order, today) {
        return None;
    }
    let expected = order.expected_return_date?;
    Some((today - expected).num_days())
}

/// Whole days until the expected return date for an order still at the
/// laboratory. Zero means due today; `None` means not `sent`, no expected
/// date, or already overdue.
pub fn days_until_due(order: &ProsthesisOrder, today: NaiveDate) -> Option<i64> {
    if order.status != OrderStatus::Sent {
        return None;
    }
    let expected = order.expected_return_date?;
    let remaining = (expected - today).num_days();
    if remaining < 0 {
        return None;
    }
    Some(remaining)
}

/// [`is_delayed`] against the local date
pub fn is_delayed_now(order: &ProsthesisOrder) -> bool {
    is_delayed(order, Local::now().date_naive())
}

/// [`days_late`] against the local date
pub fn days_late_now(order: &ProsthesisOrder) -> Option<i64> {
    days_late(order, Local::now().date_naive())
}

/// [`days_until_due`] against the local date
pub fn days_until_due_now(order: &ProsthesisOrder) -> Option<i64> {
    days_until_due(order, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use sqlx::types::Json;

    fn order(status: OrderStatus, expected: Option<&str>) -> ProsthesisOrder {
        let ts = NaiveDateTime::parse_from_str("2024-01-01 08:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        ProsthesisOrder {
            id: 1,
            company_id: 1,
            patient_id: 10,
            professional_id: 20,
            prosthesis_type: "Coroa".to_string(),
            description: "Coroa no dente 36".to_string(),
            laboratory: Some("Lab Sorriso".to_string()),
            status,
            sent_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            expected_return_date: expected.map(|d| d.parse().unwrap()),
            return_date: None,
            observations: None,
            labels: Json(vec![]),
            created_at: ts,
            updated_at: ts,
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_delayed_only_when_sent_and_past_due() {
        let o = order(OrderStatus::Sent, Some("2024-01-10"));
        assert!(!is_delayed(&o, day("2024-01-09")));
        assert!(!is_delayed(&o, day("2024-01-10")));
        assert!(is_delayed(&o, day("2024-01-11")));
    }

    #[test]
    fn test_non_sent_statuses_never_delayed() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Returned,
            OrderStatus::Completed,
            OrderStatus::Canceled,
            OrderStatus::Archived,
        ] {
            let o = order(status, Some("2020-01-01"));
            assert!(!is_delayed(&o, day("2024-06-01")));
            assert_eq!(days_late(&o, day("2024-06-01")), None);
        }
    }

    #[test]
    fn test_recorded_return_ends_the_delay() {
        let mut o = order(OrderStatus::Sent, Some("2024-01-10"));
        o.return_date = Some(day("2024-01-15"));
        assert!(!is_delayed(&o, day("2024-06-01")));
        assert_eq!(days_late(&o, day("2024-06-01")), None);
    }

    #[test]
    fn test_missing_expected_date_never_delayed() {
        let o = order(OrderStatus::Sent, None);
        assert!(!is_delayed(&o, day("2024-06-01")));
        assert_eq!(days_until_due(&o, day("2024-06-01")), None);
    }

    #[test]
    fn test_days_late_counts_from_expected() {
        let o = order(OrderStatus::Sent, Some("2024-01-10"));
        assert_eq!(days_late(&o, day("2024-01-15")), Some(5));
        assert_eq!(days_late(&o, day("2024-01-11")), Some(1));
        assert_eq!(days_late(&o, day("2024-01-10")), None);
    }

    #[test]
    fn test_days_until_due() {
        let o = order(OrderStatus::Sent, Some("2024-01-10"));
        assert_eq!(days_until_due(&o, day("2024-01-05")), Some(5));
        assert_eq!(days_until_due(&o, day("2024-01-10")), Some(0));
        assert_eq!(days_until_due(&o, day("2024-01-11")), None);
    }
}
