//! Customer cleaning and deduplication.
//!
//! Produces the customer dimension: exactly one row per distinct
//! `customer_id`, the most recently updated one.

use std::cmp::Ordering;

use ow_common::parse_i64;
use ow_model::{DimCustomer, RawCustomer};

use crate::datetime::parse_timestamp;

/// Normalize one raw customer row.
///
/// `email` is trimmed and lower-cased, `full_name` is trimmed, and both
/// `customer_id` and `updated_at` are coerced with absent-on-failure semantics.
pub fn clean_customer(raw: &RawCustomer) -> DimCustomer {
    DimCustomer {
        customer_id: parse_i64(&raw.customer_id),
        email: raw.email.trim().to_lowercase(),
        full_name: raw.full_name.trim().to_string(),
        updated_at: parse_timestamp(&raw.updated_at),
    }
}

/// Build the customer dimension from the raw customers extract.
///
/// Rows are ordered by `(customer_id, updated_at, input position)` and the
/// last row of each `customer_id` group is kept. An absent `updated_at` sorts
/// before every concrete timestamp, so a dated row always beats an undated
/// one; among rows with equal timestamps the later input row wins. Rows whose
/// `customer_id` is unparsable form one group of their own, placed last.
///
/// No id is ever lost: the output has one row per distinct input id.
pub fn dedup_customers(raw: &[RawCustomer]) -> Vec<DimCustomer> {
    let mut cleaned: Vec<(usize, DimCustomer)> =
        raw.iter().map(clean_customer).enumerate().collect();

    cleaned.sort_by(|(left_pos, left), (right_pos, right)| {
        compare_customer_ids(left.customer_id, right.customer_id)
            .then_with(|| left.updated_at.cmp(&right.updated_at))
            .then_with(|| left_pos.cmp(right_pos))
    });

    let mut dimension: Vec<DimCustomer> = Vec::new();
    for (_, customer) in cleaned {
        match dimension.last_mut() {
            Some(last) if last.customer_id == customer.customer_id => *last = customer,
            _ => dimension.push(customer),
        }
    }
    dimension
}

/// Ascending id order with absent ids after all present ones.
fn compare_customer_ids(left: Option<i64>, right: Option<i64>) -> Ordering {
    match (left, right) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(dimension: &[DimCustomer]) -> Vec<&str> {
        dimension.iter().map(|c| c.email.as_str()).collect()
    }

    #[test]
    fn test_clean_customer_normalizes_contact_fields() {
        let cleaned = clean_customer(&RawCustomer::new(" 7 ", "  Ann@Example.COM ", "  Ann Lee ", "bad"));
        assert_eq!(cleaned.customer_id, Some(7));
        assert_eq!(cleaned.email, "ann@example.com");
        assert_eq!(cleaned.full_name, "Ann Lee");
        assert_eq!(cleaned.updated_at, None);
    }

    #[test]
    fn test_latest_update_wins() {
        let raw = vec![
            RawCustomer::new("1", "new@x.com", "New", "2024-02-01"),
            RawCustomer::new("1", "old@x.com", "Old", "2024-01-01"),
        ];
        let dimension = dedup_customers(&raw);
        assert_eq!(dimension.len(), 1);
        assert_eq!(dimension[0].email, "new@x.com");
        assert_eq!(dimension[0].full_name, "New");
    }

    #[test]
    fn test_dated_row_beats_undated_row() {
        let raw = vec![
            RawCustomer::new("1", "dated@x.com", "A", "2020-01-01"),
            RawCustomer::new("1", "undated@x.com", "B", "garbage"),
        ];
        assert_eq!(emails(&dedup_customers(&raw)), vec!["dated@x.com"]);
    }

    #[test]
    fn test_all_undated_keeps_last_occurrence() {
        let raw = vec![
            RawCustomer::new("3", "first@x.com", "A", ""),
            RawCustomer::new("3", "second@x.com", "B", "n/a"),
            RawCustomer::new("3", "third@x.com", "C", ""),
        ];
        assert_eq!(emails(&dedup_customers(&raw)), vec!["third@x.com"]);
    }

    #[test]
    fn test_equal_timestamps_keep_last_occurrence() {
        let raw = vec![
            RawCustomer::new("4", "a@x.com", "A", "2024-05-05"),
            RawCustomer::new("4", "b@x.com", "B", "2024-05-05 00:00:00"),
        ];
        assert_eq!(emails(&dedup_customers(&raw)), vec!["b@x.com"]);
    }

    #[test]
    fn test_one_row_per_id_grouped_in_id_order() {
        let raw = vec![
            RawCustomer::new("2", "two@x.com", "Two", "2024-01-01"),
            RawCustomer::new("x", "bad@x.com", "Bad", "2024-01-01"),
            RawCustomer::new("1", "one@x.com", "One", "2024-01-01"),
            RawCustomer::new("2", "two-b@x.com", "Two", "2023-01-01"),
        ];
        let dimension = dedup_customers(&raw);
        let ids: Vec<Option<i64>> = dimension.iter().map(|c| c.customer_id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), None]);
        assert_eq!(dimension[1].email, "two@x.com");
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup_customers(&[]).is_empty());
    }
}
