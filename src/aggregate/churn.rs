//! Churn Aggregator
//!
//! Buckets a title's amendment records by calendar year. Records without a
//! parseable date are skipped; failure never propagates past the title being
//! aggregated.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::models::AmendmentRecord;

/// Buckets amendment dates by year.
///
/// Returns a year-string to count map. Absent or unparseable dates are
/// excluded without affecting other counts.
pub fn churn_by_year(records: &[AmendmentRecord]) -> BTreeMap<String, u64> {
    let mut changes_per_year = BTreeMap::new();

    for record in records {
        let Some(date) = record.amendment_date.as_deref() else {
            continue;
        };
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed) => {
                *changes_per_year
                    .entry(parsed.year().to_string())
                    .or_insert(0) += 1;
            }
            Err(_) => {
                debug!(date, "skipping unparseable amendment date");
            }
        }
    }

    changes_per_year
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: Option<&str>) -> AmendmentRecord {
        AmendmentRecord {
            amendment_date: date.map(|d| d.to_string()),
        }
    }

    #[test]
    fn test_churn_buckets_by_year() {
        let records = vec![
            record(Some("2020-01-01")),
            record(Some("2020-06-01")),
            record(Some("2021-03-01")),
        ];

        let churn = churn_by_year(&records);
        assert_eq!(churn.get("2020"), Some(&2));
        assert_eq!(churn.get("2021"), Some(&1));
        assert_eq!(churn.len(), 2);
    }

    #[test]
    fn test_churn_skips_missing_dates() {
        let records = vec![
            record(Some("2020-01-01")),
            record(None),
            record(Some("2020-12-31")),
        ];

        let churn = churn_by_year(&records);
        assert_eq!(churn.get("2020"), Some(&2));
        assert_eq!(churn.len(), 1);
    }

    #[test]
    fn test_churn_skips_unparseable_dates() {
        let records = vec![record(Some("not-a-date")), record(Some("2019-05-05"))];

        let churn = churn_by_year(&records);
        assert_eq!(churn.get("2019"), Some(&1));
        assert_eq!(churn.len(), 1);
    }

    #[test]
    fn test_churn_empty_input() {
        assert!(churn_by_year(&[]).is_empty());
    }
}
