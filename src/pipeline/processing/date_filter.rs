use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::types::EventRecord;

static ZERO_PADDED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{8}$").expect("valid date regex"));

/// An event whose publication date matches its event day.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedRecord {
    pub record: EventRecord,
    /// First eight characters of `DATEADDED`
    pub news_date: String,
}

/// Row counts for the date-consistency stage
#[derive(Debug, Clone, Default, Serialize)]
pub struct DateFilterReport {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows whose news date differs from `Day`
    pub mismatched: usize,
    /// Rows whose news date is not `YYYYMMDD`
    pub malformed_dates: usize,
}

pub fn is_zero_padded_date(value: &str) -> bool {
    ZERO_PADDED_DATE.is_match(value)
}

/// Keep rows whose news date equals the `Day` field.
///
/// The comparison is plain string equality. With `require_zero_padded`, rows
/// whose news date is not exactly eight digits are dropped as well, so the
/// survivors order chronologically under string comparison.
pub fn filter_date_consistent(
    records: Vec<EventRecord>,
    require_zero_padded: bool,
) -> (Vec<DatedRecord>, DateFilterReport) {
    let mut report = DateFilterReport {
        rows_in: records.len(),
        ..Default::default()
    };

    let mut kept = Vec::with_capacity(records.len());
    for record in records {
        let news_date = record.news_date();
        if news_date != record.day {
            report.mismatched += 1;
            continue;
        }
        if require_zero_padded && !is_zero_padded_date(news_date) {
            report.malformed_dates += 1;
            continue;
        }
        let news_date = news_date.to_string();
        kept.push(DatedRecord { record, news_date });
    }

    report.rows_out = kept.len();
    (kept, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::event;

    #[test]
    fn test_keeps_rows_where_news_date_matches_day() {
        let records = vec![
            event(1, "20230101", "20230101061500", "u1"),
            event(2, "20230101", "20230102000000", "u2"),
            event(3, "20221231", "20221231235959", "u3"),
        ];

        let (kept, report) = filter_date_consistent(records, true);

        let ids: Vec<i64> = kept.iter().map(|r| r.record.global_event_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(report.rows_in, 3);
        assert_eq!(report.rows_out, 2);
        assert_eq!(report.mismatched, 1);
        for r in &kept {
            assert_eq!(r.news_date, r.record.day);
            assert_eq!(&r.record.date_added[..8], r.news_date);
        }
    }

    #[test]
    fn test_malformed_dates_dropped_only_when_required() {
        let records = vec![event(1, "2023011", "2023011", "u1")];

        let (kept, report) = filter_date_consistent(records.clone(), true);
        assert!(kept.is_empty());
        assert_eq!(report.malformed_dates, 1);

        let (kept, report) = filter_date_consistent(records, false);
        assert_eq!(kept.len(), 1);
        assert_eq!(report.malformed_dates, 0);
    }

    #[test]
    fn test_zero_padded_date_shape() {
        assert!(is_zero_padded_date("20230101"));
        assert!(!is_zero_padded_date("2023011"));
        assert!(!is_zero_padded_date("2023-01-01"));
        assert!(!is_zero_padded_date("202301010"));
    }
}
