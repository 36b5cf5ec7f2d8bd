use std::collections::HashMap;

use super::date_filter::DatedRecord;

/// A dated event whose news date is the earliest seen for its source URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlDatedRecord {
    pub dated: DatedRecord,
    /// Minimum news date observed for this record's URL
    pub url_day: String,
}

/// Keep, for every URL, only the rows carrying its earliest news date.
///
/// Dates compare as strings, which is chronological for `YYYYMMDD`. Rows that
/// tie on the earliest date all pass.
pub fn filter_url_earliest(records: Vec<DatedRecord>) -> Vec<UrlDatedRecord> {
    let mut earliest: HashMap<String, String> = HashMap::new();
    for r in &records {
        earliest
            .entry(r.record.source_url.clone())
            .and_modify(|day| {
                if r.news_date < *day {
                    *day = r.news_date.clone();
                }
            })
            .or_insert_with(|| r.news_date.clone());
    }

    records
        .into_iter()
        .filter_map(|dated| {
            let url_day = earliest.get(&dated.record.source_url)?;
            (dated.news_date == *url_day).then(|| UrlDatedRecord {
                url_day: url_day.clone(),
                dated,
            })
        })
        .collect()
}
