use std::collections::HashSet;

use crate::types::EventRecord;

/// Keep the first row seen for each `GlobalEventID`, preserving scan order.
pub fn dedupe_by_id(records: Vec<EventRecord>) -> Vec<EventRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| seen.insert(r.global_event_id))
        .collect()
}
