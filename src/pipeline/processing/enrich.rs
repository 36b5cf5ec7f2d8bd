use serde::Serialize;

use super::url_filter::UrlDatedRecord;
use crate::reference::LookupTable;

/// An event that resolved against both reference tables, with its display
/// strings attached.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    /// The URL-filtered record this enrichment was derived from
    pub url_dated: UrlDatedRecord,
    pub enrichment: EventEnrichment,
}

/// Columns appended by the enrichment stage, in output order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventEnrichment {
    pub actor1_country_name: String,
    pub actor2_country_name: String,
    /// CAMEO display name of `EventBaseCode`
    pub rel_name: String,
    /// `URLday` as `YYYY-MM-DD`
    pub date_str: String,
    /// `"{date}, {actor1 code}, {relation code}, {actor2 code}"`
    pub quad_event_code: String,
    /// `"{date}, {actor1 name}, {relation name}, {actor2 name}"`
    pub quad_event_name: String,
    /// Codes and names together
    pub quad_event_full_str: String,
}

/// Why a record was filtered out during enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingCountryCode,
    UnknownCountryCode,
    SameCountry,
    PlaceholderEventCode,
    UnknownRelationCode,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::MissingCountryCode => "missing_country_code",
            DropReason::UnknownCountryCode => "unknown_country_code",
            DropReason::SameCountry => "same_country",
            DropReason::PlaceholderEventCode => "placeholder_event_code",
            DropReason::UnknownRelationCode => "unknown_relation_code",
        }
    }
}

/// Per-reason drop counts for one enrichment pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichmentReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub missing_country_code: usize,
    pub unknown_country_code: usize,
    pub same_country: usize,
    pub placeholder_event_code: usize,
    pub unknown_relation_code: usize,
}

impl EnrichmentReport {
    fn count(&mut self, reason: DropReason) {
        match reason {
            DropReason::MissingCountryCode => self.missing_country_code += 1,
            DropReason::UnknownCountryCode => self.unknown_country_code += 1,
            DropReason::SameCountry => self.same_country += 1,
            DropReason::PlaceholderEventCode => self.placeholder_event_code += 1,
            DropReason::UnknownRelationCode => self.unknown_relation_code += 1,
        }
    }

    /// Drop counts keyed by reason name, in filter order
    pub fn drops(&self) -> [(DropReason, usize); 5] {
        [
            (DropReason::MissingCountryCode, self.missing_country_code),
            (DropReason::UnknownCountryCode, self.unknown_country_code),
            (DropReason::SameCountry, self.same_country),
            (DropReason::PlaceholderEventCode, self.placeholder_event_code),
            (DropReason::UnknownRelationCode, self.unknown_relation_code),
        ]
    }
}

/// Trait for enriching URL-filtered records with reference data
pub trait Enricher {
    /// Derive the enrichment columns for one record, or say why it does not qualify
    fn enrich(&self, record: &UrlDatedRecord) -> Result<EventEnrichment, DropReason>;
}

/// Enricher backed by the ISO country and CAMEO relation tables
pub struct ReferenceEnricher<'a> {
    pub iso: &'a LookupTable,
    pub cameo: &'a LookupTable,
    /// Relation code standing for an unknown event type
    pub placeholder: &'a str,
}

impl<'a> ReferenceEnricher<'a> {
    pub fn new(iso: &'a LookupTable, cameo: &'a LookupTable, placeholder: &'a str) -> Self {
        Self {
            iso,
            cameo,
            placeholder,
        }
    }

    fn country<'r>(&self, code: Option<&'r str>) -> Result<(&'r str, &'a str), DropReason> {
        let code = code.ok_or(DropReason::MissingCountryCode)?;
        let name = self
            .iso
            .name_for(code)
            .ok_or(DropReason::UnknownCountryCode)?;
        Ok((code, name))
    }
}

impl Enricher for ReferenceEnricher<'_> {
    fn enrich(&self, record: &UrlDatedRecord) -> Result<EventEnrichment, DropReason> {
        let event = &record.dated.record;

        let code1 = event.actor1_country_code.as_deref();
        let code2 = event.actor2_country_code.as_deref();
        if code1.is_none() || code2.is_none() {
            return Err(DropReason::MissingCountryCode);
        }
        let (a1_code, a1_name) = self.country(code1)?;
        let (a2_code, a2_name) = self.country(code2)?;
        if a1_code == a2_code {
            return Err(DropReason::SameCountry);
        }

        if event.event_root_code == self.placeholder || event.event_base_code == self.placeholder {
            return Err(DropReason::PlaceholderEventCode);
        }
        let rel_code = event.event_base_code.as_str();
        let rel_name = self
            .cameo
            .name_for(rel_code)
            .ok_or(DropReason::UnknownRelationCode)?;

        let date_str = format_date(&record.url_day);
        Ok(EventEnrichment {
            quad_event_code: format!("{date_str}, {a1_code}, {rel_code}, {a2_code}"),
            quad_event_name: format!("{date_str}, {a1_name}, {rel_name}, {a2_name}"),
            quad_event_full_str: format!(
                "{date_str}, {a1_code} - {a1_name}, {rel_code}-{rel_name}, {a2_code}-{a2_name}"
            ),
            actor1_country_name: a1_name.to_string(),
            actor2_country_name: a2_name.to_string(),
            rel_name: rel_name.to_string(),
            date_str,
        })
    }
}

/// `YYYYMMDD` → `YYYY-MM-DD`, slicing by character position.
pub fn format_date(day: &str) -> String {
    let chars: Vec<char> = day.chars().collect();
    let part = |from: usize, to: usize| -> String {
        chars[from.min(chars.len())..to.min(chars.len())].iter().collect()
    };
    format!("{}-{}-{}", part(0, 4), part(4, 6), part(6, chars.len()))
}

/// Join the URL-filtered rows against both reference tables and attach the
/// formatted event strings. Rows that do not resolve are dropped and counted.
pub fn enrich_and_format(
    records: Vec<UrlDatedRecord>,
    iso: &LookupTable,
    cameo: &LookupTable,
    placeholder: &str,
) -> (Vec<EnrichedRecord>, EnrichmentReport) {
    let enricher = ReferenceEnricher::new(iso, cameo, placeholder);
    let mut report = EnrichmentReport {
        rows_in: records.len(),
        ..Default::default()
    };

    let mut enriched = Vec::with_capacity(records.len());
    for record in records {
        match enricher.enrich(&record) {
            Ok(enrichment) => enriched.push(EnrichedRecord {
                url_dated: record,
                enrichment,
            }),
            Err(reason) => report.count(reason),
        }
    }

    report.rows_out = enriched.len();
    (enriched, report)
}
