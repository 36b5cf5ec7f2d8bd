// Pipeline processing: date consistency, URL earliest-date and reference enrichment

pub mod date_filter;
pub mod enrich;
pub mod url_filter;

pub use date_filter::{filter_date_consistent, DateFilterReport, DatedRecord};
pub use enrich::{enrich_and_format, EnrichedRecord, EnrichmentReport, EventEnrichment};
pub use url_filter::{filter_url_earliest, UrlDatedRecord};
