// Pipeline ingestion: reading raw exports and collapsing duplicate events

pub mod dedupe;
pub mod reader;

pub use dedupe::dedupe_by_id;
pub use reader::{ingest_directory, list_input_files, read_event_file, read_events, IngestOutcome};
