//! Arrow representation of every stage's rows.
//!
//! Each stage's table is the 61 raw columns followed by the derived columns
//! the stages appended so far, in append order.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::constants;
use crate::error::Result;
use crate::pipeline::processing::{DatedRecord, EnrichedRecord, UrlDatedRecord};
use crate::types::EventRecord;

type Column = (Field, ArrayRef);

/// Rows that can be laid out as one Arrow record batch.
///
/// Nullability is fixed per column: optional event fields are always
/// nullable and everything else never is, whatever the rows contain.
pub trait TableRows: Sized {
    fn columns(rows: &[Self]) -> Vec<Column>;

    fn record_batch(rows: &[Self]) -> Result<RecordBatch> {
        let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) =
            Self::columns(rows).into_iter().unzip();
        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
    }
}

fn column(name: &str, array: ArrayRef, nullable: bool) -> Column {
    (Field::new(name, array.data_type().clone(), nullable), array)
}

/// A non-null string column derived by a stage
fn derived<T>(name: &str, rows: &[T], f: impl Fn(&T) -> &str) -> Column {
    column(name, utf8(rows, |r| Some(f(r))), false)
}

fn utf8<T>(rows: &[T], f: impl Fn(&T) -> Option<&str>) -> ArrayRef {
    Arc::new(rows.iter().map(f).collect::<StringArray>())
}

fn int64<T>(rows: &[T], f: impl Fn(&T) -> Option<i64>) -> ArrayRef {
    Arc::new(rows.iter().map(f).collect::<Int64Array>())
}

fn int32<T>(rows: &[T], f: impl Fn(&T) -> Option<i32>) -> ArrayRef {
    Arc::new(rows.iter().map(f).collect::<Int32Array>())
}

fn float64<T>(rows: &[T], f: impl Fn(&T) -> Option<f64>) -> ArrayRef {
    Arc::new(rows.iter().map(f).collect::<Float64Array>())
}

/// The 61 raw columns for rows reached through `event`.
fn event_columns<T, F>(rows: &[T], event: F) -> Vec<Column>
where
    F: Copy + Fn(&T) -> &EventRecord,
{
    let text = |name: &str, nullable: bool, f: fn(&EventRecord) -> Option<&str>| {
        column(name, utf8(rows, move |r| f(event(r))), nullable)
    };
    let int = |name: &str, nullable: bool, f: fn(&EventRecord) -> Option<i32>| {
        column(name, int32(rows, move |r| f(event(r))), nullable)
    };
    let real = |name: &str, nullable: bool, f: fn(&EventRecord) -> Option<f64>| {
        column(name, float64(rows, move |r| f(event(r))), nullable)
    };

    vec![
        column("GlobalEventID", int64(rows, |r| Some(event(r).global_event_id)), false),
        text("Day", false, |e| Some(e.day.as_str())),
        text("MonthYear", false, |e| Some(e.month_year.as_str())),
        text("Year", false, |e| Some(e.year.as_str())),
        real("FractionDate", false, |e| Some(e.fraction_date)),
        text("Actor1Code", true, |e| e.actor1_code.as_deref()),
        text("Actor1Name", true, |e| e.actor1_name.as_deref()),
        text("Actor1CountryCode", true, |e| e.actor1_country_code.as_deref()),
        text("Actor1KnownGroupCode", true, |e| e.actor1_known_group_code.as_deref()),
        text("Actor1EthnicCode", true, |e| e.actor1_ethnic_code.as_deref()),
        text("Actor1Religion1Code", true, |e| e.actor1_religion1_code.as_deref()),
        text("Actor1Religion2Code", true, |e| e.actor1_religion2_code.as_deref()),
        text("Actor1Type1Code", true, |e| e.actor1_type1_code.as_deref()),
        text("Actor1Type2Code", true, |e| e.actor1_type2_code.as_deref()),
        text("Actor1Type3Code", true, |e| e.actor1_type3_code.as_deref()),
        text("Actor2Code", true, |e| e.actor2_code.as_deref()),
        text("Actor2Name", true, |e| e.actor2_name.as_deref()),
        text("Actor2CountryCode", true, |e| e.actor2_country_code.as_deref()),
        text("Actor2KnownGroupCode", true, |e| e.actor2_known_group_code.as_deref()),
        text("Actor2EthnicCode", true, |e| e.actor2_ethnic_code.as_deref()),
        text("Actor2Religion1Code", true, |e| e.actor2_religion1_code.as_deref()),
        text("Actor2Religion2Code", true, |e| e.actor2_religion2_code.as_deref()),
        text("Actor2Type1Code", true, |e| e.actor2_type1_code.as_deref()),
        text("Actor2Type2Code", true, |e| e.actor2_type2_code.as_deref()),
        text("Actor2Type3Code", true, |e| e.actor2_type3_code.as_deref()),
        int("IsRootEvent", false, |e| Some(e.is_root_event)),
        text("EventCode", false, |e| Some(e.event_code.as_str())),
        text("EventBaseCode", false, |e| Some(e.event_base_code.as_str())),
        text("EventRootCode", false, |e| Some(e.event_root_code.as_str())),
        int("QuadClass", false, |e| Some(e.quad_class)),
        real("GoldsteinScale", true, |e| e.goldstein_scale),
        int("NumMentions", false, |e| Some(e.num_mentions)),
        int("NumSources", false, |e| Some(e.num_sources)),
        int("NumArticles", false, |e| Some(e.num_articles)),
        real("AvgTone", false, |e| Some(e.avg_tone)),
        int("Actor1Geo_Type", true, |e| e.actor1_geo_type),
        text("Actor1Geo_Fullname", true, |e| e.actor1_geo_fullname.as_deref()),
        text("Actor1Geo_CountryCode", true, |e| e.actor1_geo_country_code.as_deref()),
        text("Actor1Geo_ADM1Code", true, |e| e.actor1_geo_adm1_code.as_deref()),
        text("Actor1Geo_ADM2Code", true, |e| e.actor1_geo_adm2_code.as_deref()),
        real("Actor1Geo_Lat", true, |e| e.actor1_geo_lat),
        real("Actor1Geo_Long", true, |e| e.actor1_geo_long),
        text("Actor1Geo_FeatureID", true, |e| e.actor1_geo_feature_id.as_deref()),
        int("Actor2Geo_Type", true, |e| e.actor2_geo_type),
        text("Actor2Geo_Fullname", true, |e| e.actor2_geo_fullname.as_deref()),
        text("Actor2Geo_CountryCode", true, |e| e.actor2_geo_country_code.as_deref()),
        text("Actor2Geo_ADM1Code", true, |e| e.actor2_geo_adm1_code.as_deref()),
        text("Actor2Geo_ADM2Code", true, |e| e.actor2_geo_adm2_code.as_deref()),
        real("Actor2Geo_Lat", true, |e| e.actor2_geo_lat),
        real("Actor2Geo_Long", true, |e| e.actor2_geo_long),
        text("Actor2Geo_FeatureID", true, |e| e.actor2_geo_feature_id.as_deref()),
        int("EventGeo_Type", true, |e| e.event_geo_type),
        text("EventGeo_Fullname", true, |e| e.event_geo_fullname.as_deref()),
        text("EventGeo_CountryCode", true, |e| e.event_geo_country_code.as_deref()),
        text("EventGeo_ADM1Code", true, |e| e.event_geo_adm1_code.as_deref()),
        text("EventGeo_ADM2Code", true, |e| e.event_geo_adm2_code.as_deref()),
        real("EventGeo_Lat", true, |e| e.event_geo_lat),
        real("EventGeo_Long", true, |e| e.event_geo_long),
        text("EventGeo_FeatureID", true, |e| e.event_geo_feature_id.as_deref()),
        text("DATEADDED", false, |e| Some(e.date_added.as_str())),
        text("SOURCEURL", false, |e| Some(e.source_url.as_str())),
    ]
}

impl TableRows for EventRecord {
    fn columns(rows: &[Self]) -> Vec<Column> {
        event_columns(rows, |r| r)
    }
}

impl TableRows for DatedRecord {
    fn columns(rows: &[Self]) -> Vec<Column> {
        let mut columns = event_columns(rows, |r| &r.record);
        columns.push(derived(constants::NEWS_DATE, rows, |r| r.news_date.as_str()));
        columns
    }
}

impl TableRows for UrlDatedRecord {
    fn columns(rows: &[Self]) -> Vec<Column> {
        let mut columns = event_columns(rows, |r| &r.dated.record);
        columns.push(derived(constants::NEWS_DATE, rows, |r| r.dated.news_date.as_str()));
        columns.push(derived(constants::URL_DAY, rows, |r| r.url_day.as_str()));
        columns
    }
}

impl TableRows for EnrichedRecord {
    fn columns(rows: &[Self]) -> Vec<Column> {
        let mut columns = event_columns(rows, |r| &r.url_dated.dated.record);
        columns.extend([
            derived(constants::NEWS_DATE, rows, |r| r.url_dated.dated.news_date.as_str()),
            derived(constants::URL_DAY, rows, |r| r.url_dated.url_day.as_str()),
            derived(constants::ACTOR1_COUNTRY_NAME, rows, |r| r.enrichment.actor1_country_name.as_str()),
            derived(constants::ACTOR2_COUNTRY_NAME, rows, |r| r.enrichment.actor2_country_name.as_str()),
            derived(constants::REL_NAME, rows, |r| r.enrichment.rel_name.as_str()),
            derived(constants::DATE_STR, rows, |r| r.enrichment.date_str.as_str()),
            derived(constants::QUAD_EVENT_CODE, rows, |r| r.enrichment.quad_event_code.as_str()),
            derived(constants::QUAD_EVENT_NAME, rows, |r| r.enrichment.quad_event_name.as_str()),
            derived(constants::QUAD_EVENT_FULL_STR, rows, |r| r.enrichment.quad_event_full_str.as_str()),
        ]);
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COLUMN_NAMES;
    use crate::pipeline::processing::{enrich_and_format, filter_date_consistent, filter_url_earliest};
    use crate::reference::LookupTable;
    use crate::types::fixtures::event;
    use arrow::array::Array;

    #[test]
    fn test_raw_columns_follow_export_order() {
        let batch = EventRecord::record_batch(&[event(1, "20230101", "20230101000000", "u1")]).unwrap();

        let names: Vec<String> = batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(names, COLUMN_NAMES.to_vec());
        assert_eq!(batch.num_rows(), 1);
    }

    #[test]
    fn test_nulls_for_missing_optional_fields() {
        let batch = EventRecord::record_batch(&[event(1, "20230101", "20230101000000", "u1")]).unwrap();

        let known_group = batch.column_by_name("Actor1KnownGroupCode").unwrap();
        assert!(known_group.is_null(0));
        let ids = batch
            .column_by_name("GlobalEventID")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(ids.value(0), 1);
    }

    #[test]
    fn test_enriched_table_appends_derived_columns() {
        let iso: LookupTable = [("US", "United States"), ("FR", "France")].into_iter().collect();
        let cameo: LookupTable = [("010", "Make statement")].into_iter().collect();
        let (dated, _) = filter_date_consistent(vec![event(1, "20230101", "20230101000000", "u1")], true);
        let (enriched, _) = enrich_and_format(filter_url_earliest(dated), &iso, &cameo, "--");

        let batch = EnrichedRecord::record_batch(&enriched).unwrap();

        assert_eq!(batch.num_columns(), COLUMN_NAMES.len() + 9);
        let schema = batch.schema();
        let tail: Vec<&str> = schema.fields()[COLUMN_NAMES.len()..]
            .iter()
            .map(|f| f.name().as_str())
            .collect();
        assert_eq!(
            tail,
            vec![
                "NewsDate",
                "URLday",
                "Actor1CountryName",
                "Actor2CountryName",
                "RelName",
                "DateStr",
                "QuadEventCode",
                "QuadEventName",
                "QuadEventFullStr"
            ]
        );
        let full = batch
            .column_by_name("QuadEventFullStr")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(full.value(0), "2023-01-01, US - United States, 010-Make statement, FR-France");
    }

    #[test]
    fn test_empty_table_keeps_schema() {
        let batch = DatedRecord::record_batch(&[]).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), COLUMN_NAMES.len() + 1);
    }

    #[test]
    fn test_schema_does_not_depend_on_row_contents() {
        let mut full = event(1, "20230101", "20230101000000", "u1");
        full.actor1_known_group_code = Some("UAF".to_string());
        full.actor1_geo_lat = Some(38.9);
        let mut sparse = event(2, "20230101", "20230101000000", "u2");
        sparse.actor1_code = None;
        sparse.goldstein_scale = None;

        let with_values = EventRecord::record_batch(&[full]).unwrap();
        let with_nulls = EventRecord::record_batch(&[sparse]).unwrap();
        let empty = EventRecord::record_batch(&[]).unwrap();

        assert_eq!(with_values.schema(), with_nulls.schema());
        assert_eq!(with_values.schema(), empty.schema());

        let schema = with_values.schema();
        for name in ["Actor1Code", "GoldsteinScale", "Actor1Geo_Lat", "Actor1Geo_Type"] {
            assert!(schema.field_with_name(name).unwrap().is_nullable(), "{name}");
        }
        for name in ["GlobalEventID", "Day", "EventRootCode", "AvgTone", "SOURCEURL"] {
            assert!(!schema.field_with_name(name).unwrap().is_nullable(), "{name}");
        }
    }

    #[test]
    fn test_derived_columns_are_not_nullable() {
        let (dated, _) = filter_date_consistent(vec![event(1, "20230101", "20230101000000", "u1")], true);
        let batch = UrlDatedRecord::record_batch(&filter_url_earliest(dated)).unwrap();
        let empty = UrlDatedRecord::record_batch(&[]).unwrap();

        assert_eq!(batch.schema(), empty.schema());
        let schema = batch.schema();
        assert!(!schema.field_with_name("NewsDate").unwrap().is_nullable());
        assert!(!schema.field_with_name("URLday").unwrap().is_nullable());
    }
}
