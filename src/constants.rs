/// Positional column names of a raw event export, in file order.
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = [
    // event date attributes
    "GlobalEventID", "Day", "MonthYear", "Year", "FractionDate",
    // actor1 attributes
    "Actor1Code", "Actor1Name", "Actor1CountryCode", "Actor1KnownGroupCode", "Actor1EthnicCode",
    "Actor1Religion1Code", "Actor1Religion2Code", "Actor1Type1Code", "Actor1Type2Code", "Actor1Type3Code",
    // actor2 attributes
    "Actor2Code", "Actor2Name", "Actor2CountryCode", "Actor2KnownGroupCode", "Actor2EthnicCode",
    "Actor2Religion1Code", "Actor2Religion2Code", "Actor2Type1Code", "Actor2Type2Code", "Actor2Type3Code",
    // event action attributes
    "IsRootEvent", "EventCode", "EventBaseCode", "EventRootCode", "QuadClass",
    "GoldsteinScale", "NumMentions", "NumSources", "NumArticles", "AvgTone",
    // actor1 geography
    "Actor1Geo_Type", "Actor1Geo_Fullname", "Actor1Geo_CountryCode", "Actor1Geo_ADM1Code",
    "Actor1Geo_ADM2Code", "Actor1Geo_Lat", "Actor1Geo_Long", "Actor1Geo_FeatureID",
    // actor2 geography
    "Actor2Geo_Type", "Actor2Geo_Fullname", "Actor2Geo_CountryCode", "Actor2Geo_ADM1Code",
    "Actor2Geo_ADM2Code", "Actor2Geo_Lat", "Actor2Geo_Long", "Actor2Geo_FeatureID",
    // event geography
    "EventGeo_Type", "EventGeo_Fullname", "EventGeo_CountryCode", "EventGeo_ADM1Code",
    "EventGeo_ADM2Code", "EventGeo_Lat", "EventGeo_Long", "EventGeo_FeatureID",
    // other event information
    "DATEADDED", "SOURCEURL",
];

pub const COLUMN_COUNT: usize = 61;

// Derived columns, in the order the stages append them
pub const NEWS_DATE: &str = "NewsDate";
pub const URL_DAY: &str = "URLday";
pub const ACTOR1_COUNTRY_NAME: &str = "Actor1CountryName";
pub const ACTOR2_COUNTRY_NAME: &str = "Actor2CountryName";
pub const REL_NAME: &str = "RelName";
pub const DATE_STR: &str = "DateStr";
pub const QUAD_EVENT_CODE: &str = "QuadEventCode";
pub const QUAD_EVENT_NAME: &str = "QuadEventName";
pub const QUAD_EVENT_FULL_STR: &str = "QuadEventFullStr";

// Artifact base names, one per stage
pub const RAW_ARTIFACT: &str = "kg_raw";
pub const SAMEDATE_ARTIFACT: &str = "kg_samedate";
pub const URLDATE_ARTIFACT: &str = "kg_urldate";
pub const INFO_ARTIFACT: &str = "kg_info";

pub const MANIFEST_FILE: &str = "manifest.json";
pub const METRICS_FILE: &str = "metrics.prom";

// Defaults for the relative layout the pipeline was first run against
pub const DEFAULT_CONFIG_PATH: &str = "kg_clean.toml";
pub const DEFAULT_DATA_DIR: &str = "../data/kg_raw";
pub const DEFAULT_OUTPUT_DIR: &str = "../data/kg_tmp";
pub const DEFAULT_ISO_COUNTRY_TABLE: &str = "../data/info/ISO_country_GeoNames.txt";
pub const DEFAULT_CAMEO_RELATION_TABLE: &str = "../data/info/CAMEO_relation.txt";

/// Dataset start, `yyyymm`
pub const DEFAULT_START_DATE: u32 = 202300;
/// Dataset end, `yyyymm`
pub const DEFAULT_END_DATE: u32 = 202311;

/// Marker used in place of a CAMEO code when the event type is unknown
pub const DEFAULT_PLACEHOLDER_EVENT_CODE: &str = "--";

/// File name prefixes skipped when scanning the input directory
pub const IGNORED_FILE_PREFIXES: [&str; 2] = [".", "_"];
