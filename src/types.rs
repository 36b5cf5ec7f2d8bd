use serde::{Deserialize, Serialize};

/// One row of a raw event export.
///
/// Fields are declared in file order; rows are headerless, so deserialization
/// is positional. Date-like fields and CAMEO codes stay strings because their
/// leading zeros are significant. Empty fields become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub global_event_id: i64,
    pub day: String,
    pub month_year: String,
    pub year: String,
    pub fraction_date: f64,

    pub actor1_code: Option<String>,
    pub actor1_name: Option<String>,
    pub actor1_country_code: Option<String>,
    pub actor1_known_group_code: Option<String>,
    pub actor1_ethnic_code: Option<String>,
    pub actor1_religion1_code: Option<String>,
    pub actor1_religion2_code: Option<String>,
    pub actor1_type1_code: Option<String>,
    pub actor1_type2_code: Option<String>,
    pub actor1_type3_code: Option<String>,

    pub actor2_code: Option<String>,
    pub actor2_name: Option<String>,
    pub actor2_country_code: Option<String>,
    pub actor2_known_group_code: Option<String>,
    pub actor2_ethnic_code: Option<String>,
    pub actor2_religion1_code: Option<String>,
    pub actor2_religion2_code: Option<String>,
    pub actor2_type1_code: Option<String>,
    pub actor2_type2_code: Option<String>,
    pub actor2_type3_code: Option<String>,

    pub is_root_event: i32,
    pub event_code: String,
    pub event_base_code: String,
    pub event_root_code: String,
    pub quad_class: i32,
    pub goldstein_scale: Option<f64>,
    pub num_mentions: i32,
    pub num_sources: i32,
    pub num_articles: i32,
    pub avg_tone: f64,

    pub actor1_geo_type: Option<i32>,
    pub actor1_geo_fullname: Option<String>,
    pub actor1_geo_country_code: Option<String>,
    pub actor1_geo_adm1_code: Option<String>,
    pub actor1_geo_adm2_code: Option<String>,
    pub actor1_geo_lat: Option<f64>,
    pub actor1_geo_long: Option<f64>,
    pub actor1_geo_feature_id: Option<String>,

    pub actor2_geo_type: Option<i32>,
    pub actor2_geo_fullname: Option<String>,
    pub actor2_geo_country_code: Option<String>,
    pub actor2_geo_adm1_code: Option<String>,
    pub actor2_geo_adm2_code: Option<String>,
    pub actor2_geo_lat: Option<f64>,
    pub actor2_geo_long: Option<f64>,
    pub actor2_geo_feature_id: Option<String>,

    pub event_geo_type: Option<i32>,
    pub event_geo_fullname: Option<String>,
    pub event_geo_country_code: Option<String>,
    pub event_geo_adm1_code: Option<String>,
    pub event_geo_adm2_code: Option<String>,
    pub event_geo_lat: Option<f64>,
    pub event_geo_long: Option<f64>,
    pub event_geo_feature_id: Option<String>,

    /// Timestamp the record was added, `YYYYMMDDHHMMSS`
    pub date_added: String,
    pub source_url: String,
}

impl EventRecord {
    /// Date the record was published, taken from the first eight characters
    /// of `DATEADDED` (the whole value when it is shorter).
    pub fn news_date(&self) -> &str {
        match self.date_added.char_indices().nth(8) {
            Some((idx, _)) => &self.date_added[..idx],
            None => &self.date_added,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::EventRecord;

    /// A minimal, fully valid record for stage tests.
    pub fn event(id: i64, day: &str, date_added: &str, url: &str) -> EventRecord {
        EventRecord {
            global_event_id: id,
            day: day.to_string(),
            month_year: day.chars().take(6).collect(),
            year: day.chars().take(4).collect(),
            fraction_date: 2023.0027,
            actor1_code: Some("USA".to_string()),
            actor1_name: Some("UNITED STATES".to_string()),
            actor1_country_code: Some("US".to_string()),
            actor1_known_group_code: None,
            actor1_ethnic_code: None,
            actor1_religion1_code: None,
            actor1_religion2_code: None,
            actor1_type1_code: None,
            actor1_type2_code: None,
            actor1_type3_code: None,
            actor2_code: Some("FRA".to_string()),
            actor2_name: Some("FRANCE".to_string()),
            actor2_country_code: Some("FR".to_string()),
            actor2_known_group_code: None,
            actor2_ethnic_code: None,
            actor2_religion1_code: None,
            actor2_religion2_code: None,
            actor2_type1_code: Some("GOV".to_string()),
            actor2_type2_code: None,
            actor2_type3_code: None,
            is_root_event: 1,
            event_code: "010".to_string(),
            event_base_code: "010".to_string(),
            event_root_code: "01".to_string(),
            quad_class: 1,
            goldstein_scale: Some(0.0),
            num_mentions: 4,
            num_sources: 1,
            num_articles: 4,
            avg_tone: -1.25,
            actor1_geo_type: Some(1),
            actor1_geo_fullname: Some("United States".to_string()),
            actor1_geo_country_code: Some("US".to_string()),
            actor1_geo_adm1_code: Some("US".to_string()),
            actor1_geo_adm2_code: None,
            actor1_geo_lat: Some(39.828175),
            actor1_geo_long: Some(-98.5795),
            actor1_geo_feature_id: Some("US".to_string()),
            actor2_geo_type: Some(1),
            actor2_geo_fullname: Some("France".to_string()),
            actor2_geo_country_code: Some("FR".to_string()),
            actor2_geo_adm1_code: Some("FR".to_string()),
            actor2_geo_adm2_code: None,
            actor2_geo_lat: Some(46.0),
            actor2_geo_long: Some(2.0),
            actor2_geo_feature_id: Some("FR".to_string()),
            event_geo_type: Some(1),
            event_geo_fullname: Some("France".to_string()),
            event_geo_country_code: Some("FR".to_string()),
            event_geo_adm1_code: Some("FR".to_string()),
            event_geo_adm2_code: None,
            event_geo_lat: Some(46.0),
            event_geo_long: Some(2.0),
            event_geo_feature_id: Some("FR".to_string()),
            date_added: date_added.to_string(),
            source_url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::event;

    #[test]
    fn news_date_is_first_eight_characters() {
        let record = event(1, "20230101", "20230101061500", "u1");
        assert_eq!(record.news_date(), "20230101");
    }

    #[test]
    fn news_date_of_short_timestamp_is_whole_value() {
        let record = event(1, "20230101", "202301", "u1");
        assert_eq!(record.news_date(), "202301");
    }
}
