
use crate::aggregate::{Aggregator, ResultSet};
use crate::config::RunConfig;
use crate::enrich::ParsedRequest;
use crate::field::parse_format;
use chrono::{TimeZone, Utc};
use indexmap::IndexMap;

fn request(referrer: &str, query_type: Option<&str>) -> ParsedRequest {
    let mut query = IndexMap::new();
    if let Some(value) = query_type {
        query.insert("type".to_string(), value.to_string());
    }

    ParsedRequest {
        ip_address: "10.0.1.22".to_string(),
        status: "200".to_string(),
        referrer: referrer.to_string(),
        user_agent: "curl/8.4.0".to_string(),
        uri: "/".to_string(),
        query,
        placement_id: None,
        browser: None,
        platform: None,
        timestamp: Utc.with_ymd_and_hms(2023, 10, 10, 20, 55, 36).unwrap(),
    }
}

/// Two groups: ("-", "IMPRESSION") seen twice, ("-", "") seen once.
fn sample_result() -> ResultSet {
    let fields = parse_format("referrer,query.type").unwrap();
    let config = RunConfig {
        aggregate: true,
        ..RunConfig::default()
    };

    let mut agg = Aggregator::new(fields, &config);
    agg.observe(&request("-", Some("IMPRESSION")));
    agg.observe(&request("-", Some("IMPRESSION")));
    agg.observe(&request("-", None));
    agg.finish()
}
