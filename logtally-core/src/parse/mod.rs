//! Access-log line matching.
//!
//! One fixed combined-log pattern, compiled once. Lines that do not match
//! are dropped by the caller; there is no partial capture.


use once_cell::sync::Lazy;
use regex::Regex;

static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<ip_address>[0-9.]+) - - \[(?P<timestamp>.+?)\] "(?P<request_line>.+?)" (?P<status>[0-9]+) [0-9]+ "(?P<referrer>.+?)" "(?P<user_agent>.+?)""#,
    )
    .expect("access-log pattern must compile")
});

/// Raw captures from one matched access-log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFields {
    pub ip_address: String,
    pub timestamp_raw: String,
    /// The quoted request, e.g. `GET /placements/42?type=IMPRESSION HTTP/1.1`.
    pub request_line: String,
    pub status: String,
    pub referrer: String,
    pub user_agent: String,
}

/// Match one line against the fixed access-log pattern.
///
/// Returns `None` for anything that does not match; no error is reported.
pub fn parse(line: &str) -> Option<MatchedFields> {
    let caps = LINE_PATTERN.captures(line)?;

    Some(MatchedFields {
        ip_address: caps["ip_address"].to_string(),
        timestamp_raw: caps["timestamp"].to_string(),
        request_line: caps["request_line"].to_string(),
        status: caps["status"].to_string(),
        referrer: caps["referrer"].to_string(),
        user_agent: caps["user_agent"].to_string(),
    })
}
