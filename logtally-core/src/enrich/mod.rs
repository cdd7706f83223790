//! Expansion of raw line captures into an enriched request record.
//!
//! The enricher owns everything derived from a matched line: the request
//! path and its query parameters, the optional placement identifier, the
//! UTC-normalized (and optionally bucketed) timestamp, and - when enabled -
//! browser/platform derived from the user-agent string.

pub mod user_agent;


use crate::config::{RunConfig, TimeBucket};
use crate::enrich::user_agent::UaEngine;
use crate::parse::MatchedFields;
use chrono::{DateTime, Timelike, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

static PLACEMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/placements/(?P<placement_id>[0-9]+)").expect("placement pattern must compile")
});

/// One access-log line after enrichment. Immutable once built.
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    pub ip_address: String,
    pub status: String,
    pub referrer: String,
    pub user_agent: String,

    /// The request target exactly as it appeared in the request line.
    pub uri: String,

    /// Query parameters in first-seen key order; duplicate names are
    /// last-wins.
    pub query: IndexMap<String, String>,

    /// Digits captured from a `/placements/<digits>` path segment.
    pub placement_id: Option<String>,

    pub browser: Option<String>,
    pub platform: Option<String>,

    /// UTC-normalized, optionally truncated to the hour or day.
    pub timestamp: DateTime<Utc>,
}

pub struct Enricher {
    bucket: TimeBucket,
    ua_engine: Option<UaEngine>,
}

impl Enricher {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            bucket: config.time_bucket(),
            ua_engine: config.enrich_user_agent.then(UaEngine::new),
        }
    }

    /// Expand raw captures into a [`ParsedRequest`].
    ///
    /// Returns `None` when the bracketed timestamp does not parse; the
    /// caller drops the line exactly as it would an unmatched one.
    pub fn enrich(&self, matched: MatchedFields) -> Option<ParsedRequest> {
        let timestamp = match DateTime::parse_from_str(&matched.timestamp_raw, TIMESTAMP_FORMAT) {
            Ok(ts) => truncate(ts.with_timezone(&Utc), self.bucket),
            Err(err) => {
                tracing::debug!(
                    timestamp = %matched.timestamp_raw,
                    %err,
                    "dropping line with unparseable timestamp"
                );
                return None;
            }
        };

        let uri = request_target(&matched.request_line);
        let (path, raw_query) = split_target(&uri);
        let query = parse_query(raw_query.as_deref());

        let placement_id = PLACEMENT_PATTERN
            .captures(&path)
            .map(|caps| caps["placement_id"].to_string());

        let ua_info = self
            .ua_engine
            .as_ref()
            .map(|engine| engine.parse(&matched.user_agent))
            .unwrap_or_default();

        Some(ParsedRequest {
            ip_address: matched.ip_address,
            status: matched.status,
            referrer: matched.referrer,
            user_agent: matched.user_agent,
            uri,
            query,
            placement_id,
            browser: ua_info.browser,
            platform: ua_info.platform,
            timestamp,
        })
    }
}

/// Second whitespace-separated token of the request line, i.e. the target
/// of `METHOD target PROTOCOL`. Falls back to the whole line when the
/// request line has no second token.
fn request_target(request_line: &str) -> String {
    request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or(request_line)
        .to_string()
}

/// Split a request target into path and raw query string.
///
/// Absolute targets (proxy-style logs) go through the `url` crate so the
/// host never leaks into the path; origin-form targets split on the first
/// `?` directly.
fn split_target(target: &str) -> (String, Option<String>) {
    match Url::parse(target) {
        Ok(parsed) => (
            parsed.path().to_string(),
            parsed.query().map(str::to_string),
        ),
        Err(_) => match target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query.to_string())),
            None => (target.to_string(), None),
        },
    }
}

/// Decode a raw query string into an ordered map. Pairs split on the first
/// `=`; a pair without `=` maps to the empty string; repeated names are
/// last-wins.
fn parse_query(raw: Option<&str>) -> IndexMap<String, String> {
    let Some(raw) = raw else {
        return IndexMap::new();
    };

    let mut query = IndexMap::new();

    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name, value),
            None => (pair, ""),
        };
        query.insert(name.to_string(), value.to_string());
    }

    query
}

/// Zero out sub-bucket components. Day truncation subsumes hour truncation.
fn truncate(ts: DateTime<Utc>, bucket: TimeBucket) -> DateTime<Utc> {
    let truncated = match bucket {
        TimeBucket::None => Some(ts),
        TimeBucket::Hour => ts
            .with_nanosecond(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_minute(0)),
        TimeBucket::Day => ts
            .with_nanosecond(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_hour(0)),
    };

    // with_* only fails for out-of-range values; 0 is always in range.
    truncated.unwrap_or(ts)
}
