//! Field specifications and dot-path resolution.
//!
//! A format specification names the output columns. Two equivalent surface
//! syntaxes are accepted:
//!
//! - comma-separated: `referrer,query.type,latency=mean`
//! - JSON array:      `["referrer", "query.type"]`
//!
//! A `=<flag>` suffix marks the field as a numeric mean aggregate instead
//! of a grouping field.


use crate::enrich::ParsedRequest;
use crate::error::TallyError;

/// One output column: a dot-path plus its aggregate marking, decided once
/// at parse time and carried through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub path: String,
    pub aggregate: bool,
}

impl FieldSpec {
    fn from_token(token: &str, spec: &str) -> Result<Self, TallyError> {
        let (path, flag) = match token.split_once('=') {
            Some((path, flag)) => (path.trim(), flag.trim()),
            None => (token.trim(), ""),
        };

        if path.is_empty() {
            return Err(TallyError::bad_format(spec, "empty field name"));
        }

        Ok(Self {
            path: path.to_string(),
            aggregate: !flag.is_empty(),
        })
    }
}

/// Parse a format specification into its ordered field list.
pub fn parse_format(spec: &str) -> Result<Vec<FieldSpec>, TallyError> {
    let trimmed = spec.trim();

    if trimmed.is_empty() {
        return Err(TallyError::EmptyFormat);
    }

    let tokens: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)
            .map_err(|e| TallyError::bad_format(spec, format!("not a JSON string array: {e}")))?
    } else {
        trimmed.split(',').map(str::to_string).collect()
    };

    if tokens.is_empty() {
        return Err(TallyError::EmptyFormat);
    }

    tokens
        .iter()
        .map(|token| FieldSpec::from_token(token, spec))
        .collect()
}

/// Evaluate a dot-path against an enriched request.
///
/// Any miss - unknown attribute, absent optional, missing query key, or a
/// segment descending into a non-map value - yields the empty string.
/// Resolution never fails.
pub fn resolve(request: &ParsedRequest, path: &str) -> String {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    if head == "query" {
        let Some(key) = rest else {
            return String::new();
        };
        // Query values are plain strings; a deeper segment cannot match.
        if key.contains('.') {
            return String::new();
        }
        return request.query.get(key).cloned().unwrap_or_default();
    }

    // Every attribute except `query` is a scalar; trailing segments miss.
    if rest.is_some() {
        return String::new();
    }

    match head {
        "ip_address" => request.ip_address.clone(),
        "timestamp" => request.timestamp.to_rfc3339(),
        "uri" => request.uri.clone(),
        "status" => request.status.clone(),
        "referrer" => request.referrer.clone(),
        "user_agent" => request.user_agent.clone(),
        "placement_id" => request.placement_id.clone().unwrap_or_default(),
        "browser" => request.browser.clone().unwrap_or_default(),
        "platform" => request.platform.clone().unwrap_or_default(),
        _ => String::new(),
    }
}
