//! End-to-end wiring: lines -> parse -> enrich -> aggregate -> render.
//!
//! The input is fully buffered by the caller before processing starts;
//! this is a batch tool, not a streaming one.

use crate::aggregate::{Aggregator, ResultSet};
use crate::config::RunConfig;
use crate::enrich::Enricher;
use crate::error::TallyError;
use crate::field::{FieldSpec, parse_format};
use crate::parse::parse;
use crate::render::render;

/// Group the matched lines of `input` by the configured fields.
///
/// Unmatched lines and lines with unparseable timestamps are dropped
/// silently; they never reach the aggregator.
pub fn process(input: &str, fields: Vec<FieldSpec>, config: &RunConfig) -> ResultSet {
    let enricher = Enricher::new(config);
    let mut aggregator = Aggregator::new(fields, config);

    let mut matched = 0u64;
    let mut dropped = 0u64;

    for line in input.lines() {
        let Some(captures) = parse(line) else {
            dropped += 1;
            continue;
        };

        let Some(request) = enricher.enrich(captures) else {
            dropped += 1;
            continue;
        };

        aggregator.observe(&request);
        matched += 1;
    }

    tracing::debug!(matched, dropped, "processed input");

    aggregator.finish()
}

/// Full run: parse the format specification, process the input, and render
/// per the configured output mode.
pub fn run(input: &str, format_spec: &str, config: &RunConfig) -> Result<String, TallyError> {
    let fields = parse_format(format_spec)?;
    let result = process(input, fields, config);
    Ok(render(&result, config))
}
