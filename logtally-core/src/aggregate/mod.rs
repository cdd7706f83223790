//! Grouping and mean aggregation.
//!
//! Records are partitioned by the resolved values of the non-aggregate
//! fields. The group key is structural - an ordered tuple with element-wise
//! equality and hashing - never a serialized blob, so delimiter reuse in
//! values cannot collide two groups.

#[cfg(test)]
mod tests;

use crate::config::RunConfig;
use crate::enrich::ParsedRequest;
use crate::field::{FieldSpec, resolve};
use std::cell::Cell;
use std::collections::HashMap;

/// Ordered tuple of resolved non-aggregate field values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(pub Vec<String>);

impl FromIterator<String> for GroupKey {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Append-only sample sequence with a lazily cached arithmetic mean.
#[derive(Debug, Default)]
pub struct MeanAggregator {
    samples: Vec<i64>,
    /// Sample count at last computation plus the mean computed then. A
    /// stale count invalidates the cache, so appends never serve old means.
    cache: Cell<Option<(usize, f64)>>,
}

impl MeanAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: i64) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        if let Some((count, mean)) = self.cache.get() {
            if count == self.samples.len() {
                return mean;
            }
        }

        let sum: i64 = self.samples.iter().sum();
        let mean = sum as f64 / self.samples.len() as f64;
        self.cache.set(Some((self.samples.len(), mean)));
        mean
    }

    /// Mean rounded to two decimal digits, with at least one decimal shown:
    /// `[1, 2, 3]` renders as `2.0`, `[1, 2]` as `1.5`.
    pub fn display(&self) -> String {
        let rounded = (self.mean() * 100.0).round() / 100.0;
        let mut out = format!("{rounded:.2}");

        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.push('0');
        }

        out
    }
}

/// One output cell: either an identity-display value or a running mean.
/// Which one a field is was decided at FieldSpec parse time.
#[derive(Debug)]
pub enum CellValue {
    Display(String),
    Mean(MeanAggregator),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            CellValue::Display(value) => value.clone(),
            CellValue::Mean(agg) => agg.display(),
        }
    }
}

/// One group (or, in flat mode, one line). Mutated only by incrementing
/// `count` and appending to mean cells; key and display values are fixed
/// at creation.
#[derive(Debug)]
pub struct GroupRecord {
    pub key: GroupKey,
    /// Cells aligned with the configured field order.
    pub cells: Vec<CellValue>,
    pub count: u64,
}

/// Groups in first-seen order, together with the field list that shaped
/// them. Built once per run, then rendered and discarded.
#[derive(Debug)]
pub struct ResultSet {
    pub fields: Vec<FieldSpec>,
    records: Vec<GroupRecord>,
}

impl ResultSet {
    pub fn records(&self) -> impl Iterator<Item = &GroupRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Partitions enriched requests into groups.
pub struct Aggregator {
    fields: Vec<FieldSpec>,
    /// Flat mode: one ungrouped record per line, no counting, no means.
    flat: bool,
    records: Vec<GroupRecord>,
    index: HashMap<GroupKey, usize>,
}

impl Aggregator {
    pub fn new(fields: Vec<FieldSpec>, config: &RunConfig) -> Self {
        Self {
            fields,
            flat: !config.aggregate,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn observe(&mut self, request: &ParsedRequest) {
        if self.flat {
            self.observe_flat(request);
        } else {
            self.observe_grouped(request);
        }
    }

    fn observe_flat(&mut self, request: &ParsedRequest) {
        let cells: Vec<CellValue> = self
            .fields
            .iter()
            .map(|field| CellValue::Display(resolve(request, &field.path)))
            .collect();

        self.records.push(GroupRecord {
            key: GroupKey(Vec::new()),
            cells,
            count: 1,
        });
    }

    fn observe_grouped(&mut self, request: &ParsedRequest) {
        let key: GroupKey = self
            .fields
            .iter()
            .filter(|field| !field.aggregate)
            .map(|field| resolve(request, &field.path))
            .collect();

        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let cells: Vec<CellValue> = self
                    .fields
                    .iter()
                    .map(|field| {
                        if field.aggregate {
                            CellValue::Mean(MeanAggregator::new())
                        } else {
                            CellValue::Display(resolve(request, &field.path))
                        }
                    })
                    .collect();

                let idx = self.records.len();
                self.records.push(GroupRecord {
                    key: key.clone(),
                    cells,
                    count: 0,
                });
                self.index.insert(key, idx);
                idx
            }
        };

        let record = &mut self.records[idx];
        record.count += 1;

        for (field, cell) in self.fields.iter().zip(record.cells.iter_mut()) {
            if let CellValue::Mean(agg) = cell {
                // Non-numeric values count as zero samples, not errors.
                let sample = resolve(request, &field.path).trim().parse().unwrap_or(0);
                agg.push(sample);
            }
        }
    }

    pub fn finish(self) -> ResultSet {
        ResultSet {
            fields: self.fields,
            records: self.records,
        }
    }
}
