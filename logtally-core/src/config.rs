/// Run configuration, resolved once from the CLI before any line is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    /// Suppress the header row in table output.
    pub quiet: bool,

    /// Emit CSV instead of the aligned table.
    pub csv: bool,

    /// Truncate timestamps to the start of their hour.
    pub hours: bool,

    /// Truncate timestamps to the start of their day.
    /// Takes precedence over `hours`: day truncation already zeroes the hour.
    pub days: bool,

    /// Group matched lines and compute per-group means. When false the
    /// pipeline runs in flat mode: one ungrouped record per matched line.
    pub aggregate: bool,

    /// Derive browser/platform from the user-agent string. Off by default;
    /// when off, `browser` and `platform` resolve to the empty string.
    pub enrich_user_agent: bool,
}

impl RunConfig {
    pub fn time_bucket(&self) -> TimeBucket {
        if self.days {
            TimeBucket::Day
        } else if self.hours {
            TimeBucket::Hour
        } else {
            TimeBucket::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    None,
    Hour,
    Day,
}
