//! Output rendering. Both renderers walk the same [`ResultSet`] in the
//! same record order, so table and CSV output always agree row for row.

mod csv;
mod table;

#[cfg(test)]
mod tests;

pub use self::csv::render_csv;
pub use self::table::render_table;

use crate::aggregate::ResultSet;
use crate::config::RunConfig;

/// Render per the configured output mode.
pub fn render(result: &ResultSet, config: &RunConfig) -> String {
    if config.csv {
        render_csv(result)
    } else {
        render_table(result, config.quiet)
    }
}
