use anyhow::Result;
use clap::Parser;
use logtally_core::logging::init_logging;
use logtally_core::{RunConfig, run};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const PATHSPEC_HELP: &str = "\
Fields are dot-paths into the enriched request record:

    ip_address, timestamp, uri, status, referrer, user_agent,
    placement_id, browser, platform, query.<parameter>

Suffix a field with =<flag> to report its numeric mean per group instead
of grouping by it. Without -a/--extra each matched line passes through as
its own row; with grouping enabled, the format may also be given as a
JSON array:

    logtally -a '[\"referrer\", \"query.type\"]' status.log

produces:

                                     referrer query.type count
                                            - IMPRESSION 4
                                            -            10
    http://localhost:3000/ad_tags/926000/test            5
";

#[derive(Parser, Debug)]
#[command(
    name = "logtally",
    version,
    about = "Group and count access-log lines by field values",
    after_help = PATHSPEC_HELP
)]
struct Cli {
    /// Format specification: comma-separated dot-paths or a JSON array
    format: String,

    /// Input file; reads stdin when omitted
    file: Option<PathBuf>,

    /// Suppress the header row
    #[arg(short, long)]
    quiet: bool,

    /// Emit CSV instead of the aligned table
    #[arg(short, long)]
    csv: bool,

    /// Bucket timestamps by hour
    #[arg(short = 'H', long)]
    hours: bool,

    /// Bucket timestamps by day (takes precedence over --hours)
    #[arg(short, long)]
    days: bool,

    /// Group lines and compute per-group means (default is flat pass-through)
    #[arg(short, long)]
    aggregate: bool,

    /// Like --aggregate, plus browser/platform derivation per line
    #[arg(long)]
    extra: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();

    let config = RunConfig {
        quiet: cli.quiet,
        csv: cli.csv,
        hours: cli.hours,
        days: cli.days,
        aggregate: cli.aggregate || cli.extra,
        enrich_user_agent: cli.extra,
    };

    tracing::debug!(?config, "resolved run configuration");

    match tally(&cli, &config) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("logtally: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn tally(cli: &Cli, config: &RunConfig) -> Result<String> {
    let input = read_input(cli.file.as_deref())?;
    Ok(run(&input, &cli.format, config)?)
}

/// Buffer the whole input up front. File when given, stdin otherwise.
fn read_input(path: Option<&Path>) -> Result<String> {
    use logtally_core::TallyError;

    match path {
        Some(path) => {
            Ok(fs::read_to_string(path).map_err(|e| TallyError::read_input(path, e))?)
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| TallyError::ReadStdin { source: e })?;
            Ok(input)
        }
    }
}
