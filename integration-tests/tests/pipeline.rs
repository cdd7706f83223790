use integration_tests::{access_line, impression_sample};
use logtally_core::field::parse_format;
use logtally_core::{RunConfig, process, run};
use pretty_assertions::assert_eq;

fn grouping_config() -> RunConfig {
    RunConfig {
        aggregate: true,
        ..RunConfig::default()
    }
}

#[test]
fn impressions_group_into_two_buckets() {
    // Arrange
    let input = impression_sample();
    let fields = parse_format(r#"["referrer", "query.type"]"#).unwrap();

    // Act
    let result = process(&input, fields, &grouping_config());

    // Assert
    assert_eq!(result.len(), 2);

    let rows: Vec<(String, String, u64)> = result
        .records()
        .map(|r| (r.cells[0].display(), r.cells[1].display(), r.count))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("-".to_string(), "IMPRESSION".to_string(), 4),
            ("-".to_string(), "".to_string(), 6),
        ]
    );
}

#[test]
fn table_output_for_impression_sample() {
    // Act
    let output = run(&impression_sample(), "referrer,query.type", &grouping_config()).unwrap();

    // Assert
    let expected = "\
referrer query.type count
       - IMPRESSION 4
       -            6
";
    assert_eq!(output, expected);
}

#[test]
fn csv_output_matches_table_data() {
    // Arrange
    let config = RunConfig {
        csv: true,
        ..grouping_config()
    };

    // Act
    let output = run(&impression_sample(), "referrer,query.type", &config).unwrap();

    // Assert
    let expected = "\
referrer,query.type,count
-,IMPRESSION,4
-,,6
";
    assert_eq!(output, expected);
}

#[test]
fn unmatched_lines_never_reach_a_group() {
    // Arrange: valid lines mixed with junk and a bad timestamp.
    let mut input = impression_sample();
    input.push_str("\nthis is not an access log line\n");
    input.push_str(&access_line(
        "10.0.1.22",
        "not a timestamp",
        "GET / HTTP/1.1",
        "-",
        "curl/8.4.0",
    ));

    let fields = parse_format("referrer").unwrap();

    // Act
    let result = process(&input, fields, &grouping_config());

    // Assert: counts still sum to the ten matched lines.
    let total: u64 = result.records().map(|r| r.count).sum();
    assert_eq!(total, 10);
}

#[test]
fn hour_buckets_merge_lines_within_the_hour() {
    // Arrange: same UTC hour, different minutes.
    let lines = [
        access_line(
            "10.0.1.22",
            "10/Oct/2023:13:55:36 -0700",
            "GET / HTTP/1.1",
            "-",
            "curl/8.4.0",
        ),
        access_line(
            "10.0.1.22",
            "10/Oct/2023:13:02:01 -0700",
            "GET / HTTP/1.1",
            "-",
            "curl/8.4.0",
        ),
    ]
    .join("\n");

    let config = RunConfig {
        hours: true,
        ..grouping_config()
    };

    // Act
    let output = run(&lines, "timestamp", &config).unwrap();

    // Assert: one group at the top of the UTC hour.
    let expected = concat!(
        "                timestamp count\n",
        "2023-10-10T20:00:00+00:00 2\n",
    );
    assert_eq!(output, expected);
}

#[test]
fn mean_aggregate_end_to_end() {
    // Arrange: latency query parameter reported as a per-group mean.
    let lines = [
        access_line(
            "10.0.1.22",
            "10/Oct/2023:13:55:36 -0700",
            "GET /?latency=10 HTTP/1.1",
            "-",
            "curl/8.4.0",
        ),
        access_line(
            "10.0.1.22",
            "10/Oct/2023:13:55:37 -0700",
            "GET /?latency=21 HTTP/1.1",
            "-",
            "curl/8.4.0",
        ),
    ]
    .join("\n");

    // Act
    let output = run(&lines, "referrer,query.latency=mean", &grouping_config()).unwrap();

    // Assert
    let expected = "\
referrer query.latency count
       -          15.5 2
";
    assert_eq!(output, expected);
}

#[test]
fn flat_mode_passes_each_line_through() {
    // Arrange: aggregation off.
    let output = run(
        &impression_sample(),
        "referrer,query.type",
        &RunConfig::default(),
    )
    .unwrap();

    // Assert: ten rows plus header.
    assert_eq!(output.lines().count(), 11);
}

#[test]
fn bad_format_spec_is_a_usage_error() {
    let err = run("", "", &grouping_config()).unwrap_err();

    assert!(err.to_string().contains("format specification"));
}
