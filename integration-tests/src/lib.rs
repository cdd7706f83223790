//! Shared builders for end-to-end pipeline tests.

/// Build one combined-log line from its parts.
pub fn access_line(ip: &str, timestamp: &str, request: &str, referrer: &str, ua: &str) -> String {
    format!(r#"{ip} - - [{timestamp}] "{request}" 200 2326 "{referrer}" "{ua}""#)
}

/// Ten lines with referrer `-`: four carrying `type=IMPRESSION`, six with
/// no `type` parameter, interleaved so first-seen order is IMPRESSION
/// first.
pub fn impression_sample() -> String {
    let mut lines = Vec::new();

    for i in 0..10 {
        let request = if i % 2 == 0 && i < 8 {
            "GET /ad_tags/926000/test?type=IMPRESSION HTTP/1.1"
        } else {
            "GET /ad_tags/926000/test HTTP/1.1"
        };
        lines.push(access_line(
            "10.0.1.22",
            "10/Oct/2023:13:55:36 -0700",
            request,
            "-",
            "curl/8.4.0",
        ));
    }

    lines.join("\n")
}
