use logtally::{aggregate_lines, AnalyzeOpts};
use std::collections::BTreeMap;

fn opts(threshold: usize, top_n: usize) -> AnalyzeOpts {
    AnalyzeOpts::new(threshold, top_n).unwrap()
}

fn pairs(t: &logtally::counter::FrequencyTable) -> Vec<(String, usize)> {
    t.iter().map(|(k, c)| (k.to_string(), c)).collect()
}

#[test]
fn single_combined_line() {
    let lines = ["1.2.3.4 - - [10/Oct/2023:13:55:36] \"GET /index.html HTTP/1.1\" 200 512"];
    let r = aggregate_lines(&lines, &opts(10, 5));
    assert_eq!(pairs(&r.ip_counts), vec![("1.2.3.4".to_string(), 1)]);
    assert_eq!(pairs(&r.endpoint_counts), vec![("/index.html".to_string(), 1)]);
    assert_eq!(pairs(&r.status_counts), vec![("200".to_string(), 1)]);
    assert_eq!(r.hourly_trend, BTreeMap::from([(13, 1)]));
    assert!(r.suspicious_ips.is_empty());
    let top = r.top_endpoint.expect("top endpoint");
    assert_eq!((top.name.as_str(), top.count), ("/index.html", 1));
    assert_eq!(r.total_lines, 1);
}

#[test]
fn eleven_failures_exceed_threshold() {
    let lines: Vec<String> = (0..11)
        .map(|i| format!("9.9.9.9 - - [10/Oct/2023:13:{i:02}:00] \"POST /login HTTP/1.1\" 401 0"))
        .collect();
    let r = aggregate_lines(&lines, &opts(10, 5));
    assert_eq!(pairs(&r.suspicious_ips), vec![("9.9.9.9".to_string(), 11)]);
}

#[test]
fn ten_failures_do_not_exceed_threshold() {
    let lines: Vec<String> = (0..10)
        .map(|_| "9.9.9.9 auth: Invalid credentials for admin".to_string())
        .collect();
    let r = aggregate_lines(&lines, &opts(10, 5));
    assert!(r.suspicious_ips.is_empty());
    assert_eq!(r.failed_attempts.get("9.9.9.9"), Some(10));
}

#[test]
fn garbled_month_only_skips_hourly_bucket() {
    let lines = ["4.4.4.4 - - [10/Qqq/2023:13:55:36] \"GET /x HTTP/1.1\" 404 10"];
    let r = aggregate_lines(&lines, &opts(10, 5));
    assert!(r.hourly_trend.is_empty());
    assert_eq!(r.ip_counts.get("4.4.4.4"), Some(1));
    assert_eq!(r.endpoint_counts.get("/x"), Some(1));
    assert_eq!(r.status_counts.get("404"), Some(1));
    assert_eq!(r.timestamp_errors.total, 1);
}

#[test]
fn empty_input_yields_empty_result() {
    let lines: Vec<String> = Vec::new();
    let r = aggregate_lines(&lines, &AnalyzeOpts::default());
    assert!(r.ip_counts.is_empty());
    assert!(r.endpoint_counts.is_empty());
    assert!(r.status_counts.is_empty());
    assert!(r.hourly_trend.is_empty());
    assert!(r.suspicious_ips.is_empty());
    assert!(r.top_endpoint.is_none());
    assert!(r.top_ips().is_empty());
}

fn mixed_log() -> Vec<String> {
    let mut lines = Vec::new();
    for i in 0..40 {
        let ip = format!("10.0.{}.{}", i % 3, i % 7);
        let status = ["200", "401", "404", "500"][i % 4];
        let path = ["/", "/login", "/api/v1/items", "/health"][i % 4];
        let hour = (i * 5) % 24;
        lines.push(format!(
            "{ip} - - [0{}/Mar/2024:{hour:02}:00:00 +0000] \"GET {path} HTTP/1.1\" {status} 99\n",
            1 + i % 9
        ));
    }
    lines.push("no signal on this line\n".into());
    lines.push("[33/Mar/2024:01:00:00] bogus day\n".into());
    lines.push("300.300.300.300 Invalid credentials\n".into());
    lines
}

#[test]
fn ip_total_matches_lines_with_dotted_quads() {
    let lines = mixed_log();
    let r = aggregate_lines(&lines, &opts(2, 5));
    let re = regex::Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").unwrap();
    let with_ip = lines.iter().filter(|l| re.is_match(l)).count();
    assert_eq!(r.ip_counts.total(), with_ip);
}

#[test]
fn suspicious_ips_are_counted_ips_above_threshold() {
    let mut lines = mixed_log();
    lines.extend(std::iter::repeat("10.0.1.1 Invalid credentials\n".to_string()).take(3));
    let r = aggregate_lines(&lines, &opts(2, 5));
    assert_eq!(pairs(&r.suspicious_ips), vec![("10.0.1.1".to_string(), 4)]);
    for (ip, count) in r.suspicious_ips.iter() {
        assert!(r.ip_counts.contains_key(ip), "{ip} missing from ip_counts");
        assert!(count > 2);
    }
}

#[test]
fn hourly_keys_stay_within_a_day() {
    let r = aggregate_lines(&mixed_log(), &AnalyzeOpts::default());
    assert!(r.hourly_trend.keys().all(|h| *h < 24));
    assert_eq!(r.timestamp_errors.total, 1);
}

#[test]
fn top_n_is_bounded_sorted_and_stable() {
    let lines = [
        "1.1.1.1 \"GET /c HTTP/1.1\"",
        "2.2.2.2 \"GET /b HTTP/1.1\"",
        "3.3.3.3 \"GET /a HTTP/1.1\"",
        "2.2.2.2 \"GET /a HTTP/1.1\"",
        "3.3.3.3 \"GET /b HTTP/1.1\"",
    ];
    let r = aggregate_lines(&lines, &opts(10, 2));
    let ips: Vec<(String, usize)> = r.top_ips().into_iter().map(|c| (c.name, c.count)).collect();
    assert_eq!(ips, vec![("2.2.2.2".to_string(), 2), ("3.3.3.3".to_string(), 2)]);
    let eps: Vec<String> = r.top_endpoints().into_iter().map(|c| c.name).collect();
    assert_eq!(eps, vec!["/b", "/a"]);
    assert_eq!(r.top_endpoint.unwrap().name, "/b");

    let wide = aggregate_lines(&lines, &opts(10, 50));
    assert_eq!(wide.top_ips().len(), 3);
}

#[test]
fn aggregation_is_idempotent() {
    let lines = mixed_log();
    let a = aggregate_lines(&lines, &opts(1, 3));
    let b = aggregate_lines(&lines, &opts(1, 3));
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}
