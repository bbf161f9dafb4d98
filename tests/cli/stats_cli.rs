use serde_json::Value;

use crate::helpers::{run_thumbgen, spawn_server};

const STATS_FIXTURE: &str = r#"{
    "brightness_avg": 142.5,
    "contrast_avg": 58.3,
    "dominant_color": [10, 20, 30],
    "text_usage": "Yes"
}"#;

#[test]
fn stats_prints_the_current_record_as_json() {
    let server = spawn_server();
    server.write_stats(STATS_FIXTURE);

    let output = run_thumbgen(&["stats"], &[("THUMBGEN_URL", &server.address)]);

    assert!(
        output.status.success(),
        "stats command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let data: Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|_| panic!("Should output valid JSON, got: {stdout}"));

    assert_eq!(data["brightness_avg"], 142.5);
    assert_eq!(data["contrast_avg"], 58.3);
    assert_eq!(data["dominant_color"], serde_json::json!([10, 20, 30]));
    assert_eq!(data["text_usage"], "Yes");
}

#[test]
fn stats_reports_when_no_record_exists() {
    let server = spawn_server();

    let output = run_thumbgen(&["stats"], &[("THUMBGEN_URL", &server.address)]);

    assert!(!output.status.success(), "missing stats should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no trending statistics available"),
        "unexpected stderr: {stderr}"
    );
}
