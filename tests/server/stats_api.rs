use reqwest::Client;
use serde_json::Value;

use crate::helpers::spawn_app;

const STATS_FIXTURE: &str = r#"{
    "brightness_avg": 142.5,
    "contrast_avg": 58.3,
    "dominant_color": [10, 20, 30],
    "text_usage": "Yes"
}"#;

#[tokio::test]
async fn stats_returns_404_without_a_record() {
    let app = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(app.url("/stats"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "no trending statistics available");
}

#[tokio::test]
async fn stats_returns_the_current_record() {
    let app = spawn_app().await;
    app.write_stats(STATS_FIXTURE);
    let client = Client::new();

    let response = client
        .get(app.url("/stats"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["brightness_avg"], 142.5);
    assert_eq!(body["contrast_avg"], 58.3);
    assert_eq!(body["dominant_color"], serde_json::json!([10, 20, 30]));
    assert_eq!(body["text_usage"], "Yes");
}

#[tokio::test]
async fn corrupt_record_reads_as_missing() {
    let app = spawn_app().await;
    app.write_stats("{this is not json");
    let client = Client::new();

    let response = client
        .get(app.url("/stats"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn a_record_written_after_startup_is_picked_up() {
    let app = spawn_app().await;
    let client = Client::new();

    let before = client
        .get(app.url("/stats"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(before.status(), 404);

    app.write_stats(STATS_FIXTURE);

    let after = client
        .get(app.url("/stats"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(after.status(), 200);
}
