use reqwest::Client;
use serde_json::Value;

use crate::helpers::spawn_app;

#[tokio::test]
async fn root_reports_the_service_banner() {
    let app = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(app.url("/"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["message"], "Thumbnail API is running!");
}

#[tokio::test]
async fn responses_carry_nosniff_header() {
    let app = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(app.url("/"))
        .send()
        .await
        .expect("Failed to execute request");

    let nosniff = response
        .headers()
        .get("x-content-type-options")
        .and_then(|v| v.to_str().ok());
    assert_eq!(nosniff, Some("nosniff"));
}
