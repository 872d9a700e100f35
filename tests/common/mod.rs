//! Shared utilities for integration testing.

use std::time::Duration;

/// Poll until the server answers with a success status, or panic after the
/// deadline.
pub async fn wait_for_server(url: &str) {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    for _ in 0..50 {
        if let Ok(res) = client.get(url).send().await {
            if res.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    panic!("server at {url} did not become ready");
}
