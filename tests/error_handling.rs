//! Behavior-driven tests for failure handling
//!
//! Unknown inventories fail before any request. Page failures are retried a
//! bounded number of times and, once exhausted, fail the whole call without
//! returning what was collected.

mod common;

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use common::{counting_hook, fast_config, listings, network_error, page, raw, ScriptedHttpClient};
use vinventory_core::{
    FailedAttempt, FailedAttemptHook, FetchError, InventoryClient, InventoryError, QueryOptions,
};

// =============================================================================
// Configuration errors
// =============================================================================

#[tokio::test]
async fn unknown_inventory_fails_without_any_request() {
    let http = ScriptedHttpClient::new([page(listings("XX", 0, 5, "my"))]);
    let client = InventoryClient::new(http.clone());

    let error = client
        .fetch_inventory("atlantis", QueryOptions::new().with_model("y"), &fast_config(2))
        .await
        .expect_err("unknown key must fail");

    assert!(error.is_configuration());
    assert!(error.to_string().contains("atlantis"));
    assert_eq!(http.request_count(), 0);
}

#[test]
fn unknown_inventory_is_reported_by_plan_synchronously() {
    let http = ScriptedHttpClient::new([]);
    let client = InventoryClient::new(http.clone());

    let error = client
        .plan("", QueryOptions::new())
        .expect_err("blank key must fail");

    assert!(matches!(error, InventoryError::UnknownInventory { .. }));
    assert_eq!(http.request_count(), 0);
}

// =============================================================================
// Retry behavior
// =============================================================================

#[tokio::test]
async fn transient_failures_within_budget_are_recovered() {
    // Given: the first page fails twice, then succeeds; retries = 2
    let http = ScriptedHttpClient::new([
        network_error("connection reset"),
        raw(503, "Service Unavailable"),
        page(listings("US", 0, 7, "my")),
    ]);
    let client = InventoryClient::new(http.clone());
    let (hook, failures) = counting_hook();
    let config = fast_config(2).on_failed_attempt(hook);

    // When
    let items = client
        .fetch_inventory("us", QueryOptions::new().with_model("y"), &config)
        .await
        .expect("third attempt succeeds");

    // Then: hook saw exactly the two failures
    assert_eq!(items.len(), 7);
    assert_eq!(failures.load(Ordering::SeqCst), 2);
    assert_eq!(http.request_count(), 3);
}

#[tokio::test]
async fn retries_reuse_the_same_url() {
    let http = ScriptedHttpClient::new([
        network_error("timeout"),
        page(listings("US", 0, 1, "my")),
    ]);
    let client = InventoryClient::new(http.clone());

    client
        .fetch_inventory("us", QueryOptions::new().with_model("y"), &fast_config(1))
        .await
        .expect("second attempt succeeds");

    let requests = http.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, requests[1].url);
}

#[tokio::test]
async fn exhausted_retries_fail_the_call_and_stop_pagination() {
    // Given: page one succeeds, page two never does
    let http = ScriptedHttpClient::new([
        page(listings("US", 0, 50, "my")),
        network_error("reset 1"),
        network_error("reset 2"),
        network_error("reset 3"),
        page(listings("US", 50, 5, "my")),
    ]);
    let client = InventoryClient::new(http.clone());
    let (hook, failures) = counting_hook();
    let config = fast_config(2).on_failed_attempt(hook);

    let error = client
        .fetch_inventory("us", QueryOptions::new().with_model("y"), &config)
        .await
        .expect_err("page two is exhausted");

    // Then: no partial result, no further request after the last attempt
    match error {
        InventoryError::Fetch {
            offset,
            attempts,
            source,
        } => {
            assert_eq!(offset, 50);
            assert_eq!(attempts, 3);
            assert_eq!(source, FetchError::Transport(vinventory_core::HttpError::new("reset 3")));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(failures.load(Ordering::SeqCst), 3);
    assert_eq!(http.request_count(), 4);
}

#[tokio::test]
async fn zero_retries_means_a_single_attempt() {
    let http = ScriptedHttpClient::new([
        raw(500, "oops"),
        page(listings("US", 0, 1, "my")),
    ]);
    let client = InventoryClient::new(http.clone());

    let error = client
        .fetch_inventory("us", QueryOptions::new().with_model("y"), &fast_config(0))
        .await
        .expect_err("no retry allowed");

    assert_eq!(http.request_count(), 1);
    assert_eq!(error.body(), Some("oops"));
}

#[tokio::test]
async fn hook_receives_attempt_numbers_and_remaining_retries() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();
    let hook: FailedAttemptHook = Arc::new(move |attempt: &FailedAttempt<'_>| {
        recorder.lock().expect("lock").push((
            attempt.attempt_number,
            attempt.retries_left,
            attempt.error.code(),
        ));
    });
    let http = ScriptedHttpClient::new([
        raw(502, "bad gateway"),
        raw(200, "not json"),
        network_error("reset"),
    ]);
    let client = InventoryClient::new(http.clone());

    client
        .fetch_inventory("us", QueryOptions::new().with_model("y"), &fast_config(2).on_failed_attempt(hook))
        .await
        .expect_err("all attempts fail");

    assert_eq!(
        *seen.lock().expect("lock"),
        vec![
            (1, 2, "fetch.status"),
            (2, 1, "fetch.parse"),
            (3, 0, "fetch.transport"),
        ]
    );
}

// =============================================================================
// Parse failures
// =============================================================================

#[tokio::test]
async fn invalid_json_error_carries_the_exact_body() {
    let body = "<html><body>Access Denied</body></html>\n";
    let http = ScriptedHttpClient::new([raw(200, body), raw(200, body)]);
    let client = InventoryClient::new(http.clone());

    let error = client
        .fetch_inventory("us", QueryOptions::new().with_model("y"), &fast_config(1))
        .await
        .expect_err("html is not json");

    assert_eq!(error.body(), Some(body));
    assert!(matches!(
        error,
        InventoryError::Fetch {
            source: FetchError::Parse { .. },
            attempts: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn parse_failure_is_retried_like_any_other_failure() {
    let http = ScriptedHttpClient::new([
        raw(200, "{\"results\": ["),
        page(listings("US", 0, 2, "my")),
    ]);
    let client = InventoryClient::new(http.clone());

    let items = client
        .fetch_inventory("us", QueryOptions::new().with_model("y"), &fast_config(1))
        .await
        .expect("retry recovers from truncated body");

    assert_eq!(items.len(), 2);
}
