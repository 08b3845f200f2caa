//! Tests for HttpConnector request headers, status mapping and retries.

use std::time::Duration;

use mockito::Matcher;
use trainerdex::{connector::retry::RetryPolicy, Connector, Error, HttpConnector, TrainerId};
use trainerdex_test_utils::prelude::*;

fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: Duration::from_millis(1),
    }
}

/// Tests that the token and user agent are sent with every request.
///
/// Expected: Authorization `Token test-token` and the crate user agent
#[tokio::test]
async fn sends_token_and_user_agent() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let trainer = test.api().with_mock_trainer(1, 10, "Ash");
    let endpoint = test
        .server
        .mock("GET", "/api/v1/trainers/1/")
        .match_header("authorization", format!("Token {TEST_TOKEN}").as_str())
        .match_header("user-agent", Matcher::Regex("^trainerdex-rs/".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(trainer.to_string())
        .expect(1)
        .create();

    let connector: HttpConnector = test.connector();
    let record = connector.get_trainer(TrainerId(1)).await?;

    endpoint.assert();
    assert_eq!(record.get("username").and_then(|v| v.as_str()), Some("Ash"));

    Ok(())
}

/// Tests that a connector without a token sends no Authorization header.
///
/// Expected: request without Authorization
#[tokio::test]
async fn anonymous_requests_omit_token() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let trainer = test.api().with_mock_trainer(1, 10, "Ash");
    let endpoint = test
        .server
        .mock("GET", "/api/v1/trainers/1/")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(trainer.to_string())
        .expect(1)
        .create();

    let connector = HttpConnector::new(&test.server.url(), None);
    connector.get_trainer(TrainerId(1)).await?;

    endpoint.assert();

    Ok(())
}

/// Tests that 502 responses are retried until the service recovers.
///
/// Expected: two failed attempts then success
#[tokio::test]
async fn retries_bad_gateway() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let failing = test.api().create_error_endpoint("GET", "/trainers/1/", 502, 2);
    let trainer = test.api().with_mock_trainer(1, 10, "Ash");
    let recovered = test.api().create_trainer_endpoint(1, &trainer, 1);

    let connector: HttpConnector = test.connector();
    let connector = connector.with_retry(fast_retry(3));
    connector.get_trainer(TrainerId(1)).await?;

    failing.assert();
    recovered.assert();

    Ok(())
}

/// Tests that retries stop after the configured number of attempts.
///
/// Expected: Err(RequestFailed) with status 500 after two attempts
#[tokio::test]
async fn gives_up_after_max_attempts() {
    let mut test = TestSetup::new().await;
    let failing = test.api().create_error_endpoint("GET", "/trainers/1/", 500, 2);

    let connector: HttpConnector = test.connector();
    let connector = connector.with_retry(fast_retry(2));
    let result = connector.get_trainer(TrainerId(1)).await;

    failing.assert();
    assert!(matches!(result, Err(Error::RequestFailed { status: 500, .. })));
}

/// Tests that permission errors are not retried.
///
/// Expected: Err(Forbidden) after a single attempt
#[tokio::test]
async fn forbidden_is_not_retried() {
    let mut test = TestSetup::new().await;
    let endpoint = test.api().create_error_endpoint("GET", "/users/", 403, 1);

    let connector: HttpConnector = test.connector();
    let connector = connector.with_retry(fast_retry(5));
    let result = connector.get_users().await;

    endpoint.assert();
    assert!(matches!(result, Err(Error::Forbidden { status: 403, .. })));
    assert_eq!(result.unwrap_err().status(), Some(403));
}

/// Tests that a non-object body for a single record is a decode error.
///
/// Expected: Err(Decode)
#[tokio::test]
async fn rejects_non_object_records() {
    let mut test = TestSetup::new().await;
    let body = serde_json::json!([1, 2, 3]);
    let endpoint = test.api().create_endpoint("GET", "/trainers/1/", 200, &body, 1);

    let connector: HttpConnector = test.connector();
    let result = connector.get_trainer(TrainerId(1)).await;

    endpoint.assert();
    assert!(matches!(result, Err(Error::Decode(_))));
}
