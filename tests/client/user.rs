//! Tests for Client's user entry points.

use mockito::Matcher;
use serde_json::json;
use trainerdex::{Error, TrainerId, UserId};

use super::*;

/// Tests fetching a user and resolving their trainer.
///
/// Expected: one GET of the user and one of the trainer
#[tokio::test]
async fn gets_user_and_trainer() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let user = test.api().with_mock_user(10, "ash", Some(1));
    let user_endpoint = test.api().create_user_endpoint(10, &user, 1);
    let trainer = test.api().with_mock_trainer(1, 10, "Ash");
    let trainer_endpoint = test.api().create_trainer_endpoint(1, &trainer, 1);

    let user = client(&test).get_user(UserId(10)).await?;
    let trainer = user.trainer().await?;

    user_endpoint.assert();
    trainer_endpoint.assert();
    assert_eq!(user.username(), "ash");
    assert_eq!(trainer.map(|trainer| trainer.trainer_id()), Some(TrainerId(1)));

    Ok(())
}

/// Tests listing users.
///
/// Expected: every record decoded
#[tokio::test]
async fn lists_users() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let body = json!([
        test.api().with_mock_user(10, "ash", Some(1)),
        test.api().with_mock_user(11, "misty", None),
    ]);
    let endpoint = test.api().create_endpoint("GET", "/users/", 200, &body, 1);

    let users = client(&test).get_users().await?;

    endpoint.assert();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].trainer_id(), None);

    Ok(())
}

/// Tests creating a user.
///
/// Expected: POST /users/ with username and first name
#[tokio::test]
async fn creates_user() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let response = test.api().with_mock_user(12, "brock", None);
    let endpoint = test
        .server
        .mock("POST", "/api/v1/users/")
        .match_body(Matcher::PartialJson(json!({
            "username": "brock",
            "first_name": "Jay",
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(response.to_string())
        .expect(1)
        .create();

    let user = client(&test).create_user("brock", Some("Jay")).await?;

    endpoint.assert();
    assert_eq!(user.user_id(), UserId(12));

    Ok(())
}
