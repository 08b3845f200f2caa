//! Tests for User's trainer relation and social connections.

use super::*;

fn mock_user(test: &mut TestSetup, user_id: i64, trainer_id: Option<i64>) -> User {
    let wire = test.api().with_mock_user(user_id, "ash", trainer_id);
    User::from_wire(connector(test), &record(wire)).unwrap()
}

/// Tests that a user without a trainer profile resolves to none without a request.
///
/// Expected: Ok(None)
#[tokio::test]
async fn trainer_absent() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let user = mock_user(&mut test, 10, None);

    assert!(user.trainer().await?.is_none());
    assert!(user.trainer_id().is_none());
    assert_eq!(user.first_name(), Some("Jay"));
    assert_eq!(user.last_name(), None);

    Ok(())
}

/// Tests that the trainer profile is fetched once.
///
/// Expected: one GET /trainers/1/
#[tokio::test]
async fn memoizes_trainer() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let trainer = test.api().with_mock_trainer(1, 10, "Ash");
    let endpoint = test.api().create_trainer_endpoint(1, &trainer, 1);
    let user = mock_user(&mut test, 10, Some(1));

    let first = user.trainer().await?;
    let second = user.trainer().await?;

    endpoint.assert();
    assert_eq!(first.map(|trainer| trainer.trainer_id()), Some(TrainerId(1)));
    assert!(second.is_some());

    Ok(())
}

/// Tests that a failed resolution is reported unchanged and retried on next access.
///
/// Expected: Err(NotFound) then a successful second fetch
#[tokio::test]
async fn failed_resolution_stays_unresolved() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let missing = test.api().create_error_endpoint("GET", "/trainers/1/", 404, 1);
    let user = mock_user(&mut test, 10, Some(1));

    let result = user.trainer().await;

    missing.assert();
    assert!(result.is_err_and(|error| error.is_not_found()));

    let trainer = test.api().with_mock_trainer(1, 10, "Ash");
    let found = test.api().create_trainer_endpoint(1, &trainer, 1);

    assert!(user.trainer().await?.is_some());
    found.assert();

    Ok(())
}

/// Tests that social connections are fetched once and decoded.
///
/// Expected: one GET /users/social/?user=10
#[tokio::test]
async fn caches_social_connections() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let connections = vec![
        test.api().with_mock_social_connection(10, "discord", "319792326958514176", Some(1)),
        test.api().with_mock_social_connection(10, "twitter", "ash", Some(1)),
    ];
    let endpoint = test.api().create_user_social_connections_endpoint(10, &connections, 1);
    let user = mock_user(&mut test, 10, Some(1));

    let first = user.social_connections().await?;
    let second = user.social_connections().await?;

    endpoint.assert();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(first[0].provider(), "discord");
    assert_eq!(first[0].user_id(), UserId(10));

    Ok(())
}

/// Tests that linking an account invalidates the cached connections.
///
/// Expected: PUT /users/social/, then a second GET of the connections
#[tokio::test]
async fn add_discord_invalidates_connections() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let list_before = test.api().create_user_social_connections_endpoint(10, &[], 1);
    let created = test.api().with_mock_social_connection(10, "discord", "42", Some(1));
    let put = test.api().create_endpoint("PUT", "/users/social/", 201, &created, 1);
    let list_after = test
        .api()
        .create_user_social_connections_endpoint(10, &[created.clone()], 1);
    let mut user = mock_user(&mut test, 10, Some(1));

    assert!(user.social_connections().await?.is_empty());
    let connection = user.add_discord("42").await?;
    let after = user.social_connections().await?;

    list_before.assert();
    put.assert();
    list_after.assert();
    assert_eq!(connection.key(), &SocialConnectionKey::new("discord", "42"));
    assert_eq!(after.len(), 1);
    assert_eq!(*after[0], connection);

    Ok(())
}

/// Tests that an edit applies the returned record.
///
/// Expected: PATCH /users/10/; first name replaced
#[tokio::test]
async fn edit_applies_response() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let mut response = test.api().with_mock_user(10, "ash", Some(1));
    response["first_name"] = json!("Satoshi");
    let endpoint = test.api().create_endpoint("PATCH", "/users/10/", 200, &response, 1);
    let mut user = mock_user(&mut test, 10, Some(1));

    user.edit(record(json!({ "first_name": "Satoshi" }))).await?;

    endpoint.assert();
    assert_eq!(user.first_name(), Some("Satoshi"));
    assert_eq!(user.id(), UserId(10));

    Ok(())
}
