//! Tests for Client's social connection lookups.

use trainerdex::{Error, UserId};

use super::*;

/// Tests looking up several accounts in one request.
///
/// Expected: GET /users/social/?provider=discord&uid=1,2
#[tokio::test]
async fn gets_social_connections() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let connections = vec![
        test.api().with_mock_social_connection(10, "discord", "1", Some(1)),
        test.api().with_mock_social_connection(11, "discord", "2", None),
    ];
    let endpoint = test
        .api()
        .create_social_connections_endpoint("discord", "1,2", &connections, 1);

    let uids = vec!["1".to_string(), "2".to_string()];
    let found = client(&test).get_social_connections("discord", &uids).await?;

    endpoint.assert();
    assert_eq!(found.len(), 2);
    assert_eq!(found[1].user_id(), UserId(11));
    assert_eq!(found[1].trainer_id(), None);

    Ok(())
}

/// Tests looking up a single account.
///
/// Expected: Some for a linked account, None for an unknown one
#[tokio::test]
async fn gets_single_social_connection() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let linked = vec![test.api().with_mock_social_connection(10, "discord", "1", Some(1))];
    let found_endpoint = test
        .api()
        .create_social_connections_endpoint("discord", "1", &linked, 1);
    let missing_endpoint = test
        .api()
        .create_social_connections_endpoint("discord", "2", &[], 1);
    let client = client(&test);

    let found = client.get_social_connection("discord", "1").await?;
    let missing = client.get_social_connection("discord", "2").await?;

    found_endpoint.assert();
    missing_endpoint.assert();
    assert_eq!(found.map(|connection| connection.user_id()), Some(UserId(10)));
    assert!(missing.is_none());

    Ok(())
}
