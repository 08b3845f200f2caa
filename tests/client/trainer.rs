//! Tests for Client's trainer entry points.

use mockito::Matcher;
use serde_json::json;
use trainerdex::{
    error::ValidationError, Error, Faction, NewTrainer, TrainerFilter, TrainerId, UserId,
};

use super::*;

/// Tests fetching a trainer and decoding its wire fields.
///
/// Expected: canonical fields populated from legacy wire names
#[tokio::test]
async fn gets_trainer() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let trainer = test.api().with_mock_trainer(1, 10, "Ash");
    let endpoint = test.api().create_trainer_endpoint(1, &trainer, 1);

    let trainer = client(&test).get_trainer(TrainerId(1)).await?;

    endpoint.assert();
    assert_eq!(trainer.username(), Some("Ash"));
    assert_eq!(trainer.faction(), Some(Faction::Mystic));
    assert_eq!(trainer.trainer_code(), Some("123456789012"));
    assert_eq!(trainer.owner_id(), UserId(10));
    assert!(trainer.is_verified());
    assert!(trainer.is_visible());
    assert!(!trainer.is_banned());
    assert_eq!(trainer.start_date().map(|date| date.to_string()), Some("2016-07-13".into()));

    Ok(())
}

/// Tests that a missing trainer is reported as NotFound.
///
/// Expected: Err(NotFound) with status 404
#[tokio::test]
async fn missing_trainer() {
    let mut test = TestSetup::new().await;
    let endpoint = test.api().create_error_endpoint("GET", "/trainers/99/", 404, 1);

    let result = client(&test).get_trainer(TrainerId(99)).await;

    endpoint.assert();
    assert!(matches!(result, Err(Error::NotFound { status: 404, .. })));
}

/// Tests that trainer filters are sent as query parameters.
///
/// Expected: GET /trainers/?t=2&q=ash
#[tokio::test]
async fn lists_trainers_with_filter() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let body = json!([
        test.api().with_mock_trainer(1, 10, "Ash"),
        test.api().with_mock_trainer(2, 11, "Ashley"),
    ]);
    let endpoint = test
        .server
        .mock("GET", "/api/v1/trainers/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("t".into(), "2".into()),
            Matcher::UrlEncoded("q".into(), "ash".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create();

    let filter = TrainerFilter {
        faction: Some(Faction::Valor),
        query: Some("ash".to_string()),
    };
    let trainers = client(&test).get_trainers(filter).await?;

    endpoint.assert();
    assert_eq!(trainers.len(), 2);
    assert_eq!(trainers[1].trainer_id(), TrainerId(2));

    Ok(())
}

/// Tests that searching by nickname requires exactly one match.
///
/// Expected: one match is Ok, two matches are NotFound
#[tokio::test]
async fn searches_trainer_by_nickname() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let one = json!([test.api().with_mock_trainer(1, 10, "Ash")]);
    let two = json!([
        test.api().with_mock_trainer(1, 10, "Ash"),
        test.api().with_mock_trainer(2, 11, "Ashley"),
    ]);
    let single = test.api().create_endpoint("GET", "/trainers/", 200, &one, 1);
    let ambiguous = test.api().create_endpoint("GET", "/trainers/", 200, &two, 1);
    let client = client(&test);

    let found = client.search_trainer("ash").await?;
    let result = client.search_trainer("ash").await;

    single.assert();
    ambiguous.assert();
    assert_eq!(found.trainer_id(), TrainerId(1));
    assert!(result.is_err_and(|error| error.is_not_found()));

    Ok(())
}

/// Tests that creating a trainer sends the legacy wire names.
///
/// Expected: POST /trainers/ with `verified` and `statistics`
#[tokio::test]
async fn creates_trainer() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let response = test.api().with_mock_trainer(1, 10, "Ash");
    let endpoint = test
        .server
        .mock("POST", "/api/v1/trainers/")
        .match_body(Matcher::PartialJson(json!({
            "owner": 10,
            "faction": 1,
            "trainer_code": "123456789012",
            "verified": true,
            "statistics": true,
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(response.to_string())
        .expect(1)
        .create();

    let new = NewTrainer {
        trainer_code: Some("1234 5678 9012".to_string()),
        ..NewTrainer::new(UserId(10), Faction::Mystic)
    };
    let trainer = client(&test).create_trainer(new).await?;

    endpoint.assert();
    assert_eq!(trainer.trainer_id(), TrainerId(1));

    Ok(())
}

/// Tests that a malformed trainer code is rejected before any request.
///
/// Expected: Err(Validation(MalformedTrainerCode)) and no POST
#[tokio::test]
async fn create_trainer_rejects_malformed_code() {
    let mut test = TestSetup::new().await;
    let endpoint = test.api().create_error_endpoint("POST", "/trainers/", 500, 0);

    let new = NewTrainer {
        trainer_code: Some("12ab".to_string()),
        ..NewTrainer::new(UserId(10), Faction::Valor)
    };
    let result = client(&test).create_trainer(new).await;

    endpoint.assert();
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::MalformedTrainerCode(_)))
    ));
}
