//! Tests for fetching leaderboards through the client.

use serde_json::json;
use trainerdex::{error::SchemaError, Error, Faction, LeaderboardScope, Ranked, UserId};

use super::*;

/// Tests that a fresh global page is summarised over all of its entries.
///
/// Expected: aggregation count equals the number of entries
#[tokio::test]
async fn global_leaderboard_aggregations() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let entries = test.api().with_mock_leaderboard_entries();
    let page = test
        .api()
        .with_mock_leaderboard("Global Leaderboard", "total_xp", entries, None);
    let endpoint = test
        .api()
        .create_leaderboard_endpoint("v1.1", "total_xp", &page, 1);

    let board = client(&test)
        .get_leaderboard("total_xp", LeaderboardScope::Global)
        .await?;

    endpoint.assert();
    assert_eq!(board.len(), 5);
    assert_eq!(board.aggregations().count as usize, board.len());
    assert_eq!(board.title(), Some("Global Leaderboard"));
    assert_eq!(board.stat(), "total_xp");

    Ok(())
}

/// Tests that filtering by team returns a view and keeps the page intact.
///
/// Expected: Mystic entries at positions 1 and 3; page still has 5 entries
#[tokio::test]
async fn filter_teams_keeps_page() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let entries = test.api().with_mock_leaderboard_entries();
    let page = test
        .api()
        .with_mock_leaderboard("Global Leaderboard", "total_xp", entries, None);
    let endpoint = test
        .api()
        .create_leaderboard_endpoint("v1.1", "total_xp", &page, 1);

    let board = client(&test)
        .get_leaderboard("total_xp", LeaderboardScope::Global)
        .await?;
    let mystic = board.filter_teams(&[Faction::Mystic]);

    endpoint.assert();
    let positions: Vec<u64> = mystic.iter().map(|entry| entry.position()).collect();
    assert_eq!(positions, vec![1, 3]);
    assert_eq!(mystic.aggregations().count, 2);
    assert_eq!(board.len(), 5);
    assert_eq!(board.aggregations().count, 5);

    Ok(())
}

/// Tests fetching a guild board with the service's summary.
///
/// Expected: GET /leaderboard/discord/{guild}/{stat}/ and the summary kept
#[tokio::test]
async fn guild_leaderboard() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let entries = test.api().with_mock_leaderboard_entries();
    let summary = json!({ "avg": 3e6, "count": 5, "min": 1e6, "max": 5e6, "sum": 1.5e7 });
    let page = test
        .api()
        .with_mock_leaderboard("Kanto Leaderboard", "total_xp", entries, Some(summary));
    let endpoint = test
        .api()
        .create_leaderboard_endpoint("discord/1234", "total_xp", &page, 1);

    let board = client(&test)
        .get_leaderboard("total_xp", LeaderboardScope::Guild(1234))
        .await?;

    endpoint.assert();
    assert_eq!(board.guild_id(), Some(1234));
    assert_eq!(board.aggregations().avg, 3e6);
    let users = board.filter_users(&[UserId(1001)]);
    assert_eq!(users.top().map(|entry| entry.username()), Some("Trainer1"));

    Ok(())
}

/// Tests fetching a country board.
///
/// Expected: GET /leaderboard/country/NO/badge_capture_total/; country name from the title
#[tokio::test]
async fn country_leaderboard() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let entries = test.api().with_mock_leaderboard_entries();
    let page = test
        .api()
        .with_mock_leaderboard("Norway Leaderboard", "badge_capture_total", entries, None);
    let endpoint = test
        .api()
        .create_leaderboard_endpoint("country/NO", "badge_capture_total", &page, 1);

    let board = client(&test)
        .get_leaderboard("capture_total", LeaderboardScope::Country("NO".to_string()))
        .await?;

    endpoint.assert();
    assert_eq!(board.country_code(), Some("NO"));
    assert_eq!(board.country_name(), Some("Norway"));
    assert_eq!(board.stat(), "capture_total");

    Ok(())
}

/// Tests that a community board sent as a bare list is accepted.
///
/// Expected: entries decoded; summary computed from them
#[tokio::test]
async fn community_leaderboard_bare_list() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let entries = json!(test.api().with_mock_leaderboard_entries());
    let endpoint = test
        .api()
        .create_leaderboard_endpoint("community/kanto", "total_xp", &entries, 1);

    let board = client(&test)
        .get_leaderboard("total_xp", LeaderboardScope::Community("kanto".to_string()))
        .await?;

    endpoint.assert();
    assert_eq!(board.community(), Some("kanto"));
    assert_eq!(board.title(), None);
    assert_eq!(board.aggregations().count, 5);
    assert_eq!(board.entry(2)?.faction(), Some(Faction::Valor));

    Ok(())
}

/// Tests that a counter is requested under its wire name.
///
/// Expected: GET /leaderboard/v1.1/badge_travel_km/; board keeps the canonical stat
#[tokio::test]
async fn requests_renamed_counter() -> Result<(), Error> {
    let mut test = TestSetup::new().await;
    let entries = test.api().with_mock_leaderboard_entries();
    let page = test
        .api()
        .with_mock_leaderboard("Global Leaderboard", "badge_travel_km", entries, None);
    let endpoint = test
        .api()
        .create_leaderboard_endpoint("v1.1", "badge_travel_km", &page, 1);

    let board = client(&test)
        .get_leaderboard("travel_km", LeaderboardScope::Global)
        .await?;

    endpoint.assert();
    assert_eq!(board.stat(), "travel_km");
    assert_eq!(board.entry(1)?.stat(), "travel_km");
    assert_eq!(board.len(), 5);

    Ok(())
}

/// Tests that an unknown stat is rejected before any request.
///
/// Expected: Err(Schema(UnmappableField)) and no GET
#[tokio::test]
async fn rejects_unknown_stat() {
    let mut test = TestSetup::new().await;
    let endpoint = test
        .api()
        .create_leaderboard_endpoint("v1.1", "pokedex_size", &json!([]), 0);

    let result = client(&test)
        .get_leaderboard("pokedex_size", LeaderboardScope::Global)
        .await;

    endpoint.assert();
    assert!(matches!(
        result,
        Err(Error::Schema(SchemaError::UnmappableField { .. }))
    ));
}
