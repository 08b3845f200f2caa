//! Wire records as the V1 API returns them.

use serde_json::{json, Value};

use crate::{
    constant::{TEST_UPDATE_TIMES, TEST_UPDATE_UUIDS},
    fixtures::api::ApiFixtures,
};

impl<'a> ApiFixtures<'a> {
    pub fn with_mock_trainer(&self, trainer_id: i64, owner_id: i64, username: &str) -> Value {
        json!({
            "id": trainer_id,
            "uuid": "5f0e0c1a-7d0b-4b4e-8f69-2a1c5e3d9b10",
            "owner": owner_id,
            "username": username,
            "start_date": "2016-07-13",
            "faction": 1,
            "trainer_code": "123456789012",
            "currently_cheats": false,
            "has_cheated": false,
            "last_cheated": null,
            "verified": true,
            "statistics": true,
            "daily_goal": null,
            "total_goal": null,
            "created_at": "2018-02-01T10:00:00Z",
            "last_modified": "2022-01-01T12:00:00Z",
            "update_set": TEST_UPDATE_UUIDS,
            "prefered": true,
        })
    }

    pub fn with_mock_update(&self, trainer_id: i64, index: usize, total_xp: Option<u64>) -> Value {
        json!({
            "uuid": TEST_UPDATE_UUIDS[index],
            "trainer": trainer_id,
            "update_time": TEST_UPDATE_TIMES[index],
            "submission_date": TEST_UPDATE_TIMES[index],
            "data_source": "ss_ocr",
            "total_xp": total_xp,
            "badge_travel_km": "1234.50",
            "badge_pokedex_entries": 151,
            "badge_7_day_streaks": index,
        })
    }

    /// Every test update of a trainer, oldest first, with XP growing over time.
    pub fn with_mock_updates(&self, trainer_id: i64) -> Vec<Value> {
        vec![
            self.with_mock_update(trainer_id, 0, Some(1_500_000)),
            self.with_mock_update(trainer_id, 1, Some(2_600_000)),
            self.with_mock_update(trainer_id, 2, None),
        ]
    }

    pub fn with_mock_user(&self, user_id: i64, username: &str, trainer_id: Option<i64>) -> Value {
        json!({
            "id": user_id,
            "uuid": "8a4f2b6e-1c3d-4e5f-9a0b-7c6d5e4f3a21",
            "username": username,
            "first_name": "Jay",
            "last_name": null,
            "trainer": trainer_id,
        })
    }

    pub fn with_mock_social_connection(
        &self,
        user_id: i64,
        provider: &str,
        uid: &str,
        trainer_id: Option<i64>,
    ) -> Value {
        json!({
            "user": user_id,
            "provider": provider,
            "uid": uid,
            "extra_data": "{\"username\": \"jay#0001\"}",
            "trainer": trainer_id,
        })
    }

    /// One leaderboard row.
    ///
    /// # Arguments
    /// - `position` - 1-based rank
    /// - `trainer_id` - Trainer the row belongs to, user id is `trainer_id + 1000`
    /// - `faction` - Faction id
    /// - `value` - Stat value
    /// - `level` - Level reported by the service
    pub fn with_mock_leaderboard_entry(
        &self,
        position: u64,
        trainer_id: i64,
        faction: i64,
        value: f64,
        level: u32,
    ) -> Value {
        json!({
            "position": position,
            "id": trainer_id,
            "username": format!("Trainer{trainer_id}"),
            "faction": { "id": faction, "name_en": "" },
            "value": value,
            "last_updated": "2022-01-01T12:00:00Z",
            "level": level,
            "user_id": trainer_id + 1000,
        })
    }

    /// Five trainers at positions 1..=5 with factions `[1, 2, 1, 3, 2]`.
    pub fn with_mock_leaderboard_entries(&self) -> Vec<Value> {
        let factions = [1, 2, 1, 3, 2];
        factions
            .iter()
            .enumerate()
            .map(|(i, &faction)| {
                let position = i as u64 + 1;
                self.with_mock_leaderboard_entry(
                    position,
                    position as i64,
                    faction,
                    (6 - position) as f64 * 1_000_000.0,
                    41 - position as u32,
                )
            })
            .collect()
    }

    pub fn with_mock_leaderboard(
        &self,
        title: &str,
        stat: &str,
        entries: Vec<Value>,
        aggregations: Option<Value>,
    ) -> Value {
        let mut page = json!({
            "title": title,
            "stat": stat,
            "leaderboard": entries,
        });
        if let Some(aggregations) = aggregations {
            page["aggregations"] = aggregations;
        }
        page
    }
}
