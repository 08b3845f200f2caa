//! The fixed set of counters an update may report.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{error::Error, model::Record};

macro_rules! stats {
    ($( $(#[$meta:meta])* $field:ident: $ty:ty ),+ $(,)?) => {
        /// Counters reported by one update, keyed by canonical name.
        ///
        /// Every counter is optional; an update may report only a subset of them.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct Stats {
            $(
                $(#[$meta])*
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )+
        }

        impl Stats {
            /// Canonical names of every counter, in declaration order.
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            /// Returns a counter by canonical name, widened to `f64`.
            ///
            /// Unknown names and unset counters both return `None`.
            pub fn get(&self, name: &str) -> Option<f64> {
                match name {
                    $( stringify!($field) => self.$field.map(|value| value as f64), )+
                    _ => None,
                }
            }

            /// Returns true when no counter is set.
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }
        }
    };
}

stats! {
    total_xp: u64,
    gymbadges_gold: u64,
    pokedex_total_caught: u64,
    pokedex_total_seen: u64,
    pokedex_gen1: u64,
    pokedex_gen2: u64,
    pokedex_gen3: u64,
    pokedex_gen4: u64,
    pokedex_gen5: u64,
    pokedex_gen6: u64,
    pokedex_gen7: u64,
    pokedex_gen8: u64,
    /// Kilometres walked; the service sends this as a decimal string
    #[serde(deserialize_with = "decimal")]
    travel_km: f64,
    capture_total: u64,
    evolved_total: u64,
    hatched_total: u64,
    pokestops_visited: u64,
    unique_pokestops: u64,
    big_magikarp: u64,
    battle_attack_won: u64,
    battle_training_won: u64,
    small_rattata: u64,
    pikachu: u64,
    unown: u64,
    raid_battle_won: u64,
    legendary_battle_won: u64,
    berries_fed: u64,
    hours_defended: u64,
    challenge_quests: u64,
    max_level_friends: u64,
    trading: u64,
    trading_distance: u64,
    great_league: u64,
    ultra_league: u64,
    master_league: u64,
    photobomb: u64,
    pokemon_purified: u64,
    rocket_grunts_defeated: u64,
    rocket_giovanni_defeated: u64,
    buddy_best: u64,
    seven_day_streaks: u64,
    unique_raid_bosses_defeated: u64,
    raids_with_friends: u64,
    pokemon_caught_at_your_lures: u64,
    wayfarer: u64,
    total_mega_evos: u64,
    unique_mega_evos: u64,
    type_normal: u64,
    type_fighting: u64,
    type_flying: u64,
    type_poison: u64,
    type_ground: u64,
    type_rock: u64,
    type_bug: u64,
    type_ghost: u64,
    type_steel: u64,
    type_fire: u64,
    type_water: u64,
    type_grass: u64,
    type_electric: u64,
    type_psychic: u64,
    type_ice: u64,
    type_dragon: u64,
    type_dark: u64,
    type_fairy: u64,
    battle_hub_stats_wins: u64,
    battle_hub_stats_battles: u64,
    battle_hub_stats_stardust: u64,
    battle_hub_stats_streak: u64,
}

impl Stats {
    /// Canonical record holding only the counters that are set.
    pub fn to_record(&self) -> Result<Record, Error> {
        match serde_json::to_value(self)? {
            Value::Object(record) => Ok(record),
            _ => Ok(Record::new()),
        }
    }
}

/// Accepts a decimal either as a JSON number or as a numeric string.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Option::<Decimal>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Decimal::Number(value)) => Ok(Some(value)),
        Some(Decimal::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
