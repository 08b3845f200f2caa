use super::SchemaTranslator;

/// V1 update fields: metadata followed by every counter in [`Stats`](crate::Stats).
pub static UPDATE: SchemaTranslator = SchemaTranslator::new(
    "update",
    &[
        ("uuid", "uuid"),
        ("trainer", "trainer"),
        ("update_time", "update_time"),
        ("submission_date", "submission_date"),
        ("data_source", "data_source"),
        ("total_xp", "total_xp"),
        ("gymbadges_gold", "gymbadges_gold"),
        ("pokedex_total_caught", "pokedex_caught"),
        ("pokedex_total_seen", "pokedex_seen"),
        ("pokedex_gen1", "badge_pokedex_entries"),
        ("pokedex_gen2", "badge_pokedex_entries_gen2"),
        ("pokedex_gen3", "badge_pokedex_entries_gen3"),
        ("pokedex_gen4", "badge_pokedex_entries_gen4"),
        ("pokedex_gen5", "badge_pokedex_entries_gen5"),
        ("pokedex_gen6", "badge_pokedex_entries_gen6"),
        ("pokedex_gen7", "badge_pokedex_entries_gen7"),
        ("pokedex_gen8", "badge_pokedex_entries_gen8"),
        ("travel_km", "badge_travel_km"),
        ("capture_total", "badge_capture_total"),
        ("evolved_total", "badge_evolved_total"),
        ("hatched_total", "badge_hatched_total"),
        ("pokestops_visited", "badge_pokestops_visited"),
        ("unique_pokestops", "badge_unique_pokestops"),
        ("big_magikarp", "badge_big_magikarp"),
        ("battle_attack_won", "badge_battle_attack_won"),
        ("battle_training_won", "badge_battle_training_won"),
        ("small_rattata", "badge_small_rattata"),
        ("pikachu", "badge_pikachu"),
        ("unown", "badge_unown"),
        ("raid_battle_won", "badge_raid_battle_won"),
        ("legendary_battle_won", "badge_legendary_battle_won"),
        ("berries_fed", "badge_berries_fed"),
        ("hours_defended", "badge_hours_defended"),
        ("challenge_quests", "badge_challenge_quests"),
        ("max_level_friends", "badge_max_level_friends"),
        ("trading", "badge_trading"),
        ("trading_distance", "badge_trading_distance"),
        ("great_league", "badge_great_league"),
        ("ultra_league", "badge_ultra_league"),
        ("master_league", "badge_master_league"),
        ("photobomb", "badge_photobomb"),
        ("pokemon_purified", "badge_pokemon_purified"),
        ("rocket_grunts_defeated", "badge_rocket_grunts_defeated"),
        ("rocket_giovanni_defeated", "badge_rocket_giovanni_defeated"),
        ("buddy_best", "badge_buddy_best"),
        ("seven_day_streaks", "badge_7_day_streaks"),
        ("unique_raid_bosses_defeated", "badge_unique_raid_bosses_defeated"),
        ("raids_with_friends", "badge_raids_with_friends"),
        ("pokemon_caught_at_your_lures", "badge_pokemon_caught_at_your_lures"),
        ("wayfarer", "badge_wayfarer"),
        ("total_mega_evos", "badge_total_mega_evos"),
        ("unique_mega_evos", "badge_unique_mega_evos"),
        ("type_normal", "badge_type_normal"),
        ("type_fighting", "badge_type_fighting"),
        ("type_flying", "badge_type_flying"),
        ("type_poison", "badge_type_poison"),
        ("type_ground", "badge_type_ground"),
        ("type_rock", "badge_type_rock"),
        ("type_bug", "badge_type_bug"),
        ("type_ghost", "badge_type_ghost"),
        ("type_steel", "badge_type_steel"),
        ("type_fire", "badge_type_fire"),
        ("type_water", "badge_type_water"),
        ("type_grass", "badge_type_grass"),
        ("type_electric", "badge_type_electric"),
        ("type_psychic", "badge_type_psychic"),
        ("type_ice", "badge_type_ice"),
        ("type_dragon", "badge_type_dragon"),
        ("type_dark", "badge_type_dark"),
        ("type_fairy", "badge_type_fairy"),
        ("battle_hub_stats_wins", "battle_hub_stats_wins"),
        ("battle_hub_stats_battles", "battle_hub_stats_battles"),
        ("battle_hub_stats_stardust", "battle_hub_stats_stardust"),
        ("battle_hub_stats_streak", "battle_hub_stats_streak"),
    ],
    &[("datetime", "update_time"), ("xp", "total_xp")],
    &["uuid", "trainer", "submission_date"],
    &["uuid", "submission_date"],
);
