use super::SchemaTranslator;

/// V1 trainer profile fields.
pub static TRAINER: SchemaTranslator = SchemaTranslator::new(
    "trainer",
    &[
        ("id", "id"),
        ("uuid", "uuid"),
        ("owner", "owner"),
        ("username", "username"),
        ("start_date", "start_date"),
        ("faction", "faction"),
        ("trainer_code", "trainer_code"),
        ("is_banned", "currently_cheats"),
        ("has_cheated", "has_cheated"),
        ("last_cheated", "last_cheated"),
        ("is_verified", "verified"),
        ("is_visible", "statistics"),
        ("daily_goal", "daily_goal"),
        ("total_goal", "total_goal"),
        ("created_at", "created_at"),
        ("last_modified", "last_modified"),
    ],
    &[
        ("currently_banned", "is_banned"),
        ("updated_at", "last_modified"),
        ("update_set", "updates"),
    ],
    &[
        "id",
        "uuid",
        "owner",
        "username",
        "is_banned",
        "has_cheated",
        "last_cheated",
        "created_at",
        "last_modified",
        "updates",
    ],
    &["id", "uuid", "created_at", "last_modified"],
);
