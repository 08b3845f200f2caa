//! Test configuration constants for the mock TrainerDex service.
//!
//! These values are placeholders used across all tests; none of them are real
//! credentials or real trainers.

/// API token every test connector authenticates with.
pub static TEST_TOKEN: &str = "test-token";

/// Prefix every V1 route is served under.
pub static API_PREFIX: &str = "/api/v1";

/// Update UUIDs in creation order, oldest first.
pub static TEST_UPDATE_UUIDS: [&str; 3] = [
    "0d6b6c5e-6a53-4f0b-9b77-6f5d2f1e0a01",
    "0d6b6c5e-6a53-4f0b-9b77-6f5d2f1e0a02",
    "0d6b6c5e-6a53-4f0b-9b77-6f5d2f1e0a03",
];

/// Timestamps matching [`TEST_UPDATE_UUIDS`], oldest first.
pub static TEST_UPDATE_TIMES: [&str; 3] = [
    "2021-01-01T12:00:00Z",
    "2021-06-01T12:00:00Z",
    "2022-01-01T12:00:00Z",
];
