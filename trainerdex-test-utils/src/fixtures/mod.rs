//! Test fixtures for wire records and mock HTTP endpoints.
//!
//! - `api` - V1 trainer, update, user, social connection and leaderboard records

pub mod api;
