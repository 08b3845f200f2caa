//! Client-side domain model for the TrainerDex trainer statistics service.
//!
//! Raw wire records returned by the service are translated into long-lived,
//! partially populated entities ([`Trainer`], [`Update`], [`User`],
//! [`SocialConnection`]) which resolve related entities on first access and cache
//! the result. Derived values such as a trainer's level and leaderboard aggregates
//! are computed purely from data the client already holds.
//!
//! All network access goes through a [`Connector`] injected at construction time;
//! [`HttpConnector`] is the bundled implementation over the V1 HTTP API.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod connector;
pub mod entity;
pub mod error;
pub mod leaderboard;
pub mod model;
pub mod schema;
pub mod util;

pub use client::{Client, NewTrainer, TrainerFilter};
pub use config::Config;
pub use connector::{http::HttpConnector, Connector, ConnectorRef, LeaderboardPage};
pub use entity::{
    social_connection::{ProviderLookup, SocialConnection},
    trainer::Trainer,
    update::Update,
    user::User,
    Entity, Relation,
};
pub use error::Error;
pub use leaderboard::{
    Aggregations, Leaderboard, LeaderboardEntry, LeaderboardScope, LeaderboardView, Ranked,
};
pub use model::{
    faction::Faction,
    id::{SocialConnectionKey, TrainerId, UserId},
    stats::Stats,
    Record,
};
pub use schema::SchemaTranslator;
pub use util::level::{LevelTable, LevelTier};
