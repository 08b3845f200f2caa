use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    connector::ConnectorRef,
    entity::{trainer::Trainer, Relation},
    error::Error,
    model::{
        decode,
        faction::Faction,
        id::{TrainerId, UserId},
        stats::decimal,
        Record,
    },
    util::level::{LevelTable, LevelTier},
};

/// Faction as sent on a leaderboard row, either a bare id or `{"id": .., "name_en": ..}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FactionRef {
    Id(Faction),
    Object { id: Faction },
}

#[derive(Deserialize)]
struct EntryRecord {
    position: u64,
    id: TrainerId,
    username: String,
    #[serde(default)]
    faction: Option<FactionRef>,
    #[serde(default, deserialize_with = "decimal")]
    value: Option<f64>,
    last_updated: Option<DateTime<Utc>>,
    level: Option<u32>,
    user_id: Option<UserId>,
}

/// One ranked row of a leaderboard.
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    connector: ConnectorRef,
    position: u64,
    trainer: Relation<Trainer>,
    username: String,
    faction: Option<Faction>,
    value: f64,
    last_updated: Option<DateTime<Utc>>,
    level: Option<u32>,
    user_id: Option<UserId>,
    stat: String,
}

impl LeaderboardEntry {
    /// Builds an entry from a leaderboard row.
    ///
    /// # Arguments
    /// - `connector` - Connector used to resolve the entry's trainer
    /// - `stat` - Stat the board ranks by
    /// - `wire` - The row as sent by the service
    pub fn from_wire(connector: ConnectorRef, stat: &str, wire: &Record) -> Result<Self, Error> {
        let typed: EntryRecord = decode(wire.clone())?;
        let value = typed.value.ok_or_else(|| {
            Error::Decode(serde::de::Error::custom(format!(
                "leaderboard row for trainer {} has no value",
                typed.id
            )))
        })?;

        Ok(Self {
            connector,
            position: typed.position,
            trainer: Relation::new(typed.id),
            username: typed.username,
            faction: typed.faction.map(|faction| match faction {
                FactionRef::Id(faction) | FactionRef::Object { id: faction } => faction,
            }),
            value,
            last_updated: typed.last_updated,
            level: typed.level,
            user_id: typed.user_id,
            stat: stat.to_string(),
        })
    }

    /// 1-based rank. Tied entries share a position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Id of the ranked trainer.
    pub fn trainer_id(&self) -> TrainerId {
        self.trainer.key()
    }

    /// Id of the trainer's owning user, when the service sent one.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// In-game nickname.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Team of the trainer.
    pub fn faction(&self) -> Option<Faction> {
        self.faction
    }

    /// Value of the ranked stat.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Stat the entry is ranked by.
    pub fn stat(&self) -> &str {
        &self.stat
    }

    /// When the trainer's stat was last updated.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Trainer level.
    ///
    /// Uses the level sent with the row. Without one, a `total_xp` board derives the
    /// level from the value; other boards have no level.
    pub fn level(&self) -> Option<LevelTier> {
        let table = LevelTable::default_table();
        match self.level {
            Some(level) => table.tier(level).ok(),
            None if self.stat == "total_xp" && self.value >= 0.0 => {
                Some(table.level_for_xp(self.value as u64))
            }
            None => None,
        }
    }

    /// The ranked trainer, fetched on first access.
    pub async fn trainer(&self) -> Result<Arc<Trainer>, Error> {
        self.trainer.resolve(&self.connector).await
    }
}
