use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{entity_identity, trainer::Trainer, Entity, Relation};
use crate::{
    connector::ConnectorRef,
    error::Error,
    model::{decode, id::TrainerId, stats::Stats, Record},
    schema::UPDATE,
    util::level::{LevelTable, LevelTier},
};

#[derive(Deserialize)]
struct UpdateRecord {
    uuid: Uuid,
    trainer: TrainerId,
    update_time: Option<DateTime<Utc>>,
    submission_date: Option<DateTime<Utc>>,
    data_source: Option<String>,
    #[serde(flatten)]
    stats: Stats,
}

/// One statistics snapshot submitted for a trainer.
#[derive(Debug, Clone)]
pub struct Update {
    connector: ConnectorRef,
    uuid: Uuid,
    trainer: Relation<Trainer>,
    update_time: Option<DateTime<Utc>>,
    submission_date: Option<DateTime<Utc>>,
    data_source: Option<String>,
    stats: Stats,
    record: Record,
}

impl Update {
    /// Builds an update from a wire record.
    ///
    /// # Returns
    /// - `Ok(Update)` - The record carried a UUID and an owning trainer
    /// - `Err(Error::Decode)` - A required field is missing or a field has the wrong type
    pub fn from_wire(connector: ConnectorRef, wire: &Record) -> Result<Self, Error> {
        let record = UPDATE.to_canonical(wire);
        let typed: UpdateRecord = decode(record.clone())?;

        Ok(Self {
            connector,
            uuid: typed.uuid,
            trainer: Relation::new(typed.trainer),
            update_time: typed.update_time,
            submission_date: typed.submission_date,
            data_source: typed.data_source,
            stats: typed.stats,
            record,
        })
    }

    /// UUID of the update.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Id of the trainer the update belongs to.
    pub fn trainer_id(&self) -> TrainerId {
        self.trainer.key()
    }

    /// When the statistics were recorded.
    pub fn update_time(&self) -> Option<DateTime<Utc>> {
        self.update_time
    }

    /// When the update was submitted to the service.
    pub fn submission_date(&self) -> Option<DateTime<Utc>> {
        self.submission_date
    }

    /// Tag naming how the update was captured, e.g. `"ss_ocr"`.
    pub fn data_source(&self) -> Option<&str> {
        self.data_source.as_deref()
    }

    /// Counters reported by this update.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Total XP, if reported.
    pub fn total_xp(&self) -> Option<u64> {
        self.stats.total_xp
    }

    /// The canonical record this update was built from.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Level implied by this update's total XP, if it reports one.
    pub fn level(&self) -> Option<LevelTier> {
        self.stats
            .total_xp
            .map(|xp| LevelTable::default_table().level_for_xp(xp))
    }

    /// The trainer this update belongs to, fetched on first access.
    pub async fn trainer(&self) -> Result<Arc<Trainer>, Error> {
        self.trainer.resolve(&self.connector).await
    }

    /// Edits the update.
    ///
    /// # Arguments
    /// - `patch` - Canonical fields to change
    ///
    /// # Returns
    /// - `Ok(())` - The service accepted the patch and the returned record was applied
    /// - `Err(Error::Validation)` - The patch touches a read-only field; nothing was sent
    /// - `Err(Error)` - The connector failed; local state is unchanged
    pub async fn edit(&mut self, patch: Record) -> Result<(), Error> {
        let payload = UPDATE.encode_edit(&patch)?;
        let wire = self
            .connector
            .edit_update(self.trainer_id(), self.uuid, payload)
            .await?;
        self.apply(&wire, false)
    }

    fn apply(&mut self, wire: &Record, reset_relations: bool) -> Result<(), Error> {
        let record = UPDATE.to_canonical(wire);
        let typed: UpdateRecord = decode(record.clone())?;

        self.uuid = typed.uuid;
        if reset_relations {
            self.trainer = Relation::new(typed.trainer);
        } else {
            self.trainer.retarget(typed.trainer);
        }
        self.update_time = typed.update_time;
        self.submission_date = typed.submission_date;
        self.data_source = typed.data_source;
        self.stats = typed.stats;
        self.record = record;
        Ok(())
    }
}

#[async_trait]
impl Entity for Update {
    type Id = Uuid;

    fn id(&self) -> Uuid {
        self.uuid
    }

    async fn refresh(&mut self) -> Result<(), Error> {
        let wire = self
            .connector
            .get_update(self.trainer_id(), self.uuid)
            .await?;
        self.apply(&wire, true)
    }
}

entity_identity!(Update);
