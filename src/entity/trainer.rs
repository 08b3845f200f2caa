use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::{entity_identity, update::Update, user::User, Entity, Relation, Resolve};
use crate::{
    connector::ConnectorRef,
    error::Error,
    model::{
        decode,
        faction::Faction,
        id::{TrainerId, UserId},
        stats::Stats,
        Record,
    },
    schema::{TRAINER, UPDATE},
    util::{
        level::{LevelTable, LevelTier},
        trainer_code,
    },
};

#[derive(Deserialize)]
struct TrainerRecord {
    id: TrainerId,
    uuid: Option<Uuid>,
    owner: UserId,
    username: Option<String>,
    start_date: Option<NaiveDate>,
    faction: Option<Faction>,
    trainer_code: Option<String>,
    is_banned: Option<bool>,
    has_cheated: Option<bool>,
    is_verified: Option<bool>,
    is_visible: Option<bool>,
    daily_goal: Option<u64>,
    total_goal: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    last_modified: Option<DateTime<Utc>>,
    updates: Option<Value>,
}

/// Updates of one trainer, most recent first, indexed by UUID.
#[derive(Debug, Clone, Default)]
struct UpdateCache {
    ordered: Vec<Arc<Update>>,
    by_uuid: HashMap<Uuid, Arc<Update>>,
}

impl UpdateCache {
    fn new(mut updates: Vec<Update>) -> Self {
        // Updates without a timestamp sort last.
        updates.sort_by(|a, b| b.update_time().cmp(&a.update_time()));
        let ordered: Vec<Arc<Update>> = updates.into_iter().map(Arc::new).collect();
        let by_uuid = ordered
            .iter()
            .map(|update| (update.uuid(), Arc::clone(update)))
            .collect();
        Self { ordered, by_uuid }
    }
}

/// A trainer profile.
#[derive(Debug, Clone)]
pub struct Trainer {
    connector: ConnectorRef,
    id: TrainerId,
    uuid: Option<Uuid>,
    owner: Relation<User>,
    username: Option<String>,
    start_date: Option<NaiveDate>,
    faction: Option<Faction>,
    trainer_code: Option<String>,
    is_banned: bool,
    has_cheated: bool,
    is_verified: bool,
    is_visible: bool,
    daily_goal: Option<u64>,
    total_goal: Option<u64>,
    created_at: Option<DateTime<Utc>>,
    last_modified: Option<DateTime<Utc>>,
    update_ids: Vec<Uuid>,
    updates: OnceCell<UpdateCache>,
    record: Record,
}

impl Trainer {
    /// Builds a trainer from a wire record.
    pub fn from_wire(connector: ConnectorRef, wire: &Record) -> Result<Self, Error> {
        let record = TRAINER.to_canonical(wire);
        let typed: TrainerRecord = decode(record.clone())?;

        let mut trainer = Self {
            connector,
            id: typed.id,
            uuid: None,
            owner: Relation::new(typed.owner),
            username: None,
            start_date: None,
            faction: None,
            trainer_code: None,
            is_banned: false,
            has_cheated: false,
            is_verified: false,
            is_visible: true,
            daily_goal: None,
            total_goal: None,
            created_at: None,
            last_modified: None,
            update_ids: Vec::new(),
            updates: OnceCell::new(),
            record: Record::new(),
        };
        trainer.set_fields(typed, record);
        Ok(trainer)
    }

    /// Trainer id.
    pub fn trainer_id(&self) -> TrainerId {
        self.id
    }

    /// UUID of the profile, when the service sent one.
    pub fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    /// In-game nickname.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Date the trainer started playing.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Team the trainer belongs to.
    pub fn faction(&self) -> Option<Faction> {
        self.faction
    }

    /// Twelve digit friend code.
    pub fn trainer_code(&self) -> Option<&str> {
        self.trainer_code.as_deref()
    }

    /// Whether the trainer is currently banned for cheating.
    pub fn is_banned(&self) -> bool {
        self.is_banned
    }

    /// Whether the trainer was ever flagged for cheating.
    pub fn has_cheated(&self) -> bool {
        self.has_cheated
    }

    /// Whether the profile has been verified by a moderator.
    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Whether the trainer's statistics are publicly visible.
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Daily XP goal.
    pub fn daily_goal(&self) -> Option<u64> {
        self.daily_goal
    }

    /// Total XP goal.
    pub fn total_goal(&self) -> Option<u64> {
        self.total_goal
    }

    /// When the profile was created.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// When the profile was last changed.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    /// UUIDs of the trainer's updates as listed on the profile record.
    pub fn update_ids(&self) -> &[Uuid] {
        &self.update_ids
    }

    /// The canonical record this trainer was built from.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Id of the owning user.
    pub fn owner_id(&self) -> UserId {
        self.owner.key()
    }

    /// The owning user, fetched on first access.
    pub async fn owner(&self) -> Result<Arc<User>, Error> {
        self.owner.resolve(&self.connector).await
    }

    /// Every update of the trainer, most recent first.
    ///
    /// The first call fetches all updates in one request; later calls return the cached
    /// collection until [`fetch_updates`](Self::fetch_updates) or
    /// [`refresh`](Entity::refresh) is called.
    pub async fn updates(&self) -> Result<Vec<Arc<Update>>, Error> {
        Ok(self.update_cache().await?.ordered.clone())
    }

    /// One update by UUID, from the cached collection.
    pub async fn update(&self, uuid: Uuid) -> Result<Option<Arc<Update>>, Error> {
        Ok(self.update_cache().await?.by_uuid.get(&uuid).cloned())
    }

    /// Discards the cached updates and fetches them again.
    pub async fn fetch_updates(&mut self) -> Result<Vec<Arc<Update>>, Error> {
        let cache = self.load_updates().await?;
        let updates = cache.ordered.clone();
        self.updates = OnceCell::new_with(Some(cache));
        Ok(updates)
    }

    /// The most recent update, if any.
    pub async fn latest_update(&self) -> Result<Option<Arc<Update>>, Error> {
        Ok(self.update_cache().await?.ordered.first().cloned())
    }

    /// The most recent value reported for a counter.
    ///
    /// # Arguments
    /// - `stat` - Canonical counter name, e.g. `"total_xp"` or `"travel_km"`
    ///
    /// # Returns
    /// - `Ok(Some(value))` - The newest update reporting the counter
    /// - `Ok(None)` - No update reports it
    pub async fn latest_stat(&self, stat: &str) -> Result<Option<f64>, Error> {
        Ok(self
            .update_cache()
            .await?
            .ordered
            .iter()
            .find_map(|update| update.stats().get(stat)))
    }

    /// Current level, derived from the newest update that reports total XP.
    ///
    /// A trainer with no such update has an unknown level, returned as `Ok(None)`.
    pub async fn level(&self) -> Result<Option<LevelTier>, Error> {
        let latest_xp = self
            .update_cache()
            .await?
            .ordered
            .iter()
            .find_map(|update| update.total_xp());
        Ok(latest_xp.map(|xp| LevelTable::default_table().level_for_xp(xp)))
    }

    /// Submits a new update for this trainer.
    ///
    /// Only counters set on `stats` are sent. On success the cached update collection is
    /// dropped so the new update is visible on the next [`updates`](Self::updates) call.
    ///
    /// # Arguments
    /// - `data_source` - Tag naming how the statistics were captured
    /// - `stats` - Counters to report
    /// - `update_time` - When the statistics were recorded, the service's time if `None`
    pub async fn post(
        &mut self,
        data_source: &str,
        stats: Stats,
        update_time: Option<DateTime<Utc>>,
    ) -> Result<Arc<Update>, Error> {
        let mut record = stats.to_record()?;
        record.insert("trainer".to_string(), Value::from(self.id.0));
        record.insert("data_source".to_string(), Value::from(data_source));
        if let Some(update_time) = update_time {
            record.insert(
                "update_time".to_string(),
                Value::from(update_time.to_rfc3339()),
            );
        }
        let payload = UPDATE.encode_create(&record)?;

        let mut wire = self.connector.create_update(self.id, payload).await?;
        wire.entry("trainer")
            .or_insert_with(|| Value::from(self.id.0));
        let update = Arc::new(Update::from_wire(self.connector.clone(), &wire)?);

        tracing::debug!("Posted update {} for trainer {}", update.uuid(), self.id);

        if !self.update_ids.contains(&update.uuid()) {
            self.update_ids.insert(0, update.uuid());
        }
        self.updates = OnceCell::new();
        Ok(update)
    }

    /// Edits the trainer profile.
    ///
    /// A `trainer_code` in the patch is normalised by stripping whitespace and must then
    /// be twelve digits. All validation happens before the request is sent.
    ///
    /// # Returns
    /// - `Ok(())` - The service accepted the patch and the returned record was applied
    /// - `Err(Error::Validation)` - A read-only field or malformed trainer code; nothing was sent
    /// - `Err(Error)` - The connector failed; local state is unchanged
    pub async fn edit(&mut self, mut patch: Record) -> Result<(), Error> {
        if let Some(Value::String(code)) = patch.get("trainer_code") {
            let normalized = trainer_code::normalize(code)?;
            patch.insert("trainer_code".to_string(), Value::from(normalized));
        }
        let payload = TRAINER.encode_edit(&patch)?;

        let wire = self.connector.edit_trainer(self.id, payload).await?;
        self.apply(&wire, false)
    }

    async fn update_cache(&self) -> Result<&UpdateCache, Error> {
        self.updates.get_or_try_init(|| self.load_updates()).await
    }

    async fn load_updates(&self) -> Result<UpdateCache, Error> {
        let records = self.connector.get_updates_for_trainer(self.id).await?;
        let updates = records
            .into_iter()
            .map(|mut wire| {
                wire.entry("trainer")
                    .or_insert_with(|| Value::from(self.id.0));
                Update::from_wire(self.connector.clone(), &wire)
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fetched {} updates for trainer {}", updates.len(), self.id);

        Ok(UpdateCache::new(updates))
    }

    fn apply(&mut self, wire: &Record, reset_relations: bool) -> Result<(), Error> {
        let record = TRAINER.to_canonical(wire);
        let typed: TrainerRecord = decode(record.clone())?;

        if reset_relations {
            self.owner = Relation::new(typed.owner);
            self.updates = OnceCell::new();
        } else {
            self.owner.retarget(typed.owner);
        }
        self.set_fields(typed, record);
        Ok(())
    }

    fn set_fields(&mut self, typed: TrainerRecord, record: Record) {
        self.id = typed.id;
        self.uuid = typed.uuid;
        self.username = typed.username;
        self.start_date = typed.start_date;
        self.faction = typed.faction;
        self.trainer_code = typed.trainer_code.filter(|code| !code.is_empty());
        self.is_banned = typed.is_banned.unwrap_or(false);
        self.has_cheated = typed.has_cheated.unwrap_or(false);
        self.is_verified = typed.is_verified.unwrap_or(false);
        self.is_visible = typed.is_visible.unwrap_or(true);
        self.daily_goal = typed.daily_goal;
        self.total_goal = typed.total_goal;
        self.created_at = typed.created_at;
        self.last_modified = typed.last_modified;
        self.update_ids = typed.updates.as_ref().map(parse_update_ids).unwrap_or_default();
        self.record = record;
    }
}

/// Reads update UUIDs from either a list of UUID strings or a list of partial updates.
fn parse_update_ids(updates: &Value) -> Vec<Uuid> {
    let Value::Array(items) = updates else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(uuid) => Uuid::parse_str(uuid).ok(),
            Value::Object(partial) => partial
                .get("uuid")
                .and_then(Value::as_str)
                .and_then(|uuid| Uuid::parse_str(uuid).ok()),
            _ => None,
        })
        .collect()
}

#[async_trait]
impl Entity for Trainer {
    type Id = TrainerId;

    fn id(&self) -> TrainerId {
        self.id
    }

    async fn refresh(&mut self) -> Result<(), Error> {
        let wire = self.connector.get_trainer(self.id).await?;
        self.apply(&wire, true)
    }
}

#[async_trait]
impl Resolve for Trainer {
    type Key = TrainerId;

    async fn fetch(connector: &ConnectorRef, key: TrainerId) -> Result<Self, Error> {
        let wire = connector.get_trainer(key).await?;
        Trainer::from_wire(connector.clone(), &wire)
    }
}

entity_identity!(Trainer);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_update_ids_in_both_shapes() {
        let uuid = "0d6b6c5e-6a53-4f0b-9b77-6f5d2f1e0a01";

        let strings = json!([uuid, "not-a-uuid"]);
        let partials = json!([{ "uuid": uuid, "total_xp": 10 }]);

        assert_eq!(parse_update_ids(&strings), vec![Uuid::parse_str(uuid).unwrap()]);
        assert_eq!(parse_update_ids(&partials), parse_update_ids(&strings));
        assert!(parse_update_ids(&Value::Null).is_empty());
    }
}
