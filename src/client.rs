//! Typed entry points over an injected connector.

use chrono::NaiveDate;
use serde_json::Value;

pub use crate::connector::TrainerFilter;
use crate::{
    config::Config,
    connector::{http::HttpConnector, Connector, ConnectorRef},
    entity::{social_connection::SocialConnection, trainer::Trainer, user::User},
    error::Error,
    leaderboard::{Leaderboard, LeaderboardScope},
    model::{
        faction::Faction,
        id::{TrainerId, UserId},
        Record,
    },
    schema::{TRAINER, UPDATE, USER},
    util::trainer_code,
};

/// Fields for creating a trainer profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrainer {
    /// User the profile belongs to
    pub owner: UserId,
    /// Team of the trainer
    pub faction: Faction,
    /// Date the trainer started playing
    pub start_date: Option<NaiveDate>,
    /// Twelve digit friend code, whitespace allowed
    pub trainer_code: Option<String>,
    /// Whether the profile starts verified
    pub is_verified: bool,
    /// Whether the trainer's statistics are public
    pub is_visible: bool,
}

impl NewTrainer {
    /// A visible, verified profile for `owner` with no start date or trainer code.
    pub fn new(owner: UserId, faction: Faction) -> Self {
        Self {
            owner,
            faction,
            start_date: None,
            trainer_code: None,
            is_verified: true,
            is_visible: true,
        }
    }

    fn to_record(&self) -> Result<Record, Error> {
        let mut record = Record::new();
        record.insert("owner".to_string(), Value::from(self.owner.0));
        record.insert("faction".to_string(), Value::from(self.faction.id()));
        if let Some(start_date) = self.start_date {
            record.insert("start_date".to_string(), Value::from(start_date.to_string()));
        }
        if let Some(code) = &self.trainer_code {
            record.insert(
                "trainer_code".to_string(),
                Value::from(trainer_code::normalize(code)?),
            );
        }
        record.insert("is_verified".to_string(), Value::from(self.is_verified));
        record.insert("is_visible".to_string(), Value::from(self.is_visible));
        Ok(record)
    }
}

/// Entry point for fetching and creating entities.
///
/// Every entity returned shares this client's connector.
#[derive(Debug, Clone)]
pub struct Client {
    connector: ConnectorRef,
}

impl Client {
    /// Creates a client over `connector`.
    pub fn new<C: Connector + 'static>(connector: C) -> Self {
        Self {
            connector: ConnectorRef::new(connector),
        }
    }

    /// Creates a client over the HTTP API described by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(HttpConnector::from_config(config))
    }

    /// The connector handed to every entity.
    pub fn connector(&self) -> &ConnectorRef {
        &self.connector
    }

    /// Fetches one trainer.
    pub async fn get_trainer(&self, id: TrainerId) -> Result<Trainer, Error> {
        let wire = self.connector.get_trainer(id).await?;
        Trainer::from_wire(self.connector.clone(), &wire)
    }

    /// Lists trainers matching `filter`.
    pub async fn get_trainers(&self, filter: TrainerFilter) -> Result<Vec<Trainer>, Error> {
        let records = self.connector.get_trainers(&filter).await?;
        records
            .iter()
            .map(|wire| Trainer::from_wire(self.connector.clone(), wire))
            .collect()
    }

    /// Finds the one trainer whose nickname matches `nickname`.
    ///
    /// # Returns
    /// - `Ok(Trainer)` - Exactly one trainer matched
    /// - `Err(Error::NotFound)` - No trainer, or more than one, matched
    pub async fn search_trainer(&self, nickname: &str) -> Result<Trainer, Error> {
        let filter = TrainerFilter {
            query: Some(nickname.to_string()),
            ..Default::default()
        };
        let mut trainers = self.get_trainers(filter).await?;

        match trainers.len() {
            1 => Ok(trainers.remove(0)),
            matches => Err(Error::NotFound {
                status: 404,
                body: format!("{matches} trainers match nickname {nickname}"),
            }),
        }
    }

    /// Creates a trainer profile.
    ///
    /// # Returns
    /// - `Ok(Trainer)` - The created profile
    /// - `Err(Error::Validation)` - Malformed trainer code; nothing was sent
    /// - `Err(Error)` - The connector failed
    pub async fn create_trainer(&self, new: NewTrainer) -> Result<Trainer, Error> {
        let payload = TRAINER.encode_create(&new.to_record()?)?;
        let wire = self.connector.create_trainer(payload).await?;
        let trainer = Trainer::from_wire(self.connector.clone(), &wire)?;

        tracing::debug!("Created trainer {} for user {}", trainer.trainer_id(), new.owner);

        Ok(trainer)
    }

    /// Fetches one user.
    pub async fn get_user(&self, id: UserId) -> Result<User, Error> {
        let wire = self.connector.get_user(id).await?;
        User::from_wire(self.connector.clone(), &wire)
    }

    /// Lists every user visible to the caller.
    pub async fn get_users(&self) -> Result<Vec<User>, Error> {
        let records = self.connector.get_users().await?;
        records
            .iter()
            .map(|wire| User::from_wire(self.connector.clone(), wire))
            .collect()
    }

    /// Creates a user account.
    pub async fn create_user(
        &self,
        username: &str,
        first_name: Option<&str>,
    ) -> Result<User, Error> {
        let mut record = Record::new();
        record.insert("username".to_string(), Value::from(username));
        if let Some(first_name) = first_name {
            record.insert("first_name".to_string(), Value::from(first_name));
        }
        let payload = USER.encode_create(&record)?;

        let wire = self.connector.create_user(payload).await?;
        User::from_wire(self.connector.clone(), &wire)
    }

    /// Looks up social connections by provider and external uids.
    pub async fn get_social_connections(
        &self,
        provider: &str,
        uids: &[String],
    ) -> Result<Vec<SocialConnection>, Error> {
        let records = self.connector.get_social_connections(provider, uids).await?;
        records
            .iter()
            .map(|wire| SocialConnection::from_wire(self.connector.clone(), wire))
            .collect()
    }

    /// Looks up the social connection for one external account.
    pub async fn get_social_connection(
        &self,
        provider: &str,
        uid: &str,
    ) -> Result<Option<SocialConnection>, Error> {
        let connections = self
            .get_social_connections(provider, &[uid.to_string()])
            .await?;
        Ok(connections
            .into_iter()
            .find(|connection| connection.provider() == provider && connection.uid() == uid))
    }

    /// Fetches a leaderboard ranked by `stat` within `scope`.
    ///
    /// # Arguments
    /// - `stat` - Canonical stat name, e.g. `"total_xp"`
    /// - `scope` - Population to rank
    ///
    /// # Returns
    /// - `Err(Error::Schema)` - `stat` is not a known counter
    pub async fn get_leaderboard(
        &self,
        stat: &str,
        scope: LeaderboardScope,
    ) -> Result<Leaderboard, Error> {
        let wire_stat = UPDATE.to_wire_field(stat)?;
        let page = self.connector.get_leaderboard(wire_stat, &scope).await?;
        Leaderboard::from_page(self.connector.clone(), stat, scope, page)
    }
}
