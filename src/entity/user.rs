use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::{
    entity_identity, social_connection::SocialConnection, trainer::Trainer, Entity, Relation,
    Resolve,
};
use crate::{
    connector::ConnectorRef,
    error::Error,
    model::{
        decode,
        id::{TrainerId, UserId},
        Record,
    },
    schema::{SOCIAL_CONNECTION, USER},
};

#[derive(Deserialize)]
struct UserRecord {
    id: UserId,
    uuid: Option<Uuid>,
    username: String,
    first_name: Option<String>,
    last_name: Option<String>,
    trainer: Option<TrainerId>,
}

/// A user account, owning at most one trainer profile.
#[derive(Debug, Clone)]
pub struct User {
    connector: ConnectorRef,
    id: UserId,
    uuid: Option<Uuid>,
    username: String,
    first_name: Option<String>,
    last_name: Option<String>,
    trainer: Option<Relation<Trainer>>,
    social_connections: OnceCell<Vec<Arc<SocialConnection>>>,
    record: Record,
}

impl User {
    /// Builds a user from a wire record.
    pub fn from_wire(connector: ConnectorRef, wire: &Record) -> Result<Self, Error> {
        let record = USER.to_canonical(wire);
        let typed: UserRecord = decode(record.clone())?;

        Ok(Self {
            connector,
            id: typed.id,
            uuid: typed.uuid,
            username: typed.username,
            first_name: typed.first_name.filter(|name| !name.is_empty()),
            last_name: typed.last_name.filter(|name| !name.is_empty()),
            trainer: typed.trainer.map(Relation::new),
            social_connections: OnceCell::new(),
            record,
        })
    }

    /// User id.
    pub fn user_id(&self) -> UserId {
        self.id
    }

    /// UUID of the account, when the service sent one.
    pub fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    /// Account username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// First name.
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Last name.
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// The canonical record this user was built from.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Id of the user's trainer profile, if they have one.
    pub fn trainer_id(&self) -> Option<TrainerId> {
        self.trainer.as_ref().map(Relation::key)
    }

    /// The user's trainer profile, fetched on first access.
    ///
    /// Returns `Ok(None)` for a user without a trainer profile.
    pub async fn trainer(&self) -> Result<Option<Arc<Trainer>>, Error> {
        match &self.trainer {
            Some(relation) => relation.resolve(&self.connector).await.map(Some),
            None => Ok(None),
        }
    }

    /// The user's linked external accounts, fetched once and cached.
    pub async fn social_connections(&self) -> Result<Vec<Arc<SocialConnection>>, Error> {
        self.social_connections
            .get_or_try_init(|| async move {
                let records = self
                    .connector
                    .get_social_connections_for_user(self.id)
                    .await?;
                records
                    .iter()
                    .map(|wire| {
                        SocialConnection::from_wire(self.connector.clone(), wire).map(Arc::new)
                    })
                    .collect::<Result<Vec<_>, Error>>()
            })
            .await
            .cloned()
    }

    /// Links an external account to this user.
    ///
    /// # Arguments
    /// - `provider` - Provider tag, e.g. `"discord"`
    /// - `uid` - Account id on the provider
    /// - `extra_data` - Optional provider specific data
    pub async fn add_social_connection(
        &mut self,
        provider: &str,
        uid: &str,
        extra_data: Option<Value>,
    ) -> Result<SocialConnection, Error> {
        let mut record = Record::new();
        record.insert("user".to_string(), Value::from(self.id.0));
        record.insert("provider".to_string(), Value::from(provider));
        record.insert("uid".to_string(), Value::from(uid));
        if let Some(extra_data) = extra_data {
            record.insert("extra_data".to_string(), extra_data);
        }
        let payload = SOCIAL_CONNECTION.encode_create(&record)?;

        let wire = self.connector.create_social_connection(payload).await?;
        let connection = SocialConnection::from_wire(self.connector.clone(), &wire)?;

        tracing::debug!("Linked {} to user {}", connection.key(), self.id);

        self.social_connections = OnceCell::new();
        Ok(connection)
    }

    /// Links a Discord account to this user.
    pub async fn add_discord(&mut self, discord_id: &str) -> Result<SocialConnection, Error> {
        self.add_social_connection("discord", discord_id, None)
            .await
    }

    /// Edits the user.
    ///
    /// # Returns
    /// - `Ok(())` - The service accepted the patch and the returned record was applied
    /// - `Err(Error::Validation)` - The patch touches a read-only field; nothing was sent
    /// - `Err(Error)` - The connector failed; local state is unchanged
    pub async fn edit(&mut self, patch: Record) -> Result<(), Error> {
        let payload = USER.encode_edit(&patch)?;
        let wire = self.connector.edit_user(self.id, payload).await?;
        self.apply(&wire, false)
    }

    fn apply(&mut self, wire: &Record, reset_relations: bool) -> Result<(), Error> {
        let record = USER.to_canonical(wire);
        let typed: UserRecord = decode(record.clone())?;

        self.trainer = match (self.trainer.take(), typed.trainer) {
            (Some(mut relation), Some(key)) if !reset_relations => {
                relation.retarget(key);
                Some(relation)
            }
            (_, key) => key.map(Relation::new),
        };
        if reset_relations {
            self.social_connections = OnceCell::new();
        }
        self.id = typed.id;
        self.uuid = typed.uuid;
        self.username = typed.username;
        self.first_name = typed.first_name.filter(|name| !name.is_empty());
        self.last_name = typed.last_name.filter(|name| !name.is_empty());
        self.record = record;
        Ok(())
    }
}

#[async_trait]
impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }

    async fn refresh(&mut self) -> Result<(), Error> {
        let wire = self.connector.get_user(self.id).await?;
        self.apply(&wire, true)
    }
}

#[async_trait]
impl Resolve for User {
    type Key = UserId;

    async fn fetch(connector: &ConnectorRef, key: UserId) -> Result<Self, Error> {
        let wire = connector.get_user(key).await?;
        User::from_wire(connector.clone(), &wire)
    }
}

entity_identity!(User);
