use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{entity_identity, trainer::Trainer, user::User, Entity, Relation};
use crate::{
    connector::ConnectorRef,
    error::{Error, ValidationError},
    model::{
        decode,
        id::{SocialConnectionKey, TrainerId, UserId},
        Record,
    },
    schema::SOCIAL_CONNECTION,
};

/// Resolves an external account uid through a host platform, e.g. a chat bot's user
/// cache.
pub trait ProviderLookup {
    /// What the host platform resolves a uid to.
    type Output;

    /// Provider tag this lookup handles, e.g. `"discord"`.
    fn provider(&self) -> &str;

    /// Looks up the account with `uid`, `None` if the host does not know it.
    fn lookup(&self, uid: &str) -> Option<Self::Output>;
}

#[derive(Deserialize)]
struct SocialConnectionRecord {
    user: UserId,
    provider: String,
    uid: String,
    extra_data: Option<Value>,
    trainer: Option<TrainerId>,
}

/// An external account linked to a user, identified by provider and uid.
#[derive(Debug, Clone)]
pub struct SocialConnection {
    connector: ConnectorRef,
    key: SocialConnectionKey,
    extra_data: Option<Value>,
    user: Relation<User>,
    trainer: Option<Relation<Trainer>>,
    record: Record,
}

impl SocialConnection {
    /// Builds a social connection from a wire record.
    pub fn from_wire(connector: ConnectorRef, wire: &Record) -> Result<Self, Error> {
        let record = SOCIAL_CONNECTION.to_canonical(wire);
        let typed: SocialConnectionRecord = decode(record.clone())?;

        Ok(Self {
            connector,
            key: SocialConnectionKey::new(typed.provider, typed.uid),
            extra_data: typed.extra_data.and_then(parse_extra_data),
            user: Relation::new(typed.user),
            trainer: typed.trainer.map(Relation::new),
            record,
        })
    }

    /// Provider tag, e.g. `"discord"`.
    pub fn provider(&self) -> &str {
        &self.key.provider
    }

    /// Account id on the provider.
    pub fn uid(&self) -> &str {
        &self.key.uid
    }

    /// Composite identity.
    pub fn key(&self) -> &SocialConnectionKey {
        &self.key
    }

    /// Provider specific data attached to the link.
    pub fn extra_data(&self) -> Option<&Value> {
        self.extra_data.as_ref()
    }

    /// The canonical record this connection was built from.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Id of the linked user.
    pub fn user_id(&self) -> UserId {
        self.user.key()
    }

    /// Id of the linked user's trainer, if they have one.
    pub fn trainer_id(&self) -> Option<TrainerId> {
        self.trainer.as_ref().map(Relation::key)
    }

    /// The linked user, fetched on first access.
    pub async fn user(&self) -> Result<Arc<User>, Error> {
        self.user.resolve(&self.connector).await
    }

    /// The linked user's trainer, fetched on first access.
    pub async fn trainer(&self) -> Result<Option<Arc<Trainer>>, Error> {
        match &self.trainer {
            Some(relation) => relation.resolve(&self.connector).await.map(Some),
            None => Ok(None),
        }
    }

    /// Resolves the external account through a host platform lookup.
    ///
    /// # Returns
    /// - `Ok(Some(_))` - The host knows the account
    /// - `Ok(None)` - The host does not know the account
    /// - `Err(ValidationError::ProviderMismatch)` - The lookup handles another provider
    pub fn resolve_with<L>(&self, lookup: &L) -> Result<Option<L::Output>, Error>
    where
        L: ProviderLookup,
    {
        if lookup.provider() != self.provider() {
            return Err(ValidationError::ProviderMismatch {
                expected: lookup.provider().to_string(),
                actual: self.provider().to_string(),
            }
            .into());
        }
        Ok(lookup.lookup(self.uid()))
    }
}

/// The service may send `extra_data` as a JSON-encoded string.
fn parse_extra_data(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => {
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        }
        other => Some(other),
    }
}

#[async_trait]
impl Entity for SocialConnection {
    type Id = SocialConnectionKey;

    fn id(&self) -> SocialConnectionKey {
        self.key.clone()
    }

    /// Re-queries the connection by provider and uid.
    ///
    /// A lookup that returns no matching record is reported as [`Error::NotFound`].
    async fn refresh(&mut self) -> Result<(), Error> {
        let records = self
            .connector
            .get_social_connections(self.provider(), &[self.uid().to_string()])
            .await?;

        let mut refreshed = None;
        for wire in &records {
            let connection = SocialConnection::from_wire(self.connector.clone(), wire)?;
            if connection.key == self.key {
                refreshed = Some(connection);
                break;
            }
        }

        match refreshed {
            Some(connection) => {
                *self = connection;
                Ok(())
            }
            None => Err(Error::NotFound {
                status: 404,
                body: format!("no social connection for {}", self.key),
            }),
        }
    }
}

entity_identity!(SocialConnection);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_extra_data_strings() {
        assert_eq!(
            parse_extra_data(json!("{\"username\": \"jay\"}")),
            Some(json!({ "username": "jay" }))
        );
        assert_eq!(parse_extra_data(json!("plain")), Some(json!("plain")));
        assert_eq!(parse_extra_data(json!({ "a": 1 })), Some(json!({ "a": 1 })));
        assert_eq!(parse_extra_data(Value::Null), None);
        assert_eq!(parse_extra_data(json!("")), None);
    }
}
