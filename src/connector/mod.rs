//! The network boundary.
//!
//! Every entity holds a [`ConnectorRef`] and performs all I/O through it. Payloads and
//! results are wire records; schema translation happens on the entity side of this
//! boundary.

pub mod http;
pub mod retry;

use std::{fmt, ops::Deref, sync::Arc};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Error,
    leaderboard::LeaderboardScope,
    model::{
        faction::Faction,
        id::{TrainerId, UserId},
        Record,
    },
};

/// Optional filters for listing trainers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainerFilter {
    /// Only trainers in this faction
    pub faction: Option<Faction>,
    /// Only trainers whose username matches this query
    pub query: Option<String>,
}

/// One page of a leaderboard as returned by the service, before translation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardPage {
    /// Ranked rows, in rank order
    pub entries: Vec<Record>,
    /// Summary over the whole board, if the service sent one
    pub aggregations: Option<Record>,
    /// Display title of the board
    pub title: Option<String>,
    /// Stat the board ranks by, as named by the service
    pub stat: Option<String>,
}

/// Capability the domain model needs from the remote service.
///
/// Implementations map failures to [`Error::NotFound`], [`Error::Forbidden`] and
/// [`Error::RequestFailed`]; any retrying happens inside the implementation.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Fetches one trainer.
    async fn get_trainer(&self, id: TrainerId) -> Result<Record, Error>;
    /// Lists trainers matching `filter`.
    async fn get_trainers(&self, filter: &TrainerFilter) -> Result<Vec<Record>, Error>;
    /// Creates a trainer.
    async fn create_trainer(&self, payload: Record) -> Result<Record, Error>;
    /// Patches a trainer and returns the updated record.
    async fn edit_trainer(&self, id: TrainerId, payload: Record) -> Result<Record, Error>;

    /// Fetches one update of a trainer.
    async fn get_update(&self, trainer: TrainerId, update: Uuid) -> Result<Record, Error>;
    /// Lists every update of a trainer.
    async fn get_updates_for_trainer(&self, trainer: TrainerId) -> Result<Vec<Record>, Error>;
    /// Creates an update for a trainer.
    async fn create_update(&self, trainer: TrainerId, payload: Record) -> Result<Record, Error>;
    /// Patches an update and returns the updated record.
    async fn edit_update(
        &self,
        trainer: TrainerId,
        update: Uuid,
        payload: Record,
    ) -> Result<Record, Error>;

    /// Fetches one user.
    async fn get_user(&self, id: UserId) -> Result<Record, Error>;
    /// Lists every user visible to the caller.
    async fn get_users(&self) -> Result<Vec<Record>, Error>;
    /// Creates a user.
    async fn create_user(&self, payload: Record) -> Result<Record, Error>;
    /// Patches a user and returns the updated record.
    async fn edit_user(&self, id: UserId, payload: Record) -> Result<Record, Error>;

    /// Looks up social connections by provider and one or more external uids.
    async fn get_social_connections(
        &self,
        provider: &str,
        uids: &[String],
    ) -> Result<Vec<Record>, Error>;
    /// Lists the social connections of a user.
    async fn get_social_connections_for_user(&self, user: UserId) -> Result<Vec<Record>, Error>;
    /// Links an external account to a user.
    async fn create_social_connection(&self, payload: Record) -> Result<Record, Error>;

    /// Fetches one leaderboard page ranked by the wire stat `stat` within `scope`.
    async fn get_leaderboard(
        &self,
        stat: &str,
        scope: &LeaderboardScope,
    ) -> Result<LeaderboardPage, Error>;
}

/// Shared handle to the connector injected into every entity.
#[derive(Clone)]
pub struct ConnectorRef(Arc<dyn Connector>);

impl ConnectorRef {
    /// Wraps a connector.
    pub fn new<C: Connector + 'static>(connector: C) -> Self {
        Self(Arc::new(connector))
    }

    /// Wraps an already shared connector.
    pub fn from_arc(connector: Arc<dyn Connector>) -> Self {
        Self(connector)
    }
}

impl Deref for ConnectorRef {
    type Target = dyn Connector;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for ConnectorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConnectorRef(..)")
    }
}
