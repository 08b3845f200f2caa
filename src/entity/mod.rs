//! Long-lived domain objects built from wire records.
//!
//! Entities hold only the fields known at construction. Related entities are held as a
//! [`Relation`]: the related id plus a memo slot filled on first access through the
//! entity's [`ConnectorRef`](crate::ConnectorRef). Local state is replaced only after a
//! connector call succeeds, so a failed `refresh`, `edit` or `post` leaves the last good
//! snapshot readable.

pub mod relation;
pub mod social_connection;
pub mod trainer;
pub mod update;
pub mod user;

#[cfg(test)]
mod tests;

use std::{fmt::Debug, hash::Hash};

use async_trait::async_trait;

pub use self::relation::{Relation, Resolve};
use crate::error::Error;

/// Shared lifecycle of every entity.
///
/// Equality and hashing of entities are defined by [`Entity::id`] alone.
#[async_trait]
pub trait Entity: Send + Sync {
    /// Stable identity of the entity.
    type Id: Clone + Eq + Hash + Debug + Send + Sync;

    /// Returns the entity's identity.
    fn id(&self) -> Self::Id;

    /// Re-fetches the entity and replaces its snapshot.
    ///
    /// Memoized relations and cached collections are cleared so the next access sees
    /// fresh data. On error the previous snapshot is kept.
    async fn refresh(&mut self) -> Result<(), Error>;
}

/// Implements `PartialEq`, `Eq` and `Hash` in terms of [`Entity::id`].
macro_rules! entity_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::entity::Entity::id(self) == $crate::entity::Entity::id(other)
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                $crate::entity::Entity::id(self).hash(state);
            }
        }
    };
}

pub(crate) use entity_identity;
