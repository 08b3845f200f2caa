use std::{fmt, sync::Arc};

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::{connector::ConnectorRef, error::Error};

/// An entity that can be fetched by key through a connector.
#[async_trait]
pub trait Resolve: Sized + Send + Sync + 'static {
    /// Key the entity is fetched by.
    type Key: Copy + Eq + fmt::Debug + Send + Sync;

    /// Fetches and constructs the entity.
    async fn fetch(connector: &ConnectorRef, key: Self::Key) -> Result<Self, Error>;
}

/// A lazily resolved reference to a related entity.
///
/// Holds the related key and a memo slot. The first [`resolve`](Self::resolve) performs
/// one fetch; concurrent first calls wait on that same fetch rather than issuing their
/// own. A fetch that fails or is abandoned leaves the slot empty for a later retry,
/// and only a completed fetch for this relation's key is ever stored.
pub struct Relation<T: Resolve> {
    key: T::Key,
    cell: OnceCell<Arc<T>>,
}

impl<T: Resolve> Relation<T> {
    /// Creates an unresolved relation.
    pub fn new(key: T::Key) -> Self {
        Self {
            key,
            cell: OnceCell::new(),
        }
    }

    /// Creates a relation already holding its target.
    pub fn resolved(key: T::Key, value: Arc<T>) -> Self {
        Self {
            key,
            cell: OnceCell::new_with(Some(value)),
        }
    }

    /// Key of the related entity.
    pub fn key(&self) -> T::Key {
        self.key
    }

    /// The related entity if it has already been resolved.
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// Returns true once the related entity has been fetched.
    pub fn is_resolved(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the related entity, fetching it on first access.
    ///
    /// # Returns
    /// - `Ok(Arc<T>)` - The memoized or freshly fetched entity
    /// - `Err(Error)` - The connector's error, unchanged; the relation stays unresolved
    pub async fn resolve(&self, connector: &ConnectorRef) -> Result<Arc<T>, Error> {
        let key = self.key;
        self.cell
            .get_or_try_init(|| async move {
                tracing::debug!("Resolving {} {:?}", std::any::type_name::<T>(), key);
                T::fetch(connector, key).await.map(Arc::new)
            })
            .await
            .cloned()
    }

    /// Drops the memoized entity so the next access fetches again.
    pub fn reset(&mut self) {
        self.cell = OnceCell::new();
    }

    /// Points the relation at `key`, keeping the memo only if the key is unchanged.
    pub(crate) fn retarget(&mut self, key: T::Key) {
        if self.key != key {
            self.key = key;
            self.reset();
        }
    }
}

impl<T: Resolve> Clone for Relation<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            cell: self.cell.clone(),
        }
    }
}

impl<T: Resolve> fmt::Debug for Relation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("key", &self.key)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
