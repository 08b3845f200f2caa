//! Ranked pages of trainers and the views derived from them.
//!
//! A [`Leaderboard`] owns one page of entries exactly as the service ranked them.
//! Filtering never touches that page; every filter returns a [`LeaderboardView`] with
//! its own recomputed [`Aggregations`]. Both implement [`Ranked`], which carries the
//! positional lookup, iteration and synchronous filtering shared by the two.

mod aggregations;
mod entry;
mod scope;


pub use aggregations::Aggregations;
pub use entry::LeaderboardEntry;
pub use scope::LeaderboardScope;

use std::{future::Future, iter::Rev, ops::RangeInclusive, slice, sync::Arc};

use futures::stream::{FuturesUnordered, StreamExt};

use crate::{
    connector::{ConnectorRef, LeaderboardPage},
    entity::trainer::Trainer,
    error::Error,
    model::{
        faction::Faction,
        id::{TrainerId, UserId},
    },
    schema::UPDATE,
};

const MAX_CONCURRENT_TRAINER_FETCHES: usize = 10;

/// Behaviour shared by a leaderboard page and the views filtered from it.
pub trait Ranked {
    /// Stat the entries are ranked by.
    fn stat(&self) -> &str;

    /// Population the entries were ranked within.
    fn scope(&self) -> &LeaderboardScope;

    /// Entries in rank order.
    fn entries(&self) -> &[Arc<LeaderboardEntry>];

    /// Summary over the entries.
    fn aggregations(&self) -> &Aggregations;

    /// Number of entries.
    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if there are no entries.
    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// The entry in the given 1-based slot of the page.
    ///
    /// # Returns
    /// - `Ok(entry)` - The entry in that slot
    /// - `Err(Error::OutOfRange)` - `position` is 0 or past the last entry
    fn entry(&self, position: usize) -> Result<&Arc<LeaderboardEntry>, Error> {
        let entries = self.entries();
        position
            .checked_sub(1)
            .and_then(|index| entries.get(index))
            .ok_or(Error::OutOfRange {
                what: "position",
                value: position as u64,
                min: 1,
                max: entries.len() as u64,
            })
    }

    /// Every entry ranked at `position`. Ties share a position.
    fn entries_at(&self, position: u64) -> Vec<Arc<LeaderboardEntry>> {
        self.entries()
            .iter()
            .filter(|entry| entry.position() == position)
            .cloned()
            .collect()
    }

    /// Iterates in rank order. Every call starts from the top.
    fn iter(&self) -> slice::Iter<'_, Arc<LeaderboardEntry>> {
        self.entries().iter()
    }

    /// Iterates from the bottom of the page up.
    fn iter_rev(&self) -> Rev<slice::Iter<'_, Arc<LeaderboardEntry>>> {
        self.entries().iter().rev()
    }

    /// The first entry.
    fn top(&self) -> Option<&Arc<LeaderboardEntry>> {
        self.entries().first()
    }

    /// The last entry.
    fn bottom(&self) -> Option<&Arc<LeaderboardEntry>> {
        self.entries().last()
    }

    /// The first entry in rank order matching `predicate`, or `default`.
    fn find<P>(
        &self,
        mut predicate: P,
        default: Option<Arc<LeaderboardEntry>>,
    ) -> Option<Arc<LeaderboardEntry>>
    where
        P: FnMut(&LeaderboardEntry) -> bool,
    {
        self.iter()
            .find(|entry| predicate(entry))
            .cloned()
            .or(default)
    }

    /// Like [`find`](Self::find) with a fallible predicate. The first error stops the
    /// scan and is returned unchanged.
    fn try_find<P, E>(&self, mut predicate: P) -> Result<Option<Arc<LeaderboardEntry>>, E>
    where
        P: FnMut(&LeaderboardEntry) -> Result<bool, E>,
    {
        for entry in self.iter() {
            if predicate(entry)? {
                return Ok(Some(Arc::clone(entry)));
            }
        }
        Ok(None)
    }

    /// A view holding the entries matching `predicate`, in rank order.
    fn filter<P>(&self, mut predicate: P) -> LeaderboardView
    where
        P: FnMut(&LeaderboardEntry) -> bool,
    {
        let entries = self
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect();
        LeaderboardView::new(self.stat(), self.scope().clone(), entries)
    }

    /// Like [`filter`](Self::filter) with a fallible predicate. The first error is
    /// returned unchanged.
    fn try_filter<P, E>(&self, mut predicate: P) -> Result<LeaderboardView, E>
    where
        P: FnMut(&LeaderboardEntry) -> Result<bool, E>,
    {
        let mut entries = Vec::new();
        for entry in self.iter() {
            if predicate(entry)? {
                entries.push(Arc::clone(entry));
            }
        }
        Ok(LeaderboardView::new(self.stat(), self.scope().clone(), entries))
    }

    /// Entries whose trainer is in one of `factions`.
    fn filter_teams(&self, factions: &[Faction]) -> LeaderboardView {
        self.filter(|entry| {
            entry
                .faction()
                .is_some_and(|faction| factions.contains(&faction))
        })
    }

    /// Entries whose level lies in `levels`. Entries with an unknown level are dropped.
    fn filter_levels(&self, levels: RangeInclusive<u32>) -> LeaderboardView {
        self.filter(|entry| {
            entry
                .level()
                .is_some_and(|tier| levels.contains(&tier.level))
        })
    }

    /// Entries owned by one of `users`.
    fn filter_users(&self, users: &[UserId]) -> LeaderboardView {
        self.filter(|entry| entry.user_id().is_some_and(|user| users.contains(&user)))
    }

    /// Entries for one of `trainers`.
    fn filter_trainers(&self, trainers: &[TrainerId]) -> LeaderboardView {
        self.filter(|entry| trainers.contains(&entry.trainer_id()))
    }

    /// Team Mystic only.
    fn mystic(&self) -> LeaderboardView {
        self.filter_teams(&[Faction::Mystic])
    }

    /// Team Valor only.
    fn valor(&self) -> LeaderboardView {
        self.filter_teams(&[Faction::Valor])
    }

    /// Team Instinct only.
    fn instinct(&self) -> LeaderboardView {
        self.filter_teams(&[Faction::Instinct])
    }
}

/// One page of a leaderboard as ranked by the service.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    stat: String,
    scope: LeaderboardScope,
    title: Option<String>,
    entries: Vec<Arc<LeaderboardEntry>>,
    aggregations: Aggregations,
}

impl Leaderboard {
    /// Builds a leaderboard from a page returned by the connector.
    ///
    /// The service's summary is used when it covers exactly this page; otherwise the
    /// summary is computed from the entries.
    ///
    /// # Arguments
    /// - `connector` - Connector the entries resolve their trainers through
    /// - `stat` - Canonical stat that was requested, used when the page names no known stat
    /// - `scope` - Population that was requested
    /// - `page` - The page as returned by [`Connector::get_leaderboard`](crate::Connector)
    pub fn from_page(
        connector: ConnectorRef,
        stat: &str,
        scope: LeaderboardScope,
        page: LeaderboardPage,
    ) -> Result<Self, Error> {
        let stat = page
            .stat
            .as_deref()
            .and_then(|wire| UPDATE.canonical_field(wire))
            .unwrap_or(stat)
            .to_string();
        let entries = page
            .entries
            .iter()
            .map(|wire| {
                LeaderboardEntry::from_wire(connector.clone(), &stat, wire).map(Arc::new)
            })
            .collect::<Result<Vec<_>, Error>>()?;

        let computed = Aggregations::from_entries(entries.iter().map(Arc::as_ref));
        let aggregations = match page.aggregations.map(Aggregations::from_record).transpose()? {
            Some(summary) if summary.count == computed.count => summary,
            Some(summary) => {
                tracing::debug!(
                    "Leaderboard {} summary counts {} entries, page has {}; recomputing",
                    stat,
                    summary.count,
                    computed.count
                );
                computed
            }
            None => computed,
        };

        Ok(Self {
            stat,
            scope,
            title: page.title,
            entries,
            aggregations,
        })
    }

    /// Display title sent by the service.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Guild id of a guild board.
    pub fn guild_id(&self) -> Option<u64> {
        self.scope.guild_id()
    }

    /// Community handle of a community board.
    pub fn community(&self) -> Option<&str> {
        self.scope.community()
    }

    /// Country code of a country board.
    pub fn country_code(&self) -> Option<&str> {
        self.scope.country_code()
    }

    /// Country name of a country board, taken from its title.
    pub fn country_name(&self) -> Option<&str> {
        self.scope.country_code()?;
        let title = self.title.as_deref()?;
        Some(title.strip_suffix(" Leaderboard").unwrap_or(title))
    }

    /// Filters with an asynchronous predicate, evaluated in rank order.
    pub async fn filter_async<P, Fut, E>(&self, predicate: P) -> Result<LeaderboardView, E>
    where
        P: FnMut(Arc<LeaderboardEntry>) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        filter_async(self, predicate).await
    }

    /// Finds with an asynchronous predicate, evaluated in rank order.
    pub async fn find_async<P, Fut, E>(
        &self,
        predicate: P,
        default: Option<Arc<LeaderboardEntry>>,
    ) -> Result<Option<Arc<LeaderboardEntry>>, E>
    where
        P: FnMut(Arc<LeaderboardEntry>) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        find_async(self, predicate, default).await
    }

    /// Resolves the trainer of every entry, in rank order.
    pub async fn trainers(&self) -> Result<Vec<Arc<Trainer>>, Error> {
        resolve_trainers(&self.entries).await
    }
}

impl Ranked for Leaderboard {
    fn stat(&self) -> &str {
        &self.stat
    }

    fn scope(&self) -> &LeaderboardScope {
        &self.scope
    }

    fn entries(&self) -> &[Arc<LeaderboardEntry>] {
        &self.entries
    }

    fn aggregations(&self) -> &Aggregations {
        &self.aggregations
    }
}

/// A filtered subset of a leaderboard page.
#[derive(Debug, Clone)]
pub struct LeaderboardView {
    stat: String,
    scope: LeaderboardScope,
    entries: Vec<Arc<LeaderboardEntry>>,
    aggregations: Aggregations,
}

impl LeaderboardView {
    fn new(stat: &str, scope: LeaderboardScope, entries: Vec<Arc<LeaderboardEntry>>) -> Self {
        let aggregations = Aggregations::from_entries(entries.iter().map(Arc::as_ref));
        Self {
            stat: stat.to_string(),
            scope,
            entries,
            aggregations,
        }
    }

    /// Filters with an asynchronous predicate, evaluated in rank order.
    pub async fn filter_async<P, Fut, E>(&self, predicate: P) -> Result<LeaderboardView, E>
    where
        P: FnMut(Arc<LeaderboardEntry>) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        filter_async(self, predicate).await
    }

    /// Finds with an asynchronous predicate, evaluated in rank order.
    pub async fn find_async<P, Fut, E>(
        &self,
        predicate: P,
        default: Option<Arc<LeaderboardEntry>>,
    ) -> Result<Option<Arc<LeaderboardEntry>>, E>
    where
        P: FnMut(Arc<LeaderboardEntry>) -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        find_async(self, predicate, default).await
    }

    /// Resolves the trainer of every entry, in rank order.
    pub async fn trainers(&self) -> Result<Vec<Arc<Trainer>>, Error> {
        resolve_trainers(&self.entries).await
    }
}

impl Ranked for LeaderboardView {
    fn stat(&self) -> &str {
        &self.stat
    }

    fn scope(&self) -> &LeaderboardScope {
        &self.scope
    }

    fn entries(&self) -> &[Arc<LeaderboardEntry>] {
        &self.entries
    }

    fn aggregations(&self) -> &Aggregations {
        &self.aggregations
    }
}

async fn filter_async<R, P, Fut, E>(ranked: &R, mut predicate: P) -> Result<LeaderboardView, E>
where
    R: Ranked + ?Sized,
    P: FnMut(Arc<LeaderboardEntry>) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let mut entries = Vec::new();
    for entry in ranked.iter() {
        if predicate(Arc::clone(entry)).await? {
            entries.push(Arc::clone(entry));
        }
    }
    Ok(LeaderboardView::new(ranked.stat(), ranked.scope().clone(), entries))
}

async fn find_async<R, P, Fut, E>(
    ranked: &R,
    mut predicate: P,
    default: Option<Arc<LeaderboardEntry>>,
) -> Result<Option<Arc<LeaderboardEntry>>, E>
where
    R: Ranked + ?Sized,
    P: FnMut(Arc<LeaderboardEntry>) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    for entry in ranked.iter() {
        if predicate(Arc::clone(entry)).await? {
            return Ok(Some(Arc::clone(entry)));
        }
    }
    Ok(default)
}

async fn resolve_trainers(entries: &[Arc<LeaderboardEntry>]) -> Result<Vec<Arc<Trainer>>, Error> {
    let mut resolved = Vec::with_capacity(entries.len());

    for (chunk_index, chunk) in entries.chunks(MAX_CONCURRENT_TRAINER_FETCHES).enumerate() {
        let mut futures = FuturesUnordered::new();

        for (offset, entry) in chunk.iter().enumerate() {
            let index = chunk_index * MAX_CONCURRENT_TRAINER_FETCHES + offset;
            let future = async move {
                let trainer = entry.trainer().await?;
                Ok::<_, Error>((index, trainer))
            };
            futures.push(future);
        }

        while let Some(fetched_trainer) = futures.next().await {
            resolved.push(fetched_trainer?);
        }
    }

    resolved.sort_by_key(|(index, _)| *index);
    Ok(resolved.into_iter().map(|(_, trainer)| trainer).collect())
}
