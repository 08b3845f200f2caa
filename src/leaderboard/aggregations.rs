use serde::{Deserialize, Deserializer};

use super::entry::LeaderboardEntry;
use crate::{
    error::Error,
    model::{decode, Record},
};

/// Summary statistics over the values of a leaderboard page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Aggregations {
    /// Mean value
    #[serde(deserialize_with = "null_as_zero")]
    pub avg: f64,
    /// Number of entries
    #[serde(deserialize_with = "null_as_zero")]
    pub count: u64,
    /// Lowest value
    #[serde(deserialize_with = "null_as_zero")]
    pub min: f64,
    /// Highest value
    #[serde(deserialize_with = "null_as_zero")]
    pub max: f64,
    /// Sum of every value
    #[serde(deserialize_with = "null_as_zero")]
    pub sum: f64,
}

impl Aggregations {
    /// Reads a summary sent by the service. Missing or null fields are zero.
    pub fn from_record(record: Record) -> Result<Self, Error> {
        decode(record)
    }

    /// Computes the summary of `entries`. An empty page summarises to all zeroes.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LeaderboardEntry>,
    {
        let mut aggregations = Self::default();
        for entry in entries {
            let value = entry.value();
            if aggregations.count == 0 {
                aggregations.min = value;
                aggregations.max = value;
            } else {
                aggregations.min = aggregations.min.min(value);
                aggregations.max = aggregations.max.max(value);
            }
            aggregations.sum += value;
            aggregations.count += 1;
        }
        if aggregations.count > 0 {
            aggregations.avg = aggregations.sum / aggregations.count as f64;
        }
        aggregations
    }
}

/// An empty page is summarised with nulls.
fn null_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
