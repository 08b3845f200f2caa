//! Entity identifiers.
//!
//! Trainers and users are keyed by integer ids, updates by UUID and social connections
//! by the `(provider, uid)` pair. The types are kept distinct so that one kind of id can
//! never be passed where another is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer id of a trainer profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainerId(pub i64);

/// Integer id of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl From<i64> for TrainerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TrainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Composite identity of a social connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SocialConnectionKey {
    /// Provider tag, e.g. `"discord"`
    pub provider: String,
    /// Account id on the provider
    pub uid: String,
}

impl SocialConnectionKey {
    /// Creates a key from a provider tag and external uid.
    pub fn new(provider: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            uid: uid.into(),
        }
    }
}

impl fmt::Display for SocialConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.uid)
    }
}
