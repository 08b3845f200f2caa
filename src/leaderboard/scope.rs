use std::fmt;

/// Which population a leaderboard ranks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LeaderboardScope {
    /// Every visible trainer
    #[default]
    Global,
    /// Members of one Discord guild
    Guild(u64),
    /// Members of one community, by handle
    Community(String),
    /// Trainers in one country, by ISO 3166-1 alpha-2 code
    Country(String),
}

impl LeaderboardScope {
    /// Guild id of a guild board.
    pub fn guild_id(&self) -> Option<u64> {
        match self {
            LeaderboardScope::Guild(guild_id) => Some(*guild_id),
            _ => None,
        }
    }

    /// Community handle of a community board.
    pub fn community(&self) -> Option<&str> {
        match self {
            LeaderboardScope::Community(community) => Some(community),
            _ => None,
        }
    }

    /// Country code of a country board.
    pub fn country_code(&self) -> Option<&str> {
        match self {
            LeaderboardScope::Country(country_code) => Some(country_code),
            _ => None,
        }
    }
}

impl fmt::Display for LeaderboardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardScope::Global => write!(f, "global"),
            LeaderboardScope::Guild(guild_id) => write!(f, "guild {guild_id}"),
            LeaderboardScope::Community(community) => write!(f, "community {community}"),
            LeaderboardScope::Country(country_code) => write!(f, "country {country_code}"),
        }
    }
}
