use std::fmt;

use serde::{Deserialize, Serialize};

/// The in-game team a trainer belongs to.
///
/// The service encodes factions as integers `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Faction {
    /// No team chosen yet
    Teamless,
    /// Team Mystic (blue)
    Mystic,
    /// Team Valor (red)
    Valor,
    /// Team Instinct (yellow)
    Instinct,
}

impl Faction {
    /// All factions, ordered by id.
    pub const ALL: [Faction; 4] = [
        Faction::Teamless,
        Faction::Mystic,
        Faction::Valor,
        Faction::Instinct,
    ];

    /// Wire id of the faction.
    pub fn id(self) -> i64 {
        match self {
            Faction::Teamless => 0,
            Faction::Mystic => 1,
            Faction::Valor => 2,
            Faction::Instinct => 3,
        }
    }

    /// Display name of the faction.
    pub fn verbose_name(self) -> &'static str {
        match self {
            Faction::Teamless => "Teamless",
            Faction::Mystic => "Mystic",
            Faction::Valor => "Valor",
            Faction::Instinct => "Instinct",
        }
    }

    /// Team colour as a 24-bit RGB integer.
    pub fn colour(self) -> u32 {
        match self {
            Faction::Teamless => 0x929292,
            Faction::Mystic => 0x0005FF,
            Faction::Valor => 0xFF0000,
            Faction::Instinct => 0xFFF600,
        }
    }
}

impl TryFrom<i64> for Faction {
    type Error = String;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Faction::ALL
            .into_iter()
            .find(|faction| faction.id() == id)
            .ok_or_else(|| format!("unknown faction id {id}"))
    }
}

impl From<Faction> for i64 {
    fn from(faction: Faction) -> Self {
        faction.id()
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verbose_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_ids() {
        for faction in Faction::ALL {
            assert_eq!(Faction::try_from(faction.id()), Ok(faction));
        }
        assert!(Faction::try_from(4).is_err());
    }

    #[test]
    fn deserializes_from_integer() {
        let faction: Faction = serde_json::from_str("2").unwrap();
        assert_eq!(faction, Faction::Valor);
        assert_eq!(faction.to_string(), "Valor");
        assert!(serde_json::from_str::<Faction>("9").is_err());
    }
}
