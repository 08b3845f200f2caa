//! XP-to-level progression.
//!
//! The progression is a step function over cumulative XP: each tier begins at a floor
//! and the final tier is open-ended. Lookups are a binary search over the floors.

use std::sync::LazyLock;

use crate::error::{Error, ValidationError};

/// Cumulative XP at which each level begins, level 1 first.
///
/// Each floor equals the previous floor plus the previous tier's requirement.
const DEFAULT_FLOORS: [u64; 50] = [
    0, 1_000, 3_000, 6_000, 10_000, 15_000, 21_000, 28_000, 36_000, 45_000, // 1-10
    55_000, 65_000, 75_000, 85_000, 100_000, 120_000, 140_000, 160_000, 185_000, 210_000, // 11-20
    260_000, 335_000, 435_000, 560_000, 710_000, 900_000, 1_100_000, 1_350_000, 1_650_000,
    2_000_000, // 21-30
    2_500_000, 3_000_000, 3_750_000, 4_750_000, 6_000_000, 7_500_000, 9_500_000, 12_000_000,
    15_000_000, 20_000_000, // 31-40
    26_000_000, 33_500_000, 42_500_000, 53_500_000, 66_500_000, 82_000_000, 100_000_000,
    121_000_000, 146_000_000, 176_000_000, // 41-50
];

static DEFAULT_TABLE: LazyLock<LevelTable> = LazyLock::new(|| {
    let tiers = DEFAULT_FLOORS
        .iter()
        .enumerate()
        .map(|(i, &floor)| LevelTier {
            level: i as u32 + 1,
            total_xp_floor: floor,
            xp_to_next: DEFAULT_FLOORS.get(i + 1).map(|next| next - floor),
        })
        .collect();
    LevelTable { tiers }
});

/// One row of the progression table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelTier {
    /// Level number, starting at 1
    pub level: u32,
    /// Cumulative XP at which this level begins
    pub total_xp_floor: u64,
    /// XP needed to reach the next level, `None` for the open-ended final tier
    pub xp_to_next: Option<u64>,
}

impl LevelTier {
    /// Creates a tier.
    pub const fn new(level: u32, total_xp_floor: u64, xp_to_next: Option<u64>) -> Self {
        Self {
            level,
            total_xp_floor,
            xp_to_next,
        }
    }
}

/// Ordered, immutable XP progression table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    tiers: Vec<LevelTier>,
}

impl LevelTable {
    /// Builds a table from tiers ordered lowest first.
    ///
    /// # Arguments
    /// - `tiers` - Tiers in ascending order
    ///
    /// # Returns
    /// - `Ok(LevelTable)` - The tiers are non-empty, start at 0 XP, are strictly ordered
    ///   by level and XP floor, and every tier but the last requires exactly the XP
    ///   between its floor and the next tier's floor
    /// - `Err(ValidationError::InvalidLevelTable)` - Any of the above does not hold
    pub fn new(tiers: Vec<LevelTier>) -> Result<Self, ValidationError> {
        let Some(first) = tiers.first() else {
            return Err(ValidationError::InvalidLevelTable(
                "table has no tiers".to_string(),
            ));
        };
        if first.total_xp_floor != 0 {
            return Err(ValidationError::InvalidLevelTable(format!(
                "first tier starts at {} XP instead of 0",
                first.total_xp_floor
            )));
        }

        for pair in tiers.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if upper.level <= lower.level || upper.total_xp_floor <= lower.total_xp_floor {
                return Err(ValidationError::InvalidLevelTable(format!(
                    "tier {} is not strictly above tier {}",
                    upper.level, lower.level
                )));
            }
            match lower.xp_to_next {
                None => {
                    return Err(ValidationError::InvalidLevelTable(format!(
                        "tier {} has no next requirement but is not the final tier",
                        lower.level
                    )));
                }
                Some(xp_to_next)
                    if lower.total_xp_floor.checked_add(xp_to_next)
                        != Some(upper.total_xp_floor) =>
                {
                    return Err(ValidationError::InvalidLevelTable(format!(
                        "tier {} requires {} XP but tier {} starts {} XP above it",
                        lower.level,
                        xp_to_next,
                        upper.level,
                        upper.total_xp_floor - lower.total_xp_floor
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Self { tiers })
    }

    /// The 50-level progression used by the service.
    pub fn default_table() -> &'static LevelTable {
        &DEFAULT_TABLE
    }

    /// All tiers, lowest first.
    pub fn tiers(&self) -> &[LevelTier] {
        &self.tiers
    }

    /// Highest level in the table.
    pub fn max_level(&self) -> u32 {
        self.last().level
    }

    /// Returns the tier a trainer with `xp` total XP has reached.
    ///
    /// XP at or above the final floor always resolves to the final tier.
    pub fn level_for_xp(&self, xp: u64) -> LevelTier {
        // Floors are strictly increasing and the first is 0, so at least one tier matches.
        let reached = self.tiers.partition_point(|tier| tier.total_xp_floor <= xp);
        self.tiers[reached.saturating_sub(1)]
    }

    /// Returns the tier for `level`.
    ///
    /// # Returns
    /// - `Ok(LevelTier)` - The level is in the table
    /// - `Err(Error::OutOfRange)` - The level is below the first or above the last tier
    pub fn tier(&self, level: u32) -> Result<LevelTier, Error> {
        self.tiers
            .binary_search_by_key(&level, |tier| tier.level)
            .map(|index| self.tiers[index])
            .map_err(|_| Error::OutOfRange {
                what: "level",
                value: u64::from(level),
                min: u64::from(self.tiers[0].level),
                max: u64::from(self.max_level()),
            })
    }

    /// Cumulative XP at which `level` begins.
    pub fn xp_required_for_level(&self, level: u32) -> Result<u64, Error> {
        self.tier(level).map(|tier| tier.total_xp_floor)
    }

    /// XP needed to cross from `tier` into the next one, `None` at the final tier.
    pub fn next_tier_requirement(&self, tier: &LevelTier) -> Option<u64> {
        if tier.level >= self.max_level() {
            return None;
        }
        tier.xp_to_next
    }

    /// XP still missing before a trainer with `xp` reaches their next level.
    pub fn xp_remaining(&self, xp: u64) -> Option<u64> {
        let tier = self.level_for_xp(xp);
        let next = self.next_tier_requirement(&tier)?;
        Some((tier.total_xp_floor + next).saturating_sub(xp))
    }

    fn last(&self) -> &LevelTier {
        // Construction guarantees at least one tier.
        &self.tiers[self.tiers.len() - 1]
    }
}
