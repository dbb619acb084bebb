use crate::core::constants::{
    CRITICAL_OVERLOAD_MULTIPLIER, OVERLOAD_ARTIFACT_MULTIPLIER, OVERLOAD_CRYSTAL_MULTIPLIER,
    OVERLOAD_SCRAP_MULTIPLIER, PASSIVE_BASE_POWER, PASSIVE_POWER_PER_ARMOR,
    PASSIVE_POWER_PER_ENGINE, PASSIVE_POWER_PER_SCANNER, PASSIVE_SCORE_DIVISOR, SECONDS_PER_HOUR,
};
use serde::{Deserialize, Serialize};

/// The parts of a character's weekly run that feed boss damage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub character_id: String,
    pub armor_level: u32,
    pub engine_level: u32,
    pub scanner_level: u32,
    pub score: u64,
    pub scrap: u64,
    pub crystal: u64,
    pub artifact: u64,
    /// Perk that boosts OVERLOAD by half.
    pub critical_overload: bool,
}

impl Loadout {
    pub fn new(character_id: impl Into<String>) -> Self {
        Self {
            character_id: character_id.into(),
            ..Self::default()
        }
    }

    /// Passive boss damage per hour in the fight.
    pub fn passive_power_per_hour(&self) -> f64 {
        PASSIVE_BASE_POWER
            + self.armor_level as f64 * PASSIVE_POWER_PER_ARMOR
            + self.engine_level as f64 * PASSIVE_POWER_PER_ENGINE
            + self.scanner_level as f64 * PASSIVE_POWER_PER_SCANNER
            + self.score as f64 / PASSIVE_SCORE_DIVISOR
    }

    pub fn passive_rate_per_sec(&self) -> f64 {
        self.passive_power_per_hour() / SECONDS_PER_HOUR
    }

    /// OVERLOAD damage: every resource burned at once.
    pub fn overload_damage(&self) -> u64 {
        // Saturates rather than wrapping on absurd inventories
        let raw = self
            .scrap
            .saturating_mul(OVERLOAD_SCRAP_MULTIPLIER)
            .saturating_add(self.crystal.saturating_mul(OVERLOAD_CRYSTAL_MULTIPLIER))
            .saturating_add(self.artifact.saturating_mul(OVERLOAD_ARTIFACT_MULTIPLIER));
        if self.critical_overload {
            // Float to int casts saturate at u64::MAX
            (raw as f64 * CRITICAL_OVERLOAD_MULTIPLIER).floor() as u64
        } else {
            raw
        }
    }
}
