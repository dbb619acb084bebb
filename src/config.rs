//! Engine configuration, loaded from ~/.leviathan/config.json.

use crate::core::constants::{
    BOSS_BASE_HP, BOSS_NAME, BOSS_SCALING_FACTOR, CHALLENGE_TTL_SECONDS, CONFIG_FILE_NAME,
    OVERLOAD_AMPLIFIER_BURST_MULTIPLIER, PRESENCE_TIMEOUT_SECONDS, RAID_LICENSE_PASSIVE_MULTIPLIER,
    RECONNECT_MAX_OFFLINE_SECONDS,
};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// Tunables for a [`crate::engine::BossEngine`]. Missing fields in the
/// JSON file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub boss_name: String,
    pub base_health: u64,
    /// Scale spawn health with the number of active players.
    pub scale_with_players: bool,
    pub scaling_factor: f64,
    /// How long after its last request a wallet keeps accruing passive damage.
    pub presence_timeout_secs: i64,
    /// Upper bound on the offline time one reconnect compensates.
    pub reconnect_max_offline_secs: i64,
    pub challenge_ttl_secs: i64,
    pub amplifier_burst_multiplier: f64,
    pub license_passive_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            boss_name: BOSS_NAME.to_string(),
            base_health: BOSS_BASE_HP,
            scale_with_players: true,
            scaling_factor: BOSS_SCALING_FACTOR,
            presence_timeout_secs: PRESENCE_TIMEOUT_SECONDS,
            reconnect_max_offline_secs: RECONNECT_MAX_OFFLINE_SECONDS,
            challenge_ttl_secs: CHALLENGE_TTL_SECONDS,
            amplifier_burst_multiplier: OVERLOAD_AMPLIFIER_BURST_MULTIPLIER,
            license_passive_multiplier: RAID_LICENSE_PASSIVE_MULTIPLIER,
        }
    }
}

impl EngineConfig {
    /// Read the config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        persistence::load_json_or_default(CONFIG_FILE_NAME)
    }

    pub fn save(&self) -> io::Result<PathBuf> {
        persistence::save_json(CONFIG_FILE_NAME, self)
    }

    /// Health for a freshly spawned boss:
    /// `max(base, floor(base * active_players * scaling_factor))`.
    pub fn spawn_health(&self, active_players: usize) -> u64 {
        if !self.scale_with_players {
            return self.base_health;
        }
        let scaled = (self.base_health as f64 * active_players as f64 * self.scaling_factor).floor();
        self.base_health.max(scaled as u64)
    }

    pub fn presence_timeout_ms(&self) -> i64 {
        self.presence_timeout_secs * 1000
    }

    pub fn reconnect_cap_ms(&self) -> i64 {
        self.reconnect_max_offline_secs * 1000
    }

    pub fn challenge_ttl_ms(&self) -> i64 {
        self.challenge_ttl_secs * 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_health_has_floor() {
        let config = EngineConfig::default();
        assert_eq!(config.spawn_health(0), 100_000);
        assert_eq!(config.spawn_health(1), 100_000);
    }

    #[test]
    fn test_spawn_health_scales() {
        let config = EngineConfig::default();
        assert_eq!(config.spawn_health(10), 800_000);
        assert_eq!(config.spawn_health(3), 240_000);
    }

    #[test]
    fn test_scaling_can_be_disabled() {
        let config = EngineConfig {
            scale_with_players: false,
            base_health: 1000,
            ..EngineConfig::default()
        };
        assert_eq!(config.spawn_health(50), 1000);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"base_health": 5000}"#).unwrap();
        assert_eq!(config.base_health, 5000);
        assert_eq!(config.boss_name, "Protocol Leviathan");
        assert_eq!(config.presence_timeout_ms(), 900_000);
        assert_eq!(config.reconnect_cap_ms(), 4 * 3_600_000);
    }
}
