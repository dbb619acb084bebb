//! Simulation configuration.

use crate::config::EngineConfig;

/// Configuration for a boss fight simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent boss fights to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Players fighting the boss in each run
    pub players: usize,

    /// Simulated seconds between player actions
    pub step_secs: i64,

    /// Steps before a run gives up (default covers one boss weekend)
    pub max_steps: u64,

    /// Per-step chance a present player fires OVERLOAD (once per fight)
    pub overload_chance: f64,

    /// Per-step chance a present player goes offline for a while
    pub absence_chance: f64,

    /// Longest absence, in steps
    pub max_absence_steps: u64,

    /// Share of players buying a Raid License / Overload Amplifier
    pub license_share: f64,
    pub amplifier_share: f64,

    /// Engine tunables (boss health, presence timeout, caps)
    pub engine: EngineConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 10,
            seed: None,
            players: 50,
            step_secs: 15 * 60,
            max_steps: 48 * 4,
            overload_chance: 0.05,
            absence_chance: 0.02,
            max_absence_steps: 32,
            license_share: 0.3,
            amplifier_share: 0.2,
            engine: EngineConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small, fast fight that always ends in a kill; used by tests and the
    /// `--quick` flag.
    pub fn quick(players: usize) -> Self {
        Self {
            num_runs: 3,
            players,
            engine: EngineConfig {
                base_health: 2_000,
                scale_with_players: false,
                ..EngineConfig::default()
            },
            overload_chance: 0.25,
            ..Default::default()
        }
    }

    /// Total simulated seconds a run may cover.
    pub fn horizon_secs(&self) -> i64 {
        self.step_secs * self.max_steps as i64
    }
}
