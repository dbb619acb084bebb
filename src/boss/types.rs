//! Boss and participant records plus the snapshots handed to callers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BossId = Uuid;

/// One world boss per epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    pub id: BossId,
    pub name: String,
    pub epoch_start_ms: i64,
    pub max_health: u64,
    /// Never increases; floor 0.
    pub current_health: u64,
    pub spawned_at_ms: i64,
    /// Set exactly once, in the same step that brings health to 0.
    pub resolved: bool,
    pub resolved_at_ms: Option<i64>,
}

impl Boss {
    pub fn new(name: &str, epoch_start_ms: i64, max_health: u64, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            epoch_start_ms,
            max_health,
            current_health: max_health,
            spawned_at_ms: now_ms,
            resolved: false,
            resolved_at_ms: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.resolved
    }

    /// Damage credited so far.
    pub fn depleted(&self) -> u64 {
        self.max_health.saturating_sub(self.current_health)
    }

    /// Remaining health as a fraction of max health (0.0 to 1.0).
    pub fn health_ratio(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f64 / self.max_health as f64
    }
}

/// Lifecycle stage of a boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    Active,
    Resolved,
}

/// A wallet's standing in one boss fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub wallet: String,
    pub character_id: String,
    /// `passive_damage + burst_damage`; never decreases.
    pub total_damage: u64,
    pub passive_damage: u64,
    pub burst_damage: u64,
    /// Passive accrual watermark.
    pub last_tick_at_ms: i64,
    /// Last time this wallet touched the boss itself.
    pub last_seen_at_ms: i64,
    /// Time passive accrual was suspended because the wallet was away,
    /// recoverable (up to a cap) through the reconnect protocol.
    pub offline_backlog_ms: i64,
    /// Sub-unit passive damage not yet credited, in [0, 1).
    pub fractional_carry: f64,
    pub overload_used: bool,
    pub reconnect_used: bool,
    pub joined_at_ms: i64,
}

impl Participant {
    pub fn new(wallet: &str, character_id: &str, now_ms: i64) -> Self {
        Self {
            wallet: wallet.to_string(),
            character_id: character_id.to_string(),
            total_damage: 0,
            passive_damage: 0,
            burst_damage: 0,
            last_tick_at_ms: now_ms,
            last_seen_at_ms: now_ms,
            offline_backlog_ms: 0,
            fractional_carry: 0.0,
            overload_used: false,
            reconnect_used: false,
            joined_at_ms: now_ms,
        }
    }
}

/// How credited damage is attributed on the participant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Passive,
    Burst,
}

/// Outcome of a single `apply_damage` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReceipt {
    pub requested: u64,
    /// Amount actually credited after clamping to remaining health.
    pub credited: u64,
    pub participant_total: u64,
    pub boss_health: u64,
    /// This call is the one that brought the boss to 0.
    pub resolved_boss: bool,
}

/// Read-only view of a boss returned by status calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossStatus {
    pub boss: Boss,
    pub phase: BossPhase,
    pub participant_count: usize,
    pub total_damage: u64,
    pub participant: Option<Participant>,
    /// Caller's share of max health, when a wallet was supplied and joined.
    pub contribution_fraction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadReceipt {
    pub boss_id: BossId,
    pub burst_damage: u64,
    pub damage: DamageReceipt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconnectReceipt {
    pub boss_id: BossId,
    /// Offline time actually compensated (after the cap).
    pub recovered_ms: i64,
    pub backlog_ms: i64,
    pub damage: DamageReceipt,
}
