//! Settlement records handed to the reward layer.

use crate::boss::BossId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One participant's share of a resolved boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementEntry {
    pub wallet: String,
    pub character_id: String,
    pub total_damage: u64,
    /// `total_damage / max_health`, clamped to [0, 1].
    pub contribution_fraction: f64,
}

/// Final accounting of a resolved boss. Entries are in wallet order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub boss_id: BossId,
    pub epoch_start_ms: i64,
    pub max_health: u64,
    pub resolved_at_ms: i64,
    pub entries: Vec<SettlementEntry>,
}

impl SettlementResult {
    pub fn entry(&self, wallet: &str) -> Option<&SettlementEntry> {
        self.entries.iter().find(|e| e.wallet == wallet)
    }

    pub fn total_damage(&self) -> u64 {
        self.entries.iter().map(|e| e.total_damage).sum()
    }

    /// Hex SHA-256 over the JSON encoding. Identical settlements always
    /// produce the same digest, so it can be anchored externally.
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}
