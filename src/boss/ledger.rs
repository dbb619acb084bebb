//! The contribution ledger of a single boss.
//!
//! A `BossLedger` is the one authoritative record of a boss and everyone
//! fighting it. The engine keeps each ledger behind its own async mutex, so
//! every method here runs with exclusive access and the clamp-and-resolve
//! step in [`BossLedger::apply_damage`] is atomic with respect to all other
//! damage against the same boss.

use super::types::{
    Boss, BossPhase, BossStatus, DamageReceipt, DamageSource, Participant,
};
use crate::error::BossError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossLedger {
    boss: Boss,
    /// Keyed by wallet; iteration order is the settlement order.
    participants: BTreeMap<String, Participant>,
}

impl BossLedger {
    pub fn new(boss: Boss) -> Self {
        Self {
            boss,
            participants: BTreeMap::new(),
        }
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn participant(&self, wallet: &str) -> Option<&Participant> {
        self.participants.get(wallet)
    }

    pub(crate) fn participant_mut(&mut self, wallet: &str) -> Option<&mut Participant> {
        self.participants.get_mut(wallet)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn wallets(&self) -> Vec<String> {
        self.participants.keys().cloned().collect()
    }

    pub fn phase(&self) -> BossPhase {
        if self.boss.resolved {
            BossPhase::Resolved
        } else {
            BossPhase::Active
        }
    }

    /// Sum of every participant's credited damage.
    pub fn credited_total(&self) -> u64 {
        self.participants.values().map(|p| p.total_damage).sum()
    }

    /// Check the accounting rules every ledger obeys: health never exceeds
    /// max health, credited damage sums to the health removed, and each
    /// participant's total splits exactly into passive and burst damage.
    ///
    /// Ledgers built through [`BossLedger::apply_damage`] always pass; this
    /// guards ledgers read back from disk.
    pub fn check_consistency(&self) -> Result<(), &'static str> {
        if self.boss.current_health > self.boss.max_health {
            return Err("current health exceeds max health");
        }
        let mut credited: u64 = 0;
        for p in self.participants.values() {
            if p.passive_damage.checked_add(p.burst_damage) != Some(p.total_damage) {
                return Err("participant total is not passive plus burst");
            }
            credited = credited
                .checked_add(p.total_damage)
                .ok_or("credited damage overflows")?;
        }
        if credited != self.boss.depleted() {
            return Err("credited damage does not match depleted health");
        }
        Ok(())
    }

    /// Add a wallet to the fight. Joining twice returns the existing record
    /// untouched so flaky clients can retry freely.
    pub fn join(
        &mut self,
        wallet: &str,
        character_id: &str,
        now_ms: i64,
    ) -> Result<Participant, BossError> {
        if let Some(existing) = self.participants.get(wallet) {
            return Ok(existing.clone());
        }
        if self.boss.resolved {
            return Err(BossError::BossAlreadyResolved(self.boss.id));
        }
        let participant = Participant::new(wallet, character_id, now_ms);
        self.participants
            .insert(wallet.to_string(), participant.clone());
        Ok(participant)
    }

    /// The sole damage primitive.
    ///
    /// Clamps `amount` to the remaining health and credits only the clamped
    /// part to both the participant and the boss. When that brings health to
    /// zero the boss is resolved in the same step, so no later caller can
    /// land damage on it.
    pub fn apply_damage(
        &mut self,
        wallet: &str,
        amount: u64,
        source: DamageSource,
        now_ms: i64,
    ) -> Result<DamageReceipt, BossError> {
        if self.boss.resolved {
            return Err(BossError::BossAlreadyResolved(self.boss.id));
        }
        let boss_id = self.boss.id;
        let participant =
            self.participants
                .get_mut(wallet)
                .ok_or_else(|| BossError::NotJoined {
                    boss_id,
                    wallet: wallet.to_string(),
                })?;

        let credited = amount.min(self.boss.current_health);
        participant.total_damage += credited;
        match source {
            DamageSource::Passive => participant.passive_damage += credited,
            DamageSource::Burst => participant.burst_damage += credited,
        }
        self.boss.current_health -= credited;

        let resolved_boss = self.boss.current_health == 0;
        if resolved_boss {
            self.boss.resolved = true;
            self.boss.resolved_at_ms = Some(now_ms);
        }

        Ok(DamageReceipt {
            requested: amount,
            credited,
            participant_total: participant.total_damage,
            boss_health: self.boss.current_health,
            resolved_boss,
        })
    }

    /// Record that `wallet` is present at `now_ms`.
    ///
    /// If the wallet's presence had lapsed, the gap between the lapse and
    /// now is added to its offline backlog (passive accrual did not run for
    /// that stretch).
    pub fn touch(&mut self, wallet: &str, now_ms: i64, presence_timeout_ms: i64) {
        if let Some(p) = self.participants.get_mut(wallet) {
            let lapsed_at = p.last_seen_at_ms + presence_timeout_ms;
            if now_ms > lapsed_at {
                p.offline_backlog_ms += now_ms - lapsed_at;
            }
            p.last_seen_at_ms = p.last_seen_at_ms.max(now_ms);
        }
    }

    /// Snapshot for callers, optionally including one wallet's record.
    pub fn status(&self, wallet: Option<&str>) -> BossStatus {
        let participant = wallet.and_then(|w| self.participants.get(w)).cloned();
        let contribution_fraction = participant
            .as_ref()
            .map(|p| crate::settlement::contribution_fraction(p.total_damage, self.boss.max_health));
        BossStatus {
            boss: self.boss.clone(),
            phase: self.phase(),
            participant_count: self.participants.len(),
            total_damage: self.credited_total(),
            participant,
            contribution_fraction,
        }
    }
}
