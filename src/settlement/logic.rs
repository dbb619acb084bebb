use super::types::{SettlementEntry, SettlementResult};
use crate::boss::BossLedger;
use crate::error::BossError;

/// Share of `max_health` dealt, clamped to [0, 1].
pub fn contribution_fraction(total_damage: u64, max_health: u64) -> f64 {
    if max_health == 0 {
        return 0.0;
    }
    (total_damage as f64 / max_health as f64).clamp(0.0, 1.0)
}

/// Compute the settlement of a resolved boss.
///
/// Reads the ledger only. Calling it again on the same ledger yields an
/// identical result.
pub fn settle(ledger: &BossLedger) -> Result<SettlementResult, BossError> {
    let boss = ledger.boss();
    let resolved_at_ms = match (boss.resolved, boss.resolved_at_ms) {
        (true, Some(at)) => at,
        _ => return Err(BossError::BossNotResolved(boss.id)),
    };

    let entries = ledger
        .participants()
        .map(|p| SettlementEntry {
            wallet: p.wallet.clone(),
            character_id: p.character_id.clone(),
            total_damage: p.total_damage,
            contribution_fraction: contribution_fraction(p.total_damage, boss.max_health),
        })
        .collect();

    Ok(SettlementResult {
        boss_id: boss.id,
        epoch_start_ms: boss.epoch_start_ms,
        max_health: boss.max_health,
        resolved_at_ms,
        entries,
    })
}
