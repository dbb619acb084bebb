//! One-shot actions: OVERLOAD and the reconnect protocol.
//!
//! These functions assume the caller holds the boss lock. Signature checks
//! happen in the engine before the lock is taken; everything here re-checks
//! eligibility so two near-simultaneous requests cannot both pass.

use super::accrual::accrue;
use super::ledger::BossLedger;
use super::types::{DamageReceipt, DamageSource, ReconnectReceipt};
use crate::error::BossError;

/// Burst damage after modifiers, floored to whole units.
pub fn amplified_burst(base: u64, multiplier: f64) -> u64 {
    if !(multiplier > 0.0) {
        return 0;
    }
    (base as f64 * multiplier).floor() as u64
}

/// Reject unless `wallet` may still OVERLOAD this boss.
pub fn check_overload_eligible(ledger: &BossLedger, wallet: &str) -> Result<(), BossError> {
    let boss = ledger.boss();
    if boss.resolved {
        return Err(BossError::BossAlreadyResolved(boss.id));
    }
    match ledger.participant(wallet) {
        None => Err(BossError::NotJoined {
            boss_id: boss.id,
            wallet: wallet.to_string(),
        }),
        Some(p) if p.overload_used => Err(BossError::OverloadAlreadyUsed(wallet.to_string())),
        Some(_) => Ok(()),
    }
}

/// Apply the OVERLOAD burst and burn the wallet's one use.
pub fn apply_overload(
    ledger: &mut BossLedger,
    wallet: &str,
    burst: u64,
    now_ms: i64,
) -> Result<DamageReceipt, BossError> {
    check_overload_eligible(ledger, wallet)?;
    let receipt = ledger.apply_damage(wallet, burst, DamageSource::Burst, now_ms)?;
    if let Some(p) = ledger.participant_mut(wallet) {
        p.overload_used = true;
    }
    Ok(receipt)
}

/// Single bounded catch-up tick for a wallet that was away.
///
/// Credits `min(offline_backlog, cap) * rate`, clears the backlog and burns
/// the wallet's one reconnect. Longer absences earn no more than the cap.
pub fn apply_reconnect(
    ledger: &mut BossLedger,
    wallet: &str,
    rate_per_sec: f64,
    cap_ms: i64,
    now_ms: i64,
) -> Result<ReconnectReceipt, BossError> {
    let boss_id = ledger.boss().id;
    if ledger.boss().resolved {
        return Err(BossError::BossAlreadyResolved(boss_id));
    }
    let participant = ledger
        .participant_mut(wallet)
        .ok_or_else(|| BossError::NotJoined {
            boss_id,
            wallet: wallet.to_string(),
        })?;
    if participant.reconnect_used {
        return Err(BossError::ReconnectAlreadyUsed(wallet.to_string()));
    }

    let backlog_ms = participant.offline_backlog_ms;
    let recovered_ms = backlog_ms.min(cap_ms).max(0);
    let (amount, carry) = accrue(recovered_ms, rate_per_sec, participant.fractional_carry);
    participant.fractional_carry = carry;
    participant.offline_backlog_ms = 0;
    participant.reconnect_used = true;

    let damage = ledger.apply_damage(wallet, amount, DamageSource::Passive, now_ms)?;
    Ok(ReconnectReceipt {
        boss_id,
        recovered_ms,
        backlog_ms,
        damage,
    })
}
