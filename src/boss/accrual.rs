//! Pull-based passive damage accrual.
//!
//! Nothing runs in the background. Every status read and action first calls
//! [`tick_all`], which credits each participant for the time elapsed since
//! its watermark. Staleness is bounded by how recently anyone touched the
//! boss.

use super::ledger::BossLedger;
use super::types::DamageSource;
use crate::error::BossError;

/// Whole damage units earned over `elapsed_ms` at `rate_per_sec`, plus the
/// new fractional carry.
///
/// The sub-unit remainder is carried into the next tick so many short ticks
/// credit the same total as one long tick.
pub fn accrue(elapsed_ms: i64, rate_per_sec: f64, carry: f64) -> (u64, f64) {
    if elapsed_ms <= 0 || !(rate_per_sec > 0.0) {
        return (0, carry);
    }
    let exact = elapsed_ms as f64 / 1000.0 * rate_per_sec + carry;
    let whole = exact.floor();
    (whole as u64, exact - whole)
}

/// Outcome of one participant's tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Milliseconds of accrual this tick covered.
    pub accrued_ms: i64,
    pub credited: u64,
    pub resolved_boss: bool,
}

/// Outcome of ticking every participant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub ticked: usize,
    pub credited: u64,
    pub resolved_boss: bool,
}

/// Bring one participant's passive damage up to `now_ms`.
///
/// Accrual only covers the stretch during which the wallet counted as
/// present (`last_seen + presence_timeout`). The watermark always advances
/// to `now_ms`; once the boss is resolved a tick credits nothing.
pub fn tick(
    ledger: &mut BossLedger,
    wallet: &str,
    rate_per_sec: f64,
    now_ms: i64,
    presence_timeout_ms: i64,
) -> Result<TickOutcome, BossError> {
    let resolved = ledger.boss().resolved;
    let boss_id = ledger.boss().id;
    let participant = ledger
        .participant_mut(wallet)
        .ok_or_else(|| BossError::NotJoined {
            boss_id,
            wallet: wallet.to_string(),
        })?;

    let window_end = now_ms.min(participant.last_seen_at_ms + presence_timeout_ms);
    let accrued_ms = (window_end - participant.last_tick_at_ms).max(0);
    participant.last_tick_at_ms = participant.last_tick_at_ms.max(now_ms);

    if resolved {
        return Ok(TickOutcome::default());
    }

    let (amount, carry) = accrue(accrued_ms, rate_per_sec, participant.fractional_carry);
    participant.fractional_carry = carry;
    if amount == 0 {
        return Ok(TickOutcome {
            accrued_ms,
            ..TickOutcome::default()
        });
    }

    let receipt = ledger.apply_damage(wallet, amount, DamageSource::Passive, now_ms)?;
    Ok(TickOutcome {
        accrued_ms,
        credited: receipt.credited,
        resolved_boss: receipt.resolved_boss,
    })
}

/// Tick every participant in wallet order.
pub fn tick_all<F>(
    ledger: &mut BossLedger,
    rate_for: F,
    now_ms: i64,
    presence_timeout_ms: i64,
) -> TickSummary
where
    F: Fn(&str) -> f64,
{
    let mut summary = TickSummary::default();
    for wallet in ledger.wallets() {
        let rate = rate_for(&wallet);
        // Only NOT_JOINED can fail here and every wallet came from the ledger
        if let Ok(outcome) = tick(ledger, &wallet, rate, now_ms, presence_timeout_ms) {
            summary.ticked += 1;
            summary.credited += outcome.credited;
            summary.resolved_boss |= outcome.resolved_boss;
        }
    }
    if summary.credited > 0 {
        tracing::debug!(
            boss_id = %ledger.boss().id,
            credited = summary.credited,
            health = ledger.boss().current_health,
            "Passive damage accrued"
        );
    }
    summary
}
