//! The boss engine: every operation callers can perform on the world boss.
//!
//! Each request resolves its boss, locks that boss's ledger, brings passive
//! accrual up to the current instant, applies its mutation and returns a
//! fresh snapshot. Lock order is boss ledger first, then the modifier store;
//! the modifier store is never held while a boss lock is awaited.

use crate::boss::{
    amplified_burst, apply_overload, apply_reconnect, check_overload_eligible, tick_all, Boss,
    BossHandle, BossId, BossLedger, BossRegistry, BossStatus, DamageReceipt, DamageSource,
    OverloadReceipt, Participant, ReconnectReceipt, TickSummary,
};
use crate::character::CombatStats;
use crate::config::EngineConfig;
use crate::core::clock::Clock;
use crate::epoch::epoch_key;
use crate::error::{BossError, SnapshotError};
use crate::modifiers::{DamageMultipliers, Modifier, ModifierKind, ModifierStore};
use crate::settlement::{settle, SettlementResult};
use crate::signature::{Challenge, ChallengeAction, ChallengeBook, SignatureVerifier};
use crate::snapshot_store::LedgerSnapshot;
use std::collections::HashMap;
use std::sync::Arc;

/// Effective passive rate per wallet for one epoch: collaborator rate times
/// the wallet's purchased passive multiplier.
struct PassiveRates {
    stats: Arc<dyn CombatStats>,
    multipliers: HashMap<String, DamageMultipliers>,
}

impl PassiveRates {
    fn rate(&self, wallet: &str) -> f64 {
        let multiplier = self.multipliers.get(wallet).map_or(1.0, |m| m.passive);
        self.stats.passive_rate(wallet) * multiplier
    }
}

pub struct BossEngine {
    config: EngineConfig,
    registry: BossRegistry,
    modifiers: ModifierStore,
    challenges: ChallengeBook,
    stats: Arc<dyn CombatStats>,
    verifier: Arc<dyn SignatureVerifier>,
    clock: Arc<dyn Clock>,
}

impl BossEngine {
    pub fn new(
        config: EngineConfig,
        stats: Arc<dyn CombatStats>,
        verifier: Arc<dyn SignatureVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry: BossRegistry::new(config.boss_name.clone()),
            modifiers: ModifierStore::new(
                config.amplifier_burst_multiplier,
                config.license_passive_multiplier,
            ),
            challenges: ChallengeBook::new(config.challenge_ttl_ms()),
            config,
            stats,
            verifier,
            clock,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Current epoch's boss, spawning it during the boss phase.
    pub async fn get_or_spawn(&self) -> Result<Boss, BossError> {
        let handle = self.current_handle().await?;
        let ledger = handle.lock().await;
        Ok(ledger.boss().clone())
    }

    /// Current epoch's boss if it exists. Never spawns.
    pub async fn current_boss(&self) -> Option<Boss> {
        let handle = self.registry.get_current(self.clock.now()).await?;
        let ledger = handle.lock().await;
        Some(ledger.boss().clone())
    }

    /// Status of a specific boss, optionally from one wallet's point of view.
    pub async fn status(&self, boss_id: BossId, wallet: Option<&str>) -> Result<BossStatus, BossError> {
        let handle = self.handle(boss_id).await?;
        self.status_of(&handle, wallet).await
    }

    /// Status of the current epoch's boss.
    pub async fn current_status(&self, wallet: Option<&str>) -> Result<BossStatus, BossError> {
        let handle = self.current_handle().await?;
        self.status_of(&handle, wallet).await
    }

    /// Join the current boss fight. Joining again returns the existing
    /// record and counts as a presence check-in.
    pub async fn join(&self, wallet: &str, character_id: &str) -> Result<Participant, BossError> {
        let handle = self.current_handle().await?;
        let now_ms = self.clock.now_ms();
        let mut ledger = handle.lock().await;
        self.tick_locked(&mut ledger, now_ms).await;
        ledger.touch(wallet, now_ms, self.config.presence_timeout_ms());

        let already_joined = ledger.participant(wallet).is_some();
        let participant = ledger.join(wallet, character_id, now_ms)?;
        if !already_joined {
            tracing::debug!(
                boss_id = %ledger.boss().id,
                wallet,
                character_id,
                participants = ledger.participant_count(),
                "Wallet joined boss fight"
            );
        }
        Ok(participant)
    }

    /// Credit `amount` to `wallet` on a specific boss, clamped to its
    /// remaining health.
    pub async fn apply_damage(
        &self,
        boss_id: BossId,
        wallet: &str,
        amount: u64,
        source: DamageSource,
    ) -> Result<DamageReceipt, BossError> {
        let handle = self.handle(boss_id).await?;
        let now_ms = self.clock.now_ms();
        let mut ledger = handle.lock().await;
        self.tick_locked(&mut ledger, now_ms).await;
        ledger.touch(wallet, now_ms, self.config.presence_timeout_ms());

        let receipt = ledger.apply_damage(wallet, amount, source, now_ms)?;
        if receipt.resolved_boss {
            log_defeat(&ledger);
        }
        Ok(receipt)
    }

    /// Bring passive accrual on the current boss up to now.
    pub async fn tick(&self) -> Result<TickSummary, BossError> {
        let handle = self.current_handle().await?;
        let now_ms = self.clock.now_ms();
        let mut ledger = handle.lock().await;
        Ok(self.tick_locked(&mut ledger, now_ms).await)
    }

    /// Issue a single-use challenge the wallet must sign to perform `action`
    /// on the current boss.
    pub async fn issue_challenge(
        &self,
        wallet: &str,
        action: ChallengeAction,
    ) -> Result<Challenge, BossError> {
        let handle = self.current_handle().await?;
        let now_ms = self.clock.now_ms();
        let boss_id = {
            let ledger = handle.lock().await;
            match action {
                ChallengeAction::Overload => check_overload_eligible(&ledger, wallet)?,
            }
            ledger.boss().id
        };
        let challenge = self.challenges.issue(wallet, action, boss_id, now_ms).await;
        tracing::debug!(%boss_id, wallet, %action, expires_at_ms = challenge.expires_at_ms, "Challenge issued");
        Ok(challenge)
    }

    /// The one-shot OVERLOAD burst, gated on a signature over a challenge
    /// from [`BossEngine::issue_challenge`].
    pub async fn overload(&self, wallet: &str, signature: &str) -> Result<OverloadReceipt, BossError> {
        let handle = self.current_handle().await?;
        let now_ms = self.clock.now_ms();
        let (boss_id, epoch_start_ms) = {
            let mut ledger = handle.lock().await;
            self.tick_locked(&mut ledger, now_ms).await;
            ledger.touch(wallet, now_ms, self.config.presence_timeout_ms());
            check_overload_eligible(&ledger, wallet)?;
            (ledger.boss().id, ledger.boss().epoch_start_ms)
        };

        // Verification happens without the boss lock held
        if signature.trim().is_empty() {
            return Err(BossError::SignatureRequired);
        }
        let challenge = self
            .challenges
            .take(wallet, ChallengeAction::Overload, boss_id, now_ms)
            .await
            .ok_or(BossError::SignatureRequired)?;
        if let Err(e) = self.verifier.verify(wallet, &challenge.message, signature) {
            tracing::warn!(%boss_id, wallet, error = %e, "Rejected OVERLOAD signature");
            return Err(BossError::SignatureInvalid(wallet.to_string()));
        }

        let multipliers = self.modifiers.multipliers(wallet, epoch_start_ms).await;
        let burst_damage = amplified_burst(self.stats.burst_damage(wallet), multipliers.burst);

        let now_ms = self.clock.now_ms();
        let mut ledger = handle.lock().await;
        self.tick_locked(&mut ledger, now_ms).await;
        let damage = apply_overload(&mut ledger, wallet, burst_damage, now_ms)?;
        tracing::info!(%boss_id, wallet, burst_damage, credited = damage.credited, "OVERLOAD landed");
        if damage.resolved_boss {
            log_defeat(&ledger);
        }
        Ok(OverloadReceipt {
            boss_id,
            burst_damage,
            damage,
        })
    }

    /// The one-shot reconnect protocol: a bounded catch-up for time spent
    /// away from the fight.
    pub async fn reconnect(&self, wallet: &str) -> Result<ReconnectReceipt, BossError> {
        let handle = self.current_handle().await?;
        let now_ms = self.clock.now_ms();
        let mut ledger = handle.lock().await;
        let rates = self.passive_rates(ledger.boss().epoch_start_ms).await;
        self.tick_with(&mut ledger, &rates, now_ms);
        ledger.touch(wallet, now_ms, self.config.presence_timeout_ms());

        let receipt = apply_reconnect(
            &mut ledger,
            wallet,
            rates.rate(wallet),
            self.config.reconnect_cap_ms(),
            now_ms,
        )?;
        tracing::info!(
            boss_id = %receipt.boss_id,
            wallet,
            backlog_ms = receipt.backlog_ms,
            recovered_ms = receipt.recovered_ms,
            credited = receipt.damage.credited,
            "Reconnect protocol applied"
        );
        if receipt.damage.resolved_boss {
            log_defeat(&ledger);
        }
        Ok(receipt)
    }

    pub async fn purchase_amplifier(&self, wallet: &str) -> Result<Modifier, BossError> {
        self.purchase(wallet, ModifierKind::OverloadAmplifier).await
    }

    pub async fn purchase_license(&self, wallet: &str) -> Result<Modifier, BossError> {
        self.purchase(wallet, ModifierKind::RaidLicense).await
    }

    /// Record a modifier for the current epoch.
    ///
    /// The current boss, if any, is ticked first so a new passive multiplier
    /// never applies to time that already elapsed.
    pub async fn purchase(&self, wallet: &str, kind: ModifierKind) -> Result<Modifier, BossError> {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();
        if let Some(handle) = self.registry.get_current(now).await {
            let mut ledger = handle.lock().await;
            self.tick_locked(&mut ledger, now_ms).await;
        }
        self.modifiers.purchase(wallet, epoch_key(now), kind, now_ms).await
    }

    /// Settlement of a resolved boss. Read-only; repeated calls return
    /// identical results.
    pub async fn resolve(&self, boss_id: BossId) -> Result<SettlementResult, BossError> {
        let handle = self.handle(boss_id).await?;
        let now_ms = self.clock.now_ms();
        let mut ledger = handle.lock().await;
        self.tick_locked(&mut ledger, now_ms).await;
        let settlement = settle(&ledger)?;
        tracing::info!(
            %boss_id,
            participants = settlement.entries.len(),
            max_health = settlement.max_health,
            "Boss settled"
        );
        Ok(settlement)
    }

    /// Copy of every ledger and modifier.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        let mut bosses = Vec::new();
        for handle in self.registry.handles().await {
            bosses.push(handle.lock().await.clone());
        }
        LedgerSnapshot {
            taken_at_ms: self.clock.now_ms(),
            bosses,
            modifiers: self.modifiers.all().await,
        }
    }

    /// Load a snapshot into this engine. Bosses for epochs the engine already
    /// tracks are kept as they are; modifiers are replaced.
    ///
    /// Every ledger is checked before anything is loaded, so a rejected
    /// snapshot leaves the engine untouched.
    pub async fn restore(&self, snapshot: LedgerSnapshot) -> Result<(), SnapshotError> {
        for ledger in &snapshot.bosses {
            if let Err(reason) = ledger.check_consistency() {
                tracing::warn!(boss_id = %ledger.boss().id, reason, "Rejected ledger snapshot");
                return Err(SnapshotError::InvalidLedger {
                    boss_id: ledger.boss().id,
                    reason,
                });
            }
        }

        let boss_count = snapshot.bosses.len();
        for ledger in snapshot.bosses {
            self.registry.insert(ledger).await;
        }
        let modifier_count = snapshot.modifiers.len();
        self.modifiers.restore(snapshot.modifiers).await;
        tracing::info!(bosses = boss_count, modifiers = modifier_count, "Ledger restored");
        Ok(())
    }

    async fn current_handle(&self) -> Result<BossHandle, BossError> {
        let stats = Arc::clone(&self.stats);
        let config = &self.config;
        self.registry
            .get_or_spawn(self.clock.now(), || config.spawn_health(stats.active_players()))
            .await
            .ok_or(BossError::NoActiveBoss)
    }

    async fn handle(&self, boss_id: BossId) -> Result<BossHandle, BossError> {
        self.registry
            .get(boss_id)
            .await
            .ok_or(BossError::BossNotFound(boss_id))
    }

    async fn status_of(&self, handle: &BossHandle, wallet: Option<&str>) -> Result<BossStatus, BossError> {
        let now_ms = self.clock.now_ms();
        let mut ledger = handle.lock().await;
        self.tick_locked(&mut ledger, now_ms).await;
        if let Some(wallet) = wallet {
            ledger.touch(wallet, now_ms, self.config.presence_timeout_ms());
        }
        Ok(ledger.status(wallet))
    }

    async fn passive_rates(&self, epoch_start_ms: i64) -> PassiveRates {
        PassiveRates {
            stats: Arc::clone(&self.stats),
            multipliers: self.modifiers.epoch_view(epoch_start_ms).await,
        }
    }

    async fn tick_locked(&self, ledger: &mut BossLedger, now_ms: i64) -> TickSummary {
        let rates = self.passive_rates(ledger.boss().epoch_start_ms).await;
        self.tick_with(ledger, &rates, now_ms)
    }

    fn tick_with(&self, ledger: &mut BossLedger, rates: &PassiveRates, now_ms: i64) -> TickSummary {
        let summary = tick_all(
            ledger,
            |wallet| rates.rate(wallet),
            now_ms,
            self.config.presence_timeout_ms(),
        );
        if summary.resolved_boss {
            log_defeat(ledger);
        }
        summary
    }
}

fn log_defeat(ledger: &BossLedger) {
    let boss = ledger.boss();
    tracing::info!(
        boss_id = %boss.id,
        name = %boss.name,
        max_health = boss.max_health,
        participants = ledger.participant_count(),
        "World boss defeated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Loadout, Roster};
    use crate::core::clock::ManualClock;
    use crate::signature::{sign_message, wallet_address, Ed25519Verifier};
    use ed25519_dalek::SigningKey;

    struct Harness {
        engine: BossEngine,
        clock: Arc<ManualClock>,
        roster: Arc<Roster>,
    }

    fn harness(base_health: u64) -> Harness {
        let clock = Arc::new(ManualClock::at_utc(2026, 10, 17, 12));
        let roster = Arc::new(Roster::new());
        let config = EngineConfig {
            base_health,
            scale_with_players: false,
            ..EngineConfig::default()
        };
        let engine = BossEngine::new(
            config,
            roster.clone(),
            Arc::new(Ed25519Verifier),
            clock.clone(),
        );
        Harness {
            engine,
            clock,
            roster,
        }
    }

    fn signer(seed: u8) -> (SigningKey, String) {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let wallet = wallet_address(&key);
        (key, wallet)
    }

    #[tokio::test]
    async fn test_no_boss_outside_phase() {
        let h = harness(1000);
        h.clock.set(ManualClock::at_utc(2026, 10, 14, 12).now());
        assert_eq!(h.engine.get_or_spawn().await.unwrap_err().code(), "NO_ACTIVE_BOSS");
        assert_eq!(h.engine.join("a", "c").await.unwrap_err().code(), "NO_ACTIVE_BOSS");
        assert!(h.engine.current_boss().await.is_none());
    }

    #[tokio::test]
    async fn test_join_then_status() {
        let h = harness(1000);
        h.engine.join("a", "char-a").await.unwrap();
        let status = h.engine.current_status(Some("a")).await.unwrap();
        assert_eq!(status.participant_count, 1);
        assert_eq!(status.participant.unwrap().character_id, "char-a");
        assert_eq!(status.contribution_fraction, Some(0.0));
    }

    #[tokio::test]
    async fn test_passive_accrues_through_status() {
        let h = harness(1_000_000);
        // 36 power per hour = 0.01 per second
        h.roster.upsert("a", Loadout { armor_level: 4, engine_level: 4, scanner_level: 3, ..Loadout::new("c") });
        h.engine.join("a", "c").await.unwrap();
        h.clock.advance_secs(600);
        let status = h.engine.current_status(Some("a")).await.unwrap();
        assert_eq!(status.participant.unwrap().passive_damage, 6);
    }

    #[tokio::test]
    async fn test_license_boosts_passive() {
        let h = harness(1_000_000);
        h.roster.upsert("a", Loadout { score: 35_000, ..Loadout::new("c") });
        h.engine.join("a", "c").await.unwrap();
        h.engine.purchase_license("a").await.unwrap();
        h.clock.advance_secs(360);
        // 360/h * 1.25 for 0.1h
        let status = h.engine.current_status(Some("a")).await.unwrap();
        assert_eq!(status.total_damage, 45);
    }

    #[tokio::test]
    async fn test_duplicate_purchase_rejected() {
        let h = harness(1000);
        h.engine.purchase_amplifier("a").await.unwrap();
        let err = h.engine.purchase_amplifier("a").await.unwrap_err();
        assert_eq!(err.code(), "ALREADY_PURCHASED");
        h.engine.purchase_license("a").await.unwrap();
    }

    #[tokio::test]
    async fn test_overload_flow() {
        let h = harness(100_000);
        let (key, wallet) = signer(1);
        h.roster.upsert(&wallet, Loadout { scrap: 100, crystal: 10, ..Loadout::new("c") });
        h.engine.join(&wallet, "c").await.unwrap();
        h.engine.purchase_amplifier(&wallet).await.unwrap();

        let challenge = h.engine.issue_challenge(&wallet, ChallengeAction::Overload).await.unwrap();
        let signature = sign_message(&key, &challenge.message);
        let receipt = h.engine.overload(&wallet, &signature).await.unwrap();
        assert_eq!(receipt.burst_damage, 195);
        assert_eq!(receipt.damage.credited, 195);

        let again = h.engine.overload(&wallet, &signature).await.unwrap_err();
        assert_eq!(again.code(), "OVERLOAD_ALREADY_USED");
    }

    #[tokio::test]
    async fn test_overload_requires_signature_and_challenge() {
        let h = harness(1000);
        let (key, wallet) = signer(2);
        h.engine.join(&wallet, "c").await.unwrap();

        assert_eq!(h.engine.overload(&wallet, "").await.unwrap_err().code(), "SIGNATURE_REQUIRED");
        let unsolicited = sign_message(&key, "anything");
        assert_eq!(
            h.engine.overload(&wallet, &unsolicited).await.unwrap_err().code(),
            "SIGNATURE_REQUIRED"
        );
    }

    #[tokio::test]
    async fn test_overload_bad_signature_consumes_challenge() {
        let h = harness(1000);
        let (key, wallet) = signer(3);
        let (other_key, _) = signer(4);
        h.engine.join(&wallet, "c").await.unwrap();

        let challenge = h.engine.issue_challenge(&wallet, ChallengeAction::Overload).await.unwrap();
        let forged = sign_message(&other_key, &challenge.message);
        assert_eq!(h.engine.overload(&wallet, &forged).await.unwrap_err().code(), "SIGNATURE_INVALID");

        let valid = sign_message(&key, &challenge.message);
        assert_eq!(h.engine.overload(&wallet, &valid).await.unwrap_err().code(), "SIGNATURE_REQUIRED");
        assert!(!h.engine.current_status(Some(&wallet)).await.unwrap().participant.unwrap().overload_used);
    }

    #[tokio::test]
    async fn test_expired_challenge_rejected() {
        let h = harness(1000);
        let (key, wallet) = signer(5);
        h.engine.join(&wallet, "c").await.unwrap();
        let challenge = h.engine.issue_challenge(&wallet, ChallengeAction::Overload).await.unwrap();
        h.clock.advance_secs(301);
        let signature = sign_message(&key, &challenge.message);
        assert_eq!(h.engine.overload(&wallet, &signature).await.unwrap_err().code(), "SIGNATURE_REQUIRED");
    }

    #[tokio::test]
    async fn test_challenge_requires_join() {
        let h = harness(1000);
        let err = h.engine.issue_challenge("ghost", ChallengeAction::Overload).await.unwrap_err();
        assert_eq!(err.code(), "NOT_JOINED");
    }

    #[tokio::test]
    async fn test_reconnect_recovers_capped_backlog() {
        let h = harness(u64::MAX / 2);
        // 3600 power per hour = 1 per second
        h.roster.upsert("a", Loadout { score: 359_000, ..Loadout::new("c") });
        h.engine.join("a", "c").await.unwrap();

        let timeout = h.engine.config().presence_timeout_secs;
        let cap = h.engine.config().reconnect_max_offline_secs;
        h.clock.advance_secs(timeout + 10 * cap);

        let receipt = h.engine.reconnect("a").await.unwrap();
        assert_eq!(receipt.backlog_ms, 10 * cap * 1000);
        assert_eq!(receipt.recovered_ms, cap * 1000);
        assert_eq!(receipt.damage.credited, cap as u64);

        let status = h.engine.current_status(Some("a")).await.unwrap();
        assert_eq!(status.total_damage, (timeout + cap) as u64);
        assert_eq!(h.engine.reconnect("a").await.unwrap_err().code(), "RECONNECT_ALREADY_USED");
    }

    #[tokio::test]
    async fn test_resolve_before_defeat_rejected() {
        let h = harness(1000);
        h.engine.join("a", "c").await.unwrap();
        let boss = h.engine.get_or_spawn().await.unwrap();
        assert_eq!(h.engine.resolve(boss.id).await.unwrap_err().code(), "BOSS_NOT_RESOLVED");
    }

    #[tokio::test]
    async fn test_unknown_boss_id() {
        let h = harness(1000);
        let err = h.engine.status(uuid::Uuid::new_v4(), None).await.unwrap_err();
        assert_eq!(err.code(), "BOSS_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_snapshot_restore_into_fresh_engine() {
        let h = harness(1000);
        h.engine.join("a", "c").await.unwrap();
        let boss = h.engine.get_or_spawn().await.unwrap();
        h.engine.apply_damage(boss.id, "a", 250, DamageSource::Burst).await.unwrap();
        h.engine.purchase_license("a").await.unwrap();
        let snapshot = h.engine.snapshot().await;

        let fresh = harness(1000);
        fresh.engine.restore(snapshot).await.unwrap();
        let status = fresh.engine.status(boss.id, Some("a")).await.unwrap();
        assert_eq!(status.boss.current_health, 750);
        assert_eq!(fresh.engine.snapshot().await.modifiers.len(), 1);
    }

    #[tokio::test]
    async fn test_restore_rejects_inconsistent_ledger() {
        let h = harness(1000);
        h.engine.join("a", "c").await.unwrap();
        let boss = h.engine.get_or_spawn().await.unwrap();
        h.engine.apply_damage(boss.id, "a", 250, DamageSource::Burst).await.unwrap();
        h.engine.purchase_license("a").await.unwrap();
        let snapshot = h.engine.snapshot().await;

        // Heal the boss past its max through the serialized form
        let mut value = serde_json::to_value(&snapshot).unwrap();
        value["bosses"][0]["boss"]["current_health"] = serde_json::json!(5_000);
        let tampered: LedgerSnapshot = serde_json::from_value(value).unwrap();

        let fresh = harness(1000);
        let err = fresh.engine.restore(tampered).await.unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InvalidLedger { boss_id, .. } if boss_id == boss.id
        ));
        assert_eq!(fresh.engine.status(boss.id, None).await.unwrap_err().code(), "BOSS_NOT_FOUND");
        assert!(fresh.engine.snapshot().await.modifiers.is_empty());
    }

    #[tokio::test]
    async fn test_rejoin_after_absence_records_backlog() {
        let h = harness(u64::MAX / 2);
        // 3600 power per hour = 1 per second
        h.roster.upsert("a", Loadout { score: 359_000, ..Loadout::new("c") });
        h.engine.join("a", "c").await.unwrap();

        let timeout = h.engine.config().presence_timeout_secs;
        h.clock.advance_secs(timeout + 3600);
        let rejoined = h.engine.join("a", "c").await.unwrap();
        assert_eq!(rejoined.offline_backlog_ms, 3_600_000);
        assert_eq!(rejoined.last_seen_at_ms, h.clock.now_ms());

        let receipt = h.engine.reconnect("a").await.unwrap();
        assert_eq!(receipt.backlog_ms, 3_600_000);
        assert_eq!(receipt.damage.credited, 3600);
    }
}
