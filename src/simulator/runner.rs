//! Simulation runner driving a real [`BossEngine`] with concurrent players.
//!
//! Every run gets its own engine, a manual clock parked at the start of the
//! boss phase and a seeded roster of players with ed25519 wallets. Each step
//! the clock advances and every player's action for that step runs as its
//! own tokio task, so damage lands on the boss concurrently exactly as it
//! would from independent requests.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::boss::BossId;
use crate::character::{Loadout, Roster};
use crate::core::clock::{Clock, ManualClock};
use crate::engine::BossEngine;
use crate::settlement::{distribute_rewards, DropTableRoller};
use crate::signature::{sign_message, wallet_address, ChallengeAction, Ed25519Verifier};
use ed25519_dalek::SigningKey;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Run every configured fight and aggregate the results.
pub async fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng).await;
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} after {:.1}h, {} players, HP {}/{}",
                run_idx + 1,
                config.num_runs,
                if run.killed { "killed" } else { "survived" },
                run.hours_elapsed,
                run.participants,
                run.remaining_health,
                run.max_health
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

struct SimPlayer {
    key: SigningKey,
    wallet: String,
    away_until_step: Option<u64>,
    overload_attempted: bool,
}

#[derive(Debug, Clone, Copy)]
enum PlayerAction {
    Poll,
    Overload,
    Reconnect,
}

/// What one player task reports back.
enum ActionOutcome {
    Polled,
    Overloaded { credited: u64 },
    Reconnected { credited: u64 },
    Rejected(&'static str),
}

fn random_loadout(character_id: String, rng: &mut impl Rng) -> Loadout {
    Loadout {
        character_id,
        armor_level: rng.gen_range(0..=10),
        engine_level: rng.gen_range(0..=10),
        scanner_level: rng.gen_range(0..=10),
        score: rng.gen_range(0..=20_000),
        scrap: rng.gen_range(0..=500),
        crystal: rng.gen_range(0..=100),
        artifact: rng.gen_range(0..=20),
        critical_overload: rng.gen_bool(0.2),
    }
}

async fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> RunStats {
    // Saturday 00:00 UTC: the first instant of a boss phase
    let clock = Arc::new(ManualClock::at_utc(2026, 10, 17, 0));
    let roster = Arc::new(Roster::new());

    let mut players = Vec::with_capacity(config.players);
    for idx in 0..config.players {
        let key = SigningKey::from_bytes(&rng.gen::<[u8; 32]>());
        let wallet = wallet_address(&key);
        roster.upsert(&wallet, random_loadout(format!("sim-char-{idx}"), rng));
        players.push(SimPlayer {
            key,
            wallet,
            away_until_step: None,
            overload_attempted: false,
        });
    }

    let engine = Arc::new(BossEngine::new(
        config.engine.clone(),
        roster.clone(),
        Arc::new(Ed25519Verifier),
        clock.clone(),
    ));

    let mut stats = RunStats::default();
    let boss_id = match engine.get_or_spawn().await {
        Ok(boss) => boss.id,
        Err(e) => {
            tracing::warn!(error = %e, "Simulation could not spawn a boss");
            return stats;
        }
    };

    for player in &players {
        if rng.gen_bool(config.license_share) {
            record(&mut stats.rejections, engine.purchase_license(&player.wallet).await.err());
            stats.licenses += 1;
        }
        if rng.gen_bool(config.amplifier_share) {
            record(&mut stats.rejections, engine.purchase_amplifier(&player.wallet).await.err());
            stats.amplifiers += 1;
        }
        let character_id = roster
            .loadout(&player.wallet)
            .map(|l| l.character_id)
            .unwrap_or_default();
        record(&mut stats.rejections, engine.join(&player.wallet, &character_id).await.err());
    }

    let mut steps = 0;
    while steps < config.max_steps {
        steps += 1;
        clock.advance_secs(config.step_secs);

        let mut tasks = JoinSet::new();
        for player in players.iter_mut() {
            let Some(action) = choose_action(player, steps, config, rng) else {
                continue;
            };
            let engine = Arc::clone(&engine);
            let key = player.key.clone();
            let wallet = player.wallet.clone();
            tasks.spawn(async move { perform(&engine, &key, &wallet, action).await });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(ActionOutcome::Polled) => {}
                Ok(ActionOutcome::Overloaded { credited }) => {
                    stats.overloads += 1;
                    stats.burst_credited += credited;
                }
                Ok(ActionOutcome::Reconnected { credited }) => {
                    stats.reconnects += 1;
                    stats.reconnect_credited += credited;
                }
                Ok(ActionOutcome::Rejected(code)) => {
                    *stats.rejections.entry(code.to_string()).or_insert(0) += 1;
                }
                Err(e) => tracing::warn!(error = %e, "Simulated player task failed"),
            }
        }

        let resolved = match engine.status(boss_id, None).await {
            Ok(status) => status.boss.resolved,
            Err(_) => false,
        };
        if resolved {
            break;
        }
    }

    finish_run(&engine, boss_id, clock.as_ref(), steps, config, rng, stats).await
}

/// Decide this step's action on the main task so runs stay reproducible
/// regardless of how tasks interleave.
fn choose_action(
    player: &mut SimPlayer,
    step: u64,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<PlayerAction> {
    if let Some(until) = player.away_until_step {
        if step < until {
            return None;
        }
        player.away_until_step = None;
        return Some(PlayerAction::Reconnect);
    }
    if rng.gen_bool(config.absence_chance) {
        let away_for = rng.gen_range(1..=config.max_absence_steps.max(1));
        player.away_until_step = Some(step + away_for);
        return None;
    }
    if !player.overload_attempted && rng.gen_bool(config.overload_chance) {
        player.overload_attempted = true;
        return Some(PlayerAction::Overload);
    }
    Some(PlayerAction::Poll)
}

async fn perform(
    engine: &BossEngine,
    key: &SigningKey,
    wallet: &str,
    action: PlayerAction,
) -> ActionOutcome {
    let result = match action {
        PlayerAction::Poll => engine.current_status(Some(wallet)).await.map(|_| ActionOutcome::Polled),
        PlayerAction::Reconnect => engine
            .reconnect(wallet)
            .await
            .map(|r| ActionOutcome::Reconnected {
                credited: r.damage.credited,
            }),
        PlayerAction::Overload => {
            match engine.issue_challenge(wallet, ChallengeAction::Overload).await {
                Ok(challenge) => {
                    let signature = sign_message(key, &challenge.message);
                    engine
                        .overload(wallet, &signature)
                        .await
                        .map(|r| ActionOutcome::Overloaded {
                            credited: r.damage.credited,
                        })
                }
                Err(e) => Err(e),
            }
        }
    };
    result.unwrap_or_else(|e| ActionOutcome::Rejected(e.code()))
}

async fn finish_run(
    engine: &BossEngine,
    boss_id: BossId,
    clock: &dyn Clock,
    steps: u64,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    mut stats: RunStats,
) -> RunStats {
    stats.steps = steps;
    stats.hours_elapsed = (steps as i64 * config.step_secs) as f64 / 3600.0;

    let status = match engine.status(boss_id, None).await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(error = %e, "Simulated boss vanished");
            return stats;
        }
    };
    stats.max_health = status.boss.max_health;
    stats.remaining_health = status.boss.current_health;
    stats.killed = status.boss.resolved;
    stats.participants = status.participant_count;
    stats.credited_total = status.total_damage;
    stats.ledger_consistent = status.total_damage == status.boss.depleted()
        && status.total_damage <= status.boss.max_health;

    if let Some(resolved_at_ms) = status.boss.resolved_at_ms {
        stats.hours_elapsed = (resolved_at_ms - status.boss.spawned_at_ms) as f64 / 3_600_000.0;
    }
    stats.passive_credited = stats
        .credited_total
        .saturating_sub(stats.burst_credited + stats.reconnect_credited);

    if !stats.killed {
        return stats;
    }

    match engine.resolve(boss_id).await {
        Ok(settlement) => {
            stats.top_contribution = settlement
                .entries
                .iter()
                .map(|e| e.contribution_fraction)
                .fold(0.0, f64::max);
            stats.settlement_digest = settlement.digest().ok();
            let drops = distribute_rewards(&settlement, &DropTableRoller, rng);
            stats.weekly_buffs = drops.iter().filter(|d| d.weekly_buff.is_some()).count();
            stats.permanent_loot = drops.iter().filter(|d| d.permanent_loot.is_some()).count();
            stats.data_cores = drops.iter().filter(|d| d.data_core).count();
            stats.nft_artifacts = drops.iter().filter(|d| d.nft_artifact).count();
        }
        Err(e) => {
            tracing::warn!(error = %e, at_ms = clock.now_ms(), "Settlement of killed boss failed");
        }
    }
    stats
}

fn record(rejections: &mut BTreeMap<String, u64>, error: Option<crate::error::BossError>) {
    if let Some(e) = error {
        *rejections.entry(e.code().to_string()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_quick_simulation_kills_boss() {
        let config = SimConfig {
            seed: Some(11),
            verbosity: 0,
            ..SimConfig::quick(6)
        };
        let report = run_simulation(&config).await;
        assert_eq!(report.num_runs, 3);
        assert_eq!(report.kills, 3);
        assert_eq!(report.ledger_violations, 0);
        for run in &report.run_stats {
            assert_eq!(run.credited_total, run.max_health);
            assert_eq!(run.participants, 6);
            assert!(run.settlement_digest.is_some());
        }
    }

    #[tokio::test]
    async fn test_unkillable_boss_times_out() {
        let mut config = SimConfig {
            seed: Some(3),
            num_runs: 1,
            players: 3,
            max_steps: 4,
            verbosity: 0,
            ..SimConfig::default()
        };
        config.engine.base_health = 10_000_000;
        config.engine.scale_with_players = false;
        let report = run_simulation(&config).await;
        assert_eq!(report.kills, 0);
        assert_eq!(report.run_stats[0].steps, 4);
        assert!(report.run_stats[0].ledger_consistent);
    }

    #[test]
    fn test_choose_action_returns_after_absence_with_reconnect() {
        let config = SimConfig {
            absence_chance: 1.0,
            max_absence_steps: 1,
            ..SimConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut player = SimPlayer {
            key: SigningKey::from_bytes(&[1; 32]),
            wallet: "w".into(),
            away_until_step: None,
            overload_attempted: false,
        };
        assert!(choose_action(&mut player, 1, &config, &mut rng).is_none());
        assert_eq!(player.away_until_step, Some(2));
        assert!(matches!(
            choose_action(&mut player, 2, &config, &mut rng),
            Some(PlayerAction::Reconnect)
        ));
    }
}
