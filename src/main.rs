use chrono::{Duration, Utc};
use ed25519_dalek::SigningKey;
use leviathan::boss::BossStatus;
use leviathan::character::{Loadout, Roster};
use leviathan::config::EngineConfig;
use leviathan::core::clock::ManualClock;
use leviathan::engine::BossEngine;
use leviathan::epoch::{boss_phase_start, current_epoch_start};
use leviathan::error::BossError;
use leviathan::settlement::{distribute_rewards, settle, DropTableRoller};
use leviathan::signature::{sign_message, wallet_address, ChallengeAction, Ed25519Verifier};
use leviathan::snapshot_store::SnapshotStore;
use leviathan::logging;
use leviathan::utils::build_info;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    logging::init();
    let args: Vec<String> = std::env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        None | Some("--help") | Some("-h") => {
            print_help();
            Ok(())
        }
        Some("--version") | Some("-v") => {
            println!("{}", build_info::version_string());
            Ok(())
        }
        Some("demo") => run_demo().await,
        Some("inspect") => inspect(),
        Some("config") => show_config(),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'leviathan --help' for usage.");
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_help() {
    println!("Leviathan - Weekly World Boss Engine\n");
    println!("Usage: leviathan <command>\n");
    println!("Commands:");
    println!("  demo       Fight a small scripted boss and save the ledger");
    println!("  inspect    Show bosses in the saved ledger snapshot");
    println!("  config     Print the effective engine configuration");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
}

struct DemoPlayer {
    name: &'static str,
    key: SigningKey,
    wallet: String,
}

impl DemoPlayer {
    fn new(name: &'static str, seed: u8, roster: &Roster, loadout: Loadout) -> Self {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let wallet = wallet_address(&key);
        roster.upsert(&wallet, loadout);
        Self { name, key, wallet }
    }
}

fn print_status(label: &str, status: &BossStatus) {
    let bar_width = 30;
    let filled = (status.boss.health_ratio() * bar_width as f64).round() as usize;
    println!(
        "  {:<22} [{}{}] {}/{}",
        label,
        "█".repeat(filled),
        "░".repeat(bar_width - filled),
        status.boss.current_health,
        status.boss.max_health
    );
}

/// Scripted fight on a manual clock parked inside this week's boss phase.
async fn run_demo() -> Result<(), Box<dyn std::error::Error>> {
    let phase_start = boss_phase_start(current_epoch_start(Utc::now()));
    let clock = Arc::new(ManualClock::new(phase_start + Duration::hours(1)));
    let roster = Arc::new(Roster::new());
    let config = EngineConfig {
        base_health: 1_000,
        scale_with_players: false,
        ..EngineConfig::load()
    };
    let engine = BossEngine::new(config, roster.clone(), Arc::new(Ed25519Verifier), clock.clone());

    let kai = DemoPlayer::new(
        "kai",
        1,
        &roster,
        Loadout {
            armor_level: 4,
            engine_level: 3,
            score: 30_000,
            ..Loadout::new("kai-runner")
        },
    );
    let mira = DemoPlayer::new(
        "mira",
        2,
        &roster,
        Loadout {
            scrap: 60,
            crystal: 20,
            artifact: 2,
            critical_overload: true,
            ..Loadout::new("mira-scout")
        },
    );
    let jun = DemoPlayer::new("jun", 3, &roster, Loadout { score: 8_000, ..Loadout::new("jun-hauler") });

    let boss = engine.get_or_spawn().await?;
    println!("{} spawned with {} HP\n", boss.name, boss.max_health);

    engine.purchase_license(&kai.wallet).await?;
    engine.purchase_amplifier(&mira.wallet).await?;
    for player in [&kai, &mira, &jun] {
        let character_id = roster
            .loadout(&player.wallet)
            .map(|l| l.character_id)
            .unwrap_or_default();
        engine.join(&player.wallet, &character_id).await?;
        println!("  {} joined as {}", player.name, character_id);
    }
    println!();

    // Jun drops out after the first check-in
    let mut jun_away = true;
    let mut overload_fired = false;
    for step in 1..=48 {
        clock.advance_secs(10 * 60);
        let status = engine.current_status(Some(&kai.wallet)).await?;
        engine.current_status(Some(&mira.wallet)).await?;

        if !overload_fired && step == 3 {
            overload_fired = true;
            let challenge = engine.issue_challenge(&mira.wallet, ChallengeAction::Overload).await?;
            let signature = sign_message(&mira.key, &challenge.message);
            let receipt = engine.overload(&mira.wallet, &signature).await?;
            println!(
                "  mira fires OVERLOAD for {} ({} credited)",
                receipt.burst_damage, receipt.damage.credited
            );
        }
        if jun_away && step == 9 {
            jun_away = false;
            match engine.reconnect(&jun.wallet).await {
                Ok(receipt) => println!(
                    "  jun reconnects after {}m away, recovers {} damage",
                    receipt.backlog_ms / 60_000,
                    receipt.damage.credited
                ),
                Err(BossError::BossAlreadyResolved(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        if step % 6 == 0 || status.boss.resolved {
            print_status(&format!("after {}m", step * 10), &status);
        }
        if status.boss.resolved {
            break;
        }
    }

    let status = engine.status(boss.id, None).await?;
    if !status.boss.resolved {
        println!("\nThe boss survived the demo window.");
        return Ok(());
    }

    let settlement = engine.resolve(boss.id).await?;
    println!("\nSettlement {}:", settlement.digest()?);
    for entry in &settlement.entries {
        let name = [&kai, &mira, &jun]
            .iter()
            .find(|p| p.wallet == entry.wallet)
            .map_or("?", |p| p.name);
        println!(
            "  {:<6} {:>5} damage  {:>5.1}%",
            name,
            entry.total_damage,
            entry.contribution_fraction * 100.0
        );
    }

    let drops = distribute_rewards(&settlement, &DropTableRoller, &mut rand::thread_rng());
    for drop in drops.iter().filter(|d| !d.is_empty()) {
        println!("  drop for {}...: {:?}", &drop.wallet[..8], drop);
    }

    let store = SnapshotStore::new()?;
    store.save(&engine.snapshot().await)?;
    let path = store.export_settlement(&settlement)?;
    println!("\nLedger saved to {}", store.snapshot_path().display());
    println!("Settlement exported to {}", path.display());
    Ok(())
}

fn inspect() -> Result<(), Box<dyn std::error::Error>> {
    let store = SnapshotStore::new()?;
    if !store.exists() {
        println!("No ledger snapshot at {}", store.snapshot_path().display());
        return Ok(());
    }
    let snapshot = store.load()?;
    println!(
        "Snapshot taken at {} ({} bosses, {} modifiers)\n",
        snapshot.taken_at_ms,
        snapshot.bosses.len(),
        snapshot.modifiers.len()
    );
    for ledger in &snapshot.bosses {
        let boss = ledger.boss();
        println!(
            "{} {} epoch={} HP {}/{} participants={}",
            boss.id,
            boss.name,
            boss.epoch_start_ms,
            boss.current_health,
            boss.max_health,
            ledger.participant_count()
        );
        match settle(ledger) {
            Ok(settlement) => {
                for entry in &settlement.entries {
                    println!(
                        "    {} {:>8} {:>6.2}%",
                        entry.wallet,
                        entry.total_damage,
                        entry.contribution_fraction * 100.0
                    );
                }
            }
            Err(_) => println!("    (unresolved)"),
        }
    }
    Ok(())
}

fn show_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&EngineConfig::load())?);
    Ok(())
}
