//! World boss balance simulator CLI.
//!
//! Run Monte Carlo boss weekends to check boss health against player damage.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 10 runs, 50 players
//!   cargo run --bin simulate -- -n 50 -p 200   # 50 runs with 200 players
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use leviathan::logging;
use leviathan::simulator::{run_simulation, SimConfig};
use std::env;

#[tokio::main]
async fn main() {
    logging::init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              LEVIATHAN BOSS SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Players:        {}", config.players);
    println!("  Step:           {}s", config.step_secs);
    println!("  Max Steps:      {}", config.max_steps);
    if config.engine.scale_with_players {
        println!(
            "  Boss HP:        {} + {} per player",
            config.engine.base_health, config.engine.scaling_factor
        );
    } else {
        println!("  Boss HP:        {}", config.engine.base_health);
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config).await;

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "boss_sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-p" | "--players" => {
                if i + 1 < args.len() {
                    config.players = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "-t" | "--steps" => {
                if i + 1 < args.len() {
                    config.max_steps = args[i + 1].parse().unwrap_or(192);
                    i += 1;
                }
            }
            "--hp" => {
                if i + 1 < args.len() {
                    if let Ok(hp) = args[i + 1].parse::<u64>() {
                        config.engine.base_health = hp;
                        config.engine.scale_with_players = false;
                        i += 1;
                    }
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick(10);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Leviathan Boss Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of boss fights to simulate (default: 10)");
    println!("    -p, --players <P>   Players per fight (default: 50)");
    println!("    -t, --steps <T>     Max 15-minute steps per fight (default: 192)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --hp <HP>           Fixed boss health, no player scaling");
    println!("    -v, --verbose       Print every run");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick test (3 small fights, 10 players)");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -p 500 --hp 1000000");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
    println!("    cargo run --bin simulate -- --quick        # Quick balance check");
}
