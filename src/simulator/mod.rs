//! World boss fight simulator for Monte Carlo balance analysis.
//!
//! Runs many simulated boss weekends against a real [`crate::engine::BossEngine`]
//! to see how boss health, passive rates and OVERLOAD bursts play out:
//! - How often the boss dies and how long it takes
//! - Which damage source dominates
//! - How contribution and drops spread across players

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
