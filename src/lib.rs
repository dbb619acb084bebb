//! Leviathan - Weekly World Boss Engine
//!
//! One shared boss per weekly epoch. Players join, deal passive damage while
//! present, fire a single signed OVERLOAD burst and may recover time spent
//! away through the reconnect protocol. When the boss falls, contributions
//! are settled and drops rolled against them.

pub mod boss;
pub mod character;
pub mod config;
pub mod core;
pub mod engine;
pub mod epoch;
pub mod error;
pub mod logging;
pub mod modifiers;
pub mod settlement;
pub mod signature;
pub mod simulator;
pub mod snapshot_store;
pub mod utils;

pub use engine::BossEngine;
pub use error::{BossError, SnapshotError};
