//! Settlement of resolved bosses into contribution fractions and drops.

pub mod logic;
pub mod rewards;
pub mod types;

pub use logic::{contribution_fraction, settle};
pub use rewards::{distribute_rewards, BossDrops, DropCategory, DropTableRoller, RewardRoller};
pub use types::{SettlementEntry, SettlementResult};
