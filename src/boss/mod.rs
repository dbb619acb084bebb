pub mod accrual;
pub mod burst;
pub mod ledger;
pub mod lifecycle;
pub mod types;

pub use accrual::{tick, tick_all, TickOutcome, TickSummary};
pub use burst::{amplified_burst, apply_overload, apply_reconnect, check_overload_eligible};
pub use ledger::BossLedger;
pub use lifecycle::{BossHandle, BossRegistry};
pub use types::*;
