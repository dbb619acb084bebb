//! Character loadouts and the combat numbers derived from them.

pub mod loadout;
pub mod stats;

pub use loadout::Loadout;
pub use stats::{CombatStats, Roster};
