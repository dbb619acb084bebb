//! Overload amplifiers and raid licenses, bought once per wallet per epoch.

pub mod store;
pub mod types;

pub use store::ModifierStore;
pub use types::*;
