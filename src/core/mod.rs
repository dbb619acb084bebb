//! Shared constants and time sources.

pub mod clock;
pub mod constants;

pub use clock::{Clock, ManualClock, SystemClock};
pub use constants::*;
