//! Purchasable per-epoch modifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of modifier a wallet can buy once per epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Amplifies the OVERLOAD burst.
    OverloadAmplifier,
    /// Amplifies passive damage for the whole boss fight.
    RaidLicense,
}

impl ModifierKind {
    pub const ALL: [ModifierKind; 2] = [ModifierKind::OverloadAmplifier, ModifierKind::RaidLicense];

    pub fn name(&self) -> &'static str {
        match self {
            ModifierKind::OverloadAmplifier => "Overload Amplifier",
            ModifierKind::RaidLicense => "Raid License",
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recorded purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub wallet: String,
    pub epoch_start_ms: i64,
    pub kind: ModifierKind,
    pub purchased_at_ms: i64,
}

/// Multipliers a wallet's active modifiers apply to its damage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageMultipliers {
    pub passive: f64,
    pub burst: f64,
}

impl Default for DamageMultipliers {
    fn default() -> Self {
        Self {
            passive: 1.0,
            burst: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_name() {
        assert_eq!(ModifierKind::RaidLicense.to_string(), "Raid License");
        assert_eq!(
            ModifierKind::OverloadAmplifier.to_string(),
            "Overload Amplifier"
        );
    }

    #[test]
    fn test_default_multipliers_are_neutral() {
        let m = DamageMultipliers::default();
        assert_eq!(m.passive, 1.0);
        assert_eq!(m.burst, 1.0);
    }
}
