use super::loadout::Loadout;
use std::collections::HashMap;
use std::sync::RwLock;

/// Per-wallet combat numbers the engine reads but does not own.
pub trait CombatStats: Send + Sync {
    /// Passive damage per second before modifiers.
    fn passive_rate(&self, wallet: &str) -> f64;
    /// OVERLOAD damage before modifiers.
    fn burst_damage(&self, wallet: &str) -> u64;
    /// Players with an active run this epoch; scales boss health.
    fn active_players(&self) -> usize;
}

/// In-memory loadouts keyed by wallet. Wallets without a loadout fight
/// with a bare one.
#[derive(Debug, Default)]
pub struct Roster {
    loadouts: RwLock<HashMap<String, Loadout>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, wallet: &str, loadout: Loadout) {
        let mut loadouts = self.loadouts.write().unwrap_or_else(|e| e.into_inner());
        loadouts.insert(wallet.to_string(), loadout);
    }

    pub fn remove(&self, wallet: &str) -> Option<Loadout> {
        let mut loadouts = self.loadouts.write().unwrap_or_else(|e| e.into_inner());
        loadouts.remove(wallet)
    }

    pub fn loadout(&self, wallet: &str) -> Option<Loadout> {
        let loadouts = self.loadouts.read().unwrap_or_else(|e| e.into_inner());
        loadouts.get(wallet).cloned()
    }

    fn with_loadout<T>(&self, wallet: &str, f: impl FnOnce(&Loadout) -> T) -> T {
        let loadouts = self.loadouts.read().unwrap_or_else(|e| e.into_inner());
        match loadouts.get(wallet) {
            Some(l) => f(l),
            None => f(&Loadout::default()),
        }
    }
}

impl CombatStats for Roster {
    fn passive_rate(&self, wallet: &str) -> f64 {
        self.with_loadout(wallet, Loadout::passive_rate_per_sec)
    }

    fn burst_damage(&self, wallet: &str) -> u64 {
        self.with_loadout(wallet, Loadout::overload_damage)
    }

    fn active_players(&self) -> usize {
        self.loadouts.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_wallet_uses_bare_loadout() {
        let roster = Roster::new();
        assert_eq!(roster.passive_rate("ghost"), 10.0 / 3600.0);
        assert_eq!(roster.burst_damage("ghost"), 0);
        assert_eq!(roster.active_players(), 0);
    }

    #[test]
    fn test_upsert_replaces_loadout() {
        let roster = Roster::new();
        roster.upsert("a", Loadout { scrap: 5, ..Loadout::new("c") });
        roster.upsert("a", Loadout { scrap: 9, ..Loadout::new("c") });
        assert_eq!(roster.burst_damage("a"), 9);
        assert_eq!(roster.active_players(), 1);
        assert!(roster.remove("a").is_some());
        assert_eq!(roster.active_players(), 0);
    }
}
