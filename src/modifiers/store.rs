//! Modifier purchases keyed by (epoch, wallet, kind).

use super::types::{DamageMultipliers, Modifier, ModifierKind};
use crate::error::BossError;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

/// Epoch first, so one epoch's purchases form a contiguous key range.
type ModifierKey = (i64, String, ModifierKind);

/// Records purchases and answers "what multipliers apply to this wallet".
///
/// Purchases never touch a boss ledger; they only change the numbers later
/// accrual and burst calls use.
#[derive(Debug)]
pub struct ModifierStore {
    purchases: Mutex<BTreeMap<ModifierKey, Modifier>>,
    amplifier_burst_multiplier: f64,
    license_passive_multiplier: f64,
}

impl ModifierStore {
    pub fn new(amplifier_burst_multiplier: f64, license_passive_multiplier: f64) -> Self {
        Self {
            purchases: Mutex::new(BTreeMap::new()),
            amplifier_burst_multiplier,
            license_passive_multiplier,
        }
    }

    /// Record a purchase. A second purchase of the same kind in the same
    /// epoch is rejected with `ALREADY_PURCHASED`.
    pub async fn purchase(
        &self,
        wallet: &str,
        epoch_start_ms: i64,
        kind: ModifierKind,
        now_ms: i64,
    ) -> Result<Modifier, BossError> {
        let mut purchases = self.purchases.lock().await;
        let key = (epoch_start_ms, wallet.to_string(), kind);
        if purchases.contains_key(&key) {
            return Err(BossError::AlreadyPurchased { kind });
        }
        let modifier = Modifier {
            wallet: wallet.to_string(),
            epoch_start_ms,
            kind,
            purchased_at_ms: now_ms,
        };
        purchases.insert(key, modifier.clone());
        tracing::debug!(wallet, epoch_start_ms, %kind, "Modifier purchased");
        Ok(modifier)
    }

    pub async fn has(&self, wallet: &str, epoch_start_ms: i64, kind: ModifierKind) -> bool {
        self.purchases
            .lock()
            .await
            .contains_key(&(epoch_start_ms, wallet.to_string(), kind))
    }

    /// Multipliers for one wallet in one epoch.
    pub async fn multipliers(&self, wallet: &str, epoch_start_ms: i64) -> DamageMultipliers {
        let purchases = self.purchases.lock().await;
        let kinds = ModifierKind::ALL
            .into_iter()
            .filter(|k| purchases.contains_key(&(epoch_start_ms, wallet.to_string(), *k)));
        self.combine(kinds)
    }

    /// Multipliers for every wallet holding at least one modifier this epoch.
    /// Wallets absent from the map use neutral multipliers.
    pub async fn epoch_view(&self, epoch_start_ms: i64) -> HashMap<String, DamageMultipliers> {
        let purchases = self.purchases.lock().await;
        let mut by_wallet: HashMap<String, Vec<ModifierKind>> = HashMap::new();
        // The empty wallet and first kind sort before every key of the epoch
        let start = (epoch_start_ms, String::new(), ModifierKind::ALL[0]);
        for (_, wallet, kind) in purchases
            .range(start..)
            .map(|(key, _)| key)
            .take_while(|(epoch, _, _)| *epoch == epoch_start_ms)
        {
            by_wallet.entry(wallet.clone()).or_default().push(*kind);
        }
        by_wallet
            .into_iter()
            .map(|(wallet, kinds)| {
                let multipliers = self.combine(kinds);
                (wallet, multipliers)
            })
            .collect()
    }

    /// All purchases in key order, for snapshots.
    pub async fn all(&self) -> Vec<Modifier> {
        self.purchases.lock().await.values().cloned().collect()
    }

    /// Replace the store's contents with previously exported purchases.
    pub async fn restore(&self, modifiers: Vec<Modifier>) {
        let mut purchases = self.purchases.lock().await;
        purchases.clear();
        for m in modifiers {
            purchases.insert((m.epoch_start_ms, m.wallet.clone(), m.kind), m);
        }
    }

    fn combine(&self, kinds: impl IntoIterator<Item = ModifierKind>) -> DamageMultipliers {
        let mut multipliers = DamageMultipliers::default();
        for kind in kinds {
            match kind {
                ModifierKind::OverloadAmplifier => {
                    multipliers.burst *= self.amplifier_burst_multiplier
                }
                ModifierKind::RaidLicense => {
                    multipliers.passive *= self.license_passive_multiplier
                }
            }
        }
        multipliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ModifierStore {
        ModifierStore::new(1.5, 1.25)
    }

    #[tokio::test]
    async fn test_purchase_records_modifier() {
        let store = store();
        let m = store
            .purchase("wallet-a", 1000, ModifierKind::RaidLicense, 5)
            .await
            .unwrap();
        assert_eq!(m.wallet, "wallet-a");
        assert_eq!(m.purchased_at_ms, 5);
        assert!(store.has("wallet-a", 1000, ModifierKind::RaidLicense).await);
        assert!(!store.has("wallet-a", 1000, ModifierKind::OverloadAmplifier).await);
    }

    #[tokio::test]
    async fn test_duplicate_purchase_rejected() {
        let store = store();
        store
            .purchase("wallet-a", 1000, ModifierKind::OverloadAmplifier, 5)
            .await
            .unwrap();
        let err = store
            .purchase("wallet-a", 1000, ModifierKind::OverloadAmplifier, 6)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ALREADY_PURCHASED");
    }

    #[tokio::test]
    async fn test_purchases_do_not_carry_across_epochs() {
        let store = store();
        store
            .purchase("wallet-a", 1000, ModifierKind::RaidLicense, 5)
            .await
            .unwrap();
        assert!(!store.has("wallet-a", 2000, ModifierKind::RaidLicense).await);
        store
            .purchase("wallet-a", 2000, ModifierKind::RaidLicense, 7)
            .await
            .unwrap();
        assert_eq!(store.multipliers("wallet-a", 3000).await, DamageMultipliers::default());
    }

    #[tokio::test]
    async fn test_multipliers_combine_kinds() {
        let store = store();
        store
            .purchase("wallet-a", 1000, ModifierKind::RaidLicense, 5)
            .await
            .unwrap();
        store
            .purchase("wallet-a", 1000, ModifierKind::OverloadAmplifier, 5)
            .await
            .unwrap();
        let m = store.multipliers("wallet-a", 1000).await;
        assert_eq!(m.passive, 1.25);
        assert_eq!(m.burst, 1.5);
    }

    #[tokio::test]
    async fn test_epoch_view_only_lists_buyers() {
        let store = store();
        store
            .purchase("wallet-a", 1000, ModifierKind::RaidLicense, 5)
            .await
            .unwrap();
        store
            .purchase("wallet-b", 2000, ModifierKind::RaidLicense, 5)
            .await
            .unwrap();
        let view = store.epoch_view(1000).await;
        assert_eq!(view.len(), 1);
        assert_eq!(view["wallet-a"].passive, 1.25);
    }

    #[tokio::test]
    async fn test_epoch_view_ignores_neighbouring_epochs() {
        let store = store();
        for (wallet, epoch, kind) in [
            ("wallet-a", 999, ModifierKind::RaidLicense),
            ("wallet-b", 1000, ModifierKind::OverloadAmplifier),
            ("wallet-c", 1000, ModifierKind::RaidLicense),
            ("wallet-c", 1000, ModifierKind::OverloadAmplifier),
            ("", 1001, ModifierKind::OverloadAmplifier),
            ("wallet-a", 1001, ModifierKind::RaidLicense),
        ] {
            store.purchase(wallet, epoch, kind, 5).await.unwrap();
        }

        let view = store.epoch_view(1000).await;
        assert_eq!(view.len(), 2);
        assert_eq!(view["wallet-b"], DamageMultipliers { passive: 1.0, burst: 1.5 });
        assert_eq!(view["wallet-c"], DamageMultipliers { passive: 1.25, burst: 1.5 });

        let earlier = store.epoch_view(999).await;
        assert_eq!(earlier.keys().collect::<Vec<_>>(), vec!["wallet-a"]);
        assert!(store.epoch_view(1002).await.is_empty());
    }

    #[tokio::test]
    async fn test_restore_replaces_contents() {
        let store = store();
        store
            .purchase("wallet-a", 1000, ModifierKind::RaidLicense, 5)
            .await
            .unwrap();
        let exported = store.all().await;

        let fresh = ModifierStore::new(1.5, 1.25);
        fresh.restore(exported).await;
        assert!(fresh.has("wallet-a", 1000, ModifierKind::RaidLicense).await);
    }
}
