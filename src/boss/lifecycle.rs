//! Boss lifecycle: exactly one boss per epoch, spawned lazily.

use super::ledger::BossLedger;
use super::types::{Boss, BossId};
use crate::epoch::{epoch_key, is_boss_phase};
use chrono::{DateTime, Utc};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared handle to one boss ledger. All mutation of that boss goes through
/// its mutex; different bosses never share a lock.
pub type BossHandle = Arc<Mutex<BossLedger>>;

#[derive(Default)]
struct RegistryIndex {
    /// Unique per epoch start.
    by_epoch: BTreeMap<i64, BossId>,
    bosses: HashMap<BossId, BossHandle>,
}

/// Owns every boss the process knows about, one per epoch.
///
/// The index lock is only held to find or insert a handle, never while a
/// boss lock is awaited.
pub struct BossRegistry {
    index: RwLock<RegistryIndex>,
    boss_name: String,
}

impl BossRegistry {
    pub fn new(boss_name: impl Into<String>) -> Self {
        Self {
            index: RwLock::new(RegistryIndex::default()),
            boss_name: boss_name.into(),
        }
    }

    /// Current epoch's boss, spawning it if this is the boss phase and none
    /// exists yet. Outside the phase with no boss, returns `None`.
    ///
    /// `spawn_health` is only evaluated when a spawn is attempted.
    pub async fn get_or_spawn<F>(&self, now: DateTime<Utc>, spawn_health: F) -> Option<BossHandle>
    where
        F: FnOnce() -> u64,
    {
        let epoch = epoch_key(now);
        if let Some(handle) = self.by_epoch(epoch).await {
            return Some(handle);
        }
        if !is_boss_phase(now) {
            return None;
        }
        Some(self.spawn(epoch, spawn_health().max(1), now.timestamp_millis()).await)
    }

    /// Current epoch's boss without spawning.
    pub async fn get_current(&self, now: DateTime<Utc>) -> Option<BossHandle> {
        self.by_epoch(epoch_key(now)).await
    }

    pub async fn get(&self, id: BossId) -> Option<BossHandle> {
        self.index.read().await.bosses.get(&id).cloned()
    }

    pub async fn by_epoch(&self, epoch_start_ms: i64) -> Option<BossHandle> {
        let index = self.index.read().await;
        index
            .by_epoch
            .get(&epoch_start_ms)
            .and_then(|id| index.bosses.get(id))
            .cloned()
    }

    /// Every handle in epoch order.
    pub async fn handles(&self) -> Vec<BossHandle> {
        let index = self.index.read().await;
        index
            .by_epoch
            .values()
            .filter_map(|id| index.bosses.get(id))
            .cloned()
            .collect()
    }

    /// Insert a ledger restored from a snapshot. An existing boss for the
    /// same epoch wins and is returned instead.
    pub async fn insert(&self, ledger: BossLedger) -> BossHandle {
        let mut guard = self.index.write().await;
        let index = &mut *guard;
        let epoch = ledger.boss().epoch_start_ms;
        match index.by_epoch.entry(epoch) {
            Entry::Occupied(existing) => {
                if let Some(handle) = index.bosses.get(existing.get()) {
                    return Arc::clone(handle);
                }
                // Dangling epoch entry; replace it
                let id = ledger.boss().id;
                let handle = Arc::new(Mutex::new(ledger));
                *existing.into_mut() = id;
                index.bosses.insert(id, Arc::clone(&handle));
                handle
            }
            Entry::Vacant(slot) => {
                let id = ledger.boss().id;
                let handle = Arc::new(Mutex::new(ledger));
                slot.insert(id);
                index.bosses.insert(id, Arc::clone(&handle));
                handle
            }
        }
    }

    async fn spawn(&self, epoch_start_ms: i64, max_health: u64, now_ms: i64) -> BossHandle {
        let boss = Boss::new(&self.boss_name, epoch_start_ms, max_health, now_ms);
        let candidate_id = boss.id;
        let handle = self.insert(BossLedger::new(boss)).await;

        // The epoch key is unique; if another caller got there first we read
        // back its boss instead of creating a second one.
        let winner_id = handle.lock().await.boss().id;
        if winner_id == candidate_id {
            tracing::info!(
                boss_id = %winner_id,
                epoch_start_ms,
                max_health,
                "World boss spawned"
            );
        } else {
            tracing::debug!(boss_id = %winner_id, epoch_start_ms, "Lost spawn race, using existing boss");
        }
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn saturday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn wednesday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_no_spawn_outside_boss_phase() {
        let registry = BossRegistry::new("Test Boss");
        assert!(registry.get_or_spawn(wednesday(), || 1000).await.is_none());
        assert!(registry.get_current(wednesday()).await.is_none());
    }

    #[tokio::test]
    async fn test_spawn_in_boss_phase() {
        let registry = BossRegistry::new("Test Boss");
        let handle = registry.get_or_spawn(saturday(), || 1000).await.unwrap();
        let ledger = handle.lock().await;
        assert_eq!(ledger.boss().max_health, 1000);
        assert_eq!(ledger.boss().current_health, 1000);
        assert_eq!(ledger.boss().name, "Test Boss");
        assert_eq!(ledger.boss().epoch_start_ms, epoch_key(saturday()));
    }

    #[tokio::test]
    async fn test_second_call_returns_same_boss() {
        let registry = BossRegistry::new("Test Boss");
        let a = registry.get_or_spawn(saturday(), || 1000).await.unwrap();
        let b = registry.get_or_spawn(saturday(), || 5000).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(b.lock().await.boss().max_health, 1000);
    }

    #[tokio::test]
    async fn test_get_current_does_not_spawn() {
        let registry = BossRegistry::new("Test Boss");
        assert!(registry.get_current(saturday()).await.is_none());
        registry.get_or_spawn(saturday(), || 10).await.unwrap();
        assert!(registry.get_current(saturday()).await.is_some());
    }

    #[tokio::test]
    async fn test_zero_health_spawns_with_one() {
        let registry = BossRegistry::new("Test Boss");
        let handle = registry.get_or_spawn(saturday(), || 0).await.unwrap();
        assert_eq!(handle.lock().await.boss().max_health, 1);
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let registry = BossRegistry::new("Test Boss");
        let handle = registry.get_or_spawn(saturday(), || 10).await.unwrap();
        let id = handle.lock().await.boss().id;
        assert!(registry.get(id).await.is_some());
        assert!(registry.get(uuid::Uuid::new_v4()).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_spawn_creates_one_boss() {
        let registry = Arc::new(BossRegistry::new("Test Boss"));
        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..32 {
            let registry = Arc::clone(&registry);
            tasks.spawn(async move {
                let handle = registry.get_or_spawn(saturday(), || 1000).await.unwrap();
                let ledger = handle.lock().await;
                ledger.boss().id
            });
        }
        let mut ids = Vec::new();
        while let Some(id) = tasks.join_next().await {
            ids.push(id.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(registry.handles().await.len(), 1);
    }
}
