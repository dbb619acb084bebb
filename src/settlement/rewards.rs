//! Turning contribution fractions into boss drops.
//!
//! Rolling is an external concern; the engine only hands each participant's
//! fraction to a [`RewardRoller`]. [`DropTableRoller`] is the stock table.

use super::types::{SettlementEntry, SettlementResult};
use crate::core::constants::{
    CONTRIBUTION_MULT_DATA_CORE, CONTRIBUTION_MULT_NFT_ARTIFACT,
    CONTRIBUTION_MULT_PERMANENT_LOOT, CONTRIBUTION_MULT_WEEKLY_BUFF, DROP_CHANCE_DATA_CORE,
    DROP_CHANCE_NFT_ARTIFACT, DROP_CHANCE_PERMANENT_LOOT, DROP_CHANCE_WEEKLY_BUFF,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Independently rolled drop categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropCategory {
    WeeklyBuff,
    PermanentLoot,
    DataCore,
    NftArtifact,
}

impl DropCategory {
    pub const ALL: [DropCategory; 4] = [
        DropCategory::WeeklyBuff,
        DropCategory::PermanentLoot,
        DropCategory::DataCore,
        DropCategory::NftArtifact,
    ];

    pub fn base_chance(&self) -> f64 {
        match self {
            DropCategory::WeeklyBuff => DROP_CHANCE_WEEKLY_BUFF,
            DropCategory::PermanentLoot => DROP_CHANCE_PERMANENT_LOOT,
            DropCategory::DataCore => DROP_CHANCE_DATA_CORE,
            DropCategory::NftArtifact => DROP_CHANCE_NFT_ARTIFACT,
        }
    }

    /// How strongly contribution boosts this category.
    pub fn contribution_multiplier(&self) -> f64 {
        match self {
            DropCategory::WeeklyBuff => CONTRIBUTION_MULT_WEEKLY_BUFF,
            DropCategory::PermanentLoot => CONTRIBUTION_MULT_PERMANENT_LOOT,
            DropCategory::DataCore => CONTRIBUTION_MULT_DATA_CORE,
            DropCategory::NftArtifact => CONTRIBUTION_MULT_NFT_ARTIFACT,
        }
    }

    /// `base * (1 + fraction * multiplier)`
    pub fn chance(&self, contribution_fraction: f64) -> f64 {
        let fraction = contribution_fraction.clamp(0.0, 1.0);
        self.base_chance() * (1.0 + fraction * self.contribution_multiplier())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyBuffDef {
    pub id: &'static str,
    pub name: &'static str,
    pub effect: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PermanentLootDef {
    pub id: &'static str,
    pub name: &'static str,
    pub perk: &'static str,
    pub perk_value: f64,
}

pub const WEEKLY_BUFFS: [WeeklyBuffDef; 5] = [
    WeeklyBuffDef { id: "head_start", name: "Head Start", effect: "Begin epoch at Level 2" },
    WeeklyBuffDef { id: "extra_life", name: "Extra Life", effect: "Start with 4 lives instead of 3" },
    WeeklyBuffDef { id: "supply_cache", name: "Supply Cache", effect: "Start with bonus resources" },
    WeeklyBuffDef { id: "lucky_node", name: "Lucky Node", effect: "+10% boss drop chance all week" },
    WeeklyBuffDef { id: "overclocked", name: "Overclocked", effect: "-15% mission duration all week" },
];

pub const PERMANENT_LOOT: [PermanentLootDef; 5] = [
    PermanentLootDef { id: "protocol_core", name: "Protocol Core", perk: "loot_chance", perk_value: 0.02 },
    PermanentLootDef { id: "genesis_shard", name: "Genesis Shard", perk: "speed", perk_value: -0.03 },
    PermanentLootDef { id: "consensus_fragment", name: "Consensus Fragment", perk: "fail_rate", perk_value: -0.02 },
    PermanentLootDef { id: "epoch_crystal", name: "Epoch Crystal", perk: "xp", perk_value: 0.05 },
    PermanentLootDef { id: "leviathan_scale", name: "Leviathan Scale", perk: "boss_damage", perk_value: 0.03 },
];

/// Everything one participant won from a boss.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BossDrops {
    pub wallet: String,
    pub weekly_buff: Option<String>,
    pub permanent_loot: Option<String>,
    pub data_core: bool,
    pub nft_artifact: bool,
}

impl BossDrops {
    pub fn is_empty(&self) -> bool {
        self.weekly_buff.is_none() && self.permanent_loot.is_none() && !self.data_core && !self.nft_artifact
    }
}

/// Converts a settlement entry into drops.
pub trait RewardRoller {
    fn roll<R: Rng + ?Sized>(&self, entry: &SettlementEntry, rng: &mut R) -> BossDrops;
}

/// Stock drop table. Each category is rolled independently, so one player
/// can win several drops.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropTableRoller;

impl RewardRoller for DropTableRoller {
    fn roll<R: Rng + ?Sized>(&self, entry: &SettlementEntry, rng: &mut R) -> BossDrops {
        let fraction = entry.contribution_fraction;
        let mut hit = |category: DropCategory| rng.gen::<f64>() < category.chance(fraction);

        let weekly = hit(DropCategory::WeeklyBuff);
        let loot = hit(DropCategory::PermanentLoot);
        let data_core = hit(DropCategory::DataCore);
        let nft_artifact = hit(DropCategory::NftArtifact);

        let weekly_buff = weekly.then(|| WEEKLY_BUFFS[rng.gen_range(0..WEEKLY_BUFFS.len())].id.to_string());
        let permanent_loot =
            loot.then(|| PERMANENT_LOOT[rng.gen_range(0..PERMANENT_LOOT.len())].id.to_string());

        BossDrops {
            wallet: entry.wallet.clone(),
            weekly_buff,
            permanent_loot,
            data_core,
            nft_artifact,
        }
    }
}

/// Roll drops for every participant, in settlement order.
pub fn distribute_rewards<T, R>(settlement: &SettlementResult, roller: &T, rng: &mut R) -> Vec<BossDrops>
where
    T: RewardRoller,
    R: Rng + ?Sized,
{
    let drops: Vec<BossDrops> = settlement
        .entries
        .iter()
        .map(|entry| roller.roll(entry, rng))
        .collect();
    tracing::info!(
        boss_id = %settlement.boss_id,
        participants = drops.len(),
        winners = drops.iter().filter(|d| !d.is_empty()).count(),
        "Boss rewards rolled"
    );
    drops
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    fn entry(wallet: &str, fraction: f64) -> SettlementEntry {
        SettlementEntry {
            wallet: wallet.to_string(),
            character_id: "c".to_string(),
            total_damage: 0,
            contribution_fraction: fraction,
        }
    }

    #[test]
    fn test_chance_scales_with_contribution() {
        assert_eq!(DropCategory::WeeklyBuff.chance(0.0), 0.17);
        assert!((DropCategory::WeeklyBuff.chance(1.0) - 0.34).abs() < 1e-12);
        assert!((DropCategory::NftArtifact.chance(1.0) - 0.04).abs() < 1e-12);
        assert!((DropCategory::PermanentLoot.chance(0.5) - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_chance_clamps_fraction() {
        assert_eq!(DropCategory::DataCore.chance(5.0), DropCategory::DataCore.chance(1.0));
        assert_eq!(DropCategory::DataCore.chance(-1.0), DropCategory::DataCore.chance(0.0));
    }

    #[test]
    fn test_roll_is_deterministic_for_seed() {
        let e = entry("a", 0.5);
        let mut rng1 = ChaCha8Rng::seed_from_u64(7);
        let mut rng2 = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(DropTableRoller.roll(&e, &mut rng1), DropTableRoller.roll(&e, &mut rng2));
    }

    #[test]
    fn test_weekly_buff_rate_rises_with_contribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let trials = 20_000;
        let low = (0..trials)
            .filter(|_| DropTableRoller.roll(&entry("a", 0.0), &mut rng).weekly_buff.is_some())
            .count();
        let high = (0..trials)
            .filter(|_| DropTableRoller.roll(&entry("a", 1.0), &mut rng).weekly_buff.is_some())
            .count();
        // ~17% vs ~34%
        assert!(low > 2_900 && low < 3_900, "low contribution buffs: {low}");
        assert!(high > 6_200 && high < 7_400, "high contribution buffs: {high}");
    }

    #[test]
    fn test_distribute_keeps_settlement_order() {
        let settlement = SettlementResult {
            boss_id: Uuid::new_v4(),
            epoch_start_ms: 0,
            max_health: 10,
            resolved_at_ms: 1,
            entries: vec![entry("a", 0.3), entry("b", 0.7)],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let drops = distribute_rewards(&settlement, &DropTableRoller, &mut rng);
        let wallets: Vec<_> = drops.iter().map(|d| d.wallet.as_str()).collect();
        assert_eq!(wallets, vec!["a", "b"]);
    }

    #[test]
    fn test_rolled_ids_exist_in_tables() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let drops = DropTableRoller.roll(&entry("a", 1.0), &mut rng);
            if let Some(id) = drops.weekly_buff {
                assert!(WEEKLY_BUFFS.iter().any(|b| b.id == id));
            }
            if let Some(id) = drops.permanent_loot {
                assert!(PERMANENT_LOOT.iter().any(|l| l.id == id));
            }
        }
    }
}
