// Epoch cadence
pub const EPOCH_LENGTH_DAYS: i64 = 7;
// Days after the Monday reset when the boss phase opens (Saturday 00:00 UTC)
pub const BOSS_PHASE_OFFSET_DAYS: i64 = 5;

// Boss spawn
pub const BOSS_NAME: &str = "Protocol Leviathan";
pub const BOSS_BASE_HP: u64 = 100_000;
pub const BOSS_SCALING_FACTOR: f64 = 0.8;

// Passive power: (base + armor*3 + engine*2 + scanner*2 + score/100) damage per hour
pub const PASSIVE_BASE_POWER: f64 = 10.0;
pub const PASSIVE_POWER_PER_ARMOR: f64 = 3.0;
pub const PASSIVE_POWER_PER_ENGINE: f64 = 2.0;
pub const PASSIVE_POWER_PER_SCANNER: f64 = 2.0;
pub const PASSIVE_SCORE_DIVISOR: f64 = 100.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

// OVERLOAD burst: scrap*1 + crystal*3 + artifact*10
pub const OVERLOAD_SCRAP_MULTIPLIER: u64 = 1;
pub const OVERLOAD_CRYSTAL_MULTIPLIER: u64 = 3;
pub const OVERLOAD_ARTIFACT_MULTIPLIER: u64 = 10;
pub const CRITICAL_OVERLOAD_MULTIPLIER: f64 = 1.5;

// Modifiers
pub const OVERLOAD_AMPLIFIER_BURST_MULTIPLIER: f64 = 1.5;
pub const RAID_LICENSE_PASSIVE_MULTIPLIER: f64 = 1.25;

// Presence and reconnect
pub const PRESENCE_TIMEOUT_SECONDS: i64 = 15 * 60;
pub const RECONNECT_MAX_OFFLINE_SECONDS: i64 = 4 * 60 * 60;

// Signature challenges
pub const CHALLENGE_TTL_SECONDS: i64 = 5 * 60;
pub const CHALLENGE_NONCE_BYTES: usize = 32;

// Boss drop table base chances (scaled by contribution)
pub const DROP_CHANCE_WEEKLY_BUFF: f64 = 0.17;
pub const DROP_CHANCE_PERMANENT_LOOT: f64 = 0.03;
pub const DROP_CHANCE_DATA_CORE: f64 = 0.03;
pub const DROP_CHANCE_NFT_ARTIFACT: f64 = 0.01;
// Contribution multipliers per drop category
pub const CONTRIBUTION_MULT_WEEKLY_BUFF: f64 = 1.0;
pub const CONTRIBUTION_MULT_PERMANENT_LOOT: f64 = 2.0;
pub const CONTRIBUTION_MULT_DATA_CORE: f64 = 1.0;
pub const CONTRIBUTION_MULT_NFT_ARTIFACT: f64 = 3.0;

// Ledger snapshot file format
pub const SNAPSHOT_VERSION_MAGIC: u64 = 0x4C45_5649_4154_4831; // "LEVIATH1"
pub const SNAPSHOT_FILE_NAME: &str = "ledger.dat";
pub const CONFIG_FILE_NAME: &str = "config.json";
