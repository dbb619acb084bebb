//! Durable copies of the boss ledger.
//!
//! Snapshot file format:
//! - Version magic (8 bytes)
//! - Payload length (4 bytes)
//! - bincode-encoded [`LedgerSnapshot`]
//! - SHA256 checksum over everything above (32 bytes)

use crate::boss::BossLedger;
use crate::core::constants::{SNAPSHOT_FILE_NAME, SNAPSHOT_VERSION_MAGIC};
use crate::error::SnapshotError;
use crate::modifiers::Modifier;
use crate::settlement::SettlementResult;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Everything needed to rebuild an engine's ledger state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub taken_at_ms: i64,
    pub bosses: Vec<BossLedger>,
    pub modifiers: Vec<Modifier>,
}

pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Store in the platform data directory (via `directories`).
    pub fn new() -> Result<Self, SnapshotError> {
        let project_dirs =
            ProjectDirs::from("", "", "leviathan").ok_or(SnapshotError::NoDataDir)?;
        Self::new_at(project_dirs.data_dir())
    }

    /// Store rooted at an explicit directory, created if missing.
    pub fn new_at(dir: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| SnapshotError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE_NAME)
    }

    pub fn exists(&self) -> bool {
        self.snapshot_path().exists()
    }

    pub fn save(&self, snapshot: &LedgerSnapshot) -> Result<(), SnapshotError> {
        let path = self.snapshot_path();
        let data = bincode::serialize(snapshot).map_err(SnapshotError::Encode)?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SNAPSHOT_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut bytes = Vec::with_capacity(8 + 4 + data.len() + 32);
        bytes.extend_from_slice(&SNAPSHOT_VERSION_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.extend_from_slice(&data);
        bytes.extend_from_slice(&checksum);
        fs::write(&path, &bytes).map_err(|source| SnapshotError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(
            path = %path.display(),
            bosses = snapshot.bosses.len(),
            bytes = data.len(),
            "Ledger snapshot saved"
        );
        Ok(())
    }

    pub fn load(&self) -> Result<LedgerSnapshot, SnapshotError> {
        let path = self.snapshot_path();
        let io_err = |source: std::io::Error| SnapshotError::Io {
            path: path.clone(),
            source,
        };
        let mut file = fs::File::open(&path).map_err(io_err)?;

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes).map_err(io_err)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SNAPSHOT_VERSION_MAGIC {
            return Err(SnapshotError::BadMagic {
                expected: SNAPSHOT_VERSION_MAGIC,
                found: version,
            });
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes).map_err(io_err)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data).map_err(io_err)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(SnapshotError::ChecksumMismatch);
        }

        bincode::deserialize(&data).map_err(SnapshotError::Decode)
    }

    /// Write a settlement as pretty JSON next to the snapshot, for whatever
    /// anchors or audits settlements downstream.
    pub fn export_settlement(&self, settlement: &SettlementResult) -> Result<PathBuf, SnapshotError> {
        let path = self
            .dir
            .join(format!("settlement-{}.json", settlement.boss_id));
        let json = serde_json::to_string_pretty(settlement)?;
        fs::write(&path, json).map_err(|source| SnapshotError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(boss_id = %settlement.boss_id, path = %path.display(), "Settlement exported");
        Ok(path)
    }
}
