//! Error types for boss operations and ledger storage

use crate::modifiers::ModifierKind;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Expected, recoverable outcomes of boss operations.
///
/// Each variant maps to a stable code via [`BossError::code`] so the HTTP
/// layer can hand it straight to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BossError {
    #[error("no active boss for the current epoch")]
    NoActiveBoss,

    #[error("boss {0} does not exist")]
    BossNotFound(Uuid),

    #[error("boss {0} is already resolved")]
    BossAlreadyResolved(Uuid),

    #[error("boss {0} is not resolved yet")]
    BossNotResolved(Uuid),

    #[error("wallet {wallet} has not joined boss {boss_id}")]
    NotJoined { boss_id: Uuid, wallet: String },

    #[error("wallet {0} already used OVERLOAD on this boss")]
    OverloadAlreadyUsed(String),

    #[error("wallet {0} already used the reconnect protocol on this boss")]
    ReconnectAlreadyUsed(String),

    #[error("a signed challenge is required for this action")]
    SignatureRequired,

    #[error("signature verification failed for wallet {0}")]
    SignatureInvalid(String),

    #[error("{kind} already purchased for this epoch")]
    AlreadyPurchased { kind: ModifierKind },
}

impl BossError {
    pub fn code(&self) -> &'static str {
        match self {
            BossError::NoActiveBoss => "NO_ACTIVE_BOSS",
            BossError::BossNotFound(_) => "BOSS_NOT_FOUND",
            BossError::BossAlreadyResolved(_) => "BOSS_ALREADY_RESOLVED",
            BossError::BossNotResolved(_) => "BOSS_NOT_RESOLVED",
            BossError::NotJoined { .. } => "NOT_JOINED",
            BossError::OverloadAlreadyUsed(_) => "OVERLOAD_ALREADY_USED",
            BossError::ReconnectAlreadyUsed(_) => "RECONNECT_ALREADY_USED",
            BossError::SignatureRequired => "SIGNATURE_REQUIRED",
            BossError::SignatureInvalid(_) => "SIGNATURE_INVALID",
            BossError::AlreadyPurchased { .. } => "ALREADY_PURCHASED",
        }
    }
}

/// Errors reading or writing ledger snapshots. These are the genuine
/// infrastructure failures; callers should surface them as fatal.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not determine the data directory")]
    NoDataDir,

    #[error("failed to access snapshot file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadMagic { expected: u64, found: u64 },

    #[error("snapshot checksum verification failed")]
    ChecksumMismatch,

    #[error("failed to encode snapshot")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode snapshot")]
    Decode(#[source] bincode::Error),

    #[error("ledger for boss {boss_id} is inconsistent: {reason}")]
    InvalidLedger { boss_id: Uuid, reason: &'static str },

    #[error("failed to write settlement json")]
    Json(#[from] serde_json::Error),
}
