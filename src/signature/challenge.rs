//! Single-use signing challenges.
//!
//! A challenge binds a wallet, an action and a boss to a random nonce. The
//! client signs the challenge message and presents the signature; the
//! challenge is consumed on the first attempt, valid or not.

use crate::boss::BossId;
use crate::core::constants::CHALLENGE_NONCE_BYTES;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::Mutex;

/// Actions gated behind a fresh wallet signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeAction {
    Overload,
}

impl ChallengeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeAction::Overload => "OVERLOAD",
        }
    }
}

impl fmt::Display for ChallengeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub wallet: String,
    pub action: ChallengeAction,
    pub boss_id: BossId,
    /// Hex-encoded random bytes.
    pub nonce: String,
    /// The exact text the wallet must sign.
    pub message: String,
    pub issued_at_ms: i64,
    pub expires_at_ms: i64,
}

impl Challenge {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

fn challenge_message(wallet: &str, action: ChallengeAction, boss_id: BossId, nonce: &str) -> String {
    format!("Sign this message to authorize {action} on boss {boss_id} for wallet {wallet}: {nonce}")
}

type ChallengeKey = (String, ChallengeAction, BossId);

/// Outstanding challenges, at most one per (wallet, action, boss).
#[derive(Debug)]
pub struct ChallengeBook {
    outstanding: Mutex<HashMap<ChallengeKey, Challenge>>,
    ttl_ms: i64,
}

impl ChallengeBook {
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            outstanding: Mutex::new(HashMap::new()),
            ttl_ms,
        }
    }

    /// Issue a fresh challenge, replacing any earlier one for the same key.
    pub async fn issue(
        &self,
        wallet: &str,
        action: ChallengeAction,
        boss_id: BossId,
        now_ms: i64,
    ) -> Challenge {
        let mut bytes = [0u8; CHALLENGE_NONCE_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let nonce = hex::encode(bytes);

        let challenge = Challenge {
            wallet: wallet.to_string(),
            action,
            boss_id,
            message: challenge_message(wallet, action, boss_id, &nonce),
            nonce,
            issued_at_ms: now_ms,
            expires_at_ms: now_ms + self.ttl_ms,
        };

        let mut outstanding = self.outstanding.lock().await;
        outstanding.retain(|_, c| !c.is_expired(now_ms));
        outstanding.insert((wallet.to_string(), action, boss_id), challenge.clone());
        challenge
    }

    /// Remove and return the outstanding challenge if it has not expired.
    pub async fn take(
        &self,
        wallet: &str,
        action: ChallengeAction,
        boss_id: BossId,
        now_ms: i64,
    ) -> Option<Challenge> {
        let challenge = self
            .outstanding
            .lock()
            .await
            .remove(&(wallet.to_string(), action, boss_id))?;
        (!challenge.is_expired(now_ms)).then_some(challenge)
    }

    pub async fn outstanding_count(&self) -> usize {
        self.outstanding.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_issue_binds_wallet_action_and_boss() {
        let book = ChallengeBook::new(1000);
        let boss = Uuid::new_v4();
        let c = book.issue("wallet-a", ChallengeAction::Overload, boss, 10).await;
        assert_eq!(c.nonce.len(), CHALLENGE_NONCE_BYTES * 2);
        assert!(c.message.contains("wallet-a"));
        assert!(c.message.contains("OVERLOAD"));
        assert!(c.message.contains(&boss.to_string()));
        assert!(c.message.ends_with(&c.nonce));
        assert_eq!(c.expires_at_ms, 1010);
    }

    #[tokio::test]
    async fn test_take_is_single_use() {
        let book = ChallengeBook::new(1000);
        let boss = Uuid::new_v4();
        let issued = book.issue("a", ChallengeAction::Overload, boss, 0).await;
        let taken = book.take("a", ChallengeAction::Overload, boss, 5).await;
        assert_eq!(taken, Some(issued));
        assert!(book.take("a", ChallengeAction::Overload, boss, 6).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_challenge_not_returned() {
        let book = ChallengeBook::new(1000);
        let boss = Uuid::new_v4();
        book.issue("a", ChallengeAction::Overload, boss, 0).await;
        assert!(book.take("a", ChallengeAction::Overload, boss, 1000).await.is_none());
        assert_eq!(book.outstanding_count().await, 0);
    }

    #[tokio::test]
    async fn test_challenge_bound_to_wallet_and_boss() {
        let book = ChallengeBook::new(1000);
        let boss = Uuid::new_v4();
        book.issue("a", ChallengeAction::Overload, boss, 0).await;
        assert!(book.take("b", ChallengeAction::Overload, boss, 1).await.is_none());
        assert!(book.take("a", ChallengeAction::Overload, Uuid::new_v4(), 1).await.is_none());
        assert!(book.take("a", ChallengeAction::Overload, boss, 1).await.is_some());
    }

    #[tokio::test]
    async fn test_reissue_replaces_previous() {
        let book = ChallengeBook::new(1000);
        let boss = Uuid::new_v4();
        let first = book.issue("a", ChallengeAction::Overload, boss, 0).await;
        let second = book.issue("a", ChallengeAction::Overload, boss, 1).await;
        assert_ne!(first.nonce, second.nonce);
        assert_eq!(book.outstanding_count().await, 1);
        assert_eq!(book.take("a", ChallengeAction::Overload, boss, 2).await, Some(second));
    }
}
