//! Signature-gated actions: challenges and their verification.

pub mod challenge;
pub mod verifier;

pub use challenge::{Challenge, ChallengeAction, ChallengeBook};
pub use verifier::{sign_message, wallet_address, Ed25519Verifier, SignatureError, SignatureVerifier};
