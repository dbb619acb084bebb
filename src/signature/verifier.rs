use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("{0} must be valid base58")]
    NotBase58(&'static str),

    #[error("{field} must decode to {expected} bytes")]
    BadLength { field: &'static str, expected: usize },

    #[error("wallet is not a valid ed25519 public key")]
    InvalidKey,

    #[error("signature does not match message")]
    Mismatch,
}

/// Checks a wallet's signature over a challenge message.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, wallet: &str, message: &str, signature: &str) -> Result<(), SignatureError>;
}

/// Solana-style wallets: the wallet is a base58 ed25519 public key and the
/// signature a base58 64-byte detached signature over the UTF-8 message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, wallet: &str, message: &str, signature: &str) -> Result<(), SignatureError> {
        let public_key = decode_base58_array::<32>(wallet, "wallet public key")?;
        let signature = decode_base58_array::<64>(signature, "signature")?;
        let verifying_key =
            VerifyingKey::from_bytes(&public_key).map_err(|_| SignatureError::InvalidKey)?;
        verifying_key
            .verify(message.as_bytes(), &Signature::from_bytes(&signature))
            .map_err(|_| SignatureError::Mismatch)
    }
}

/// Base58 wallet address for a signing key.
pub fn wallet_address(signing_key: &SigningKey) -> String {
    bs58::encode(signing_key.verifying_key().to_bytes()).into_string()
}

/// Client side of the protocol: sign a challenge message.
pub fn sign_message(signing_key: &SigningKey, message: &str) -> String {
    bs58::encode(signing_key.sign(message.as_bytes()).to_bytes()).into_string()
}

fn decode_base58_array<const N: usize>(
    input: &str,
    field: &'static str,
) -> Result<[u8; N], SignatureError> {
    let bytes = bs58::decode(input)
        .into_vec()
        .map_err(|_| SignatureError::NotBase58(field))?;
    bytes
        .try_into()
        .map_err(|_| SignatureError::BadLength { field, expected: N })
}
