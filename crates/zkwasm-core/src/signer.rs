//! Personal-message signatures over canonical request messages.

use std::fmt;

use alloy_primitives::{Address, eip191_hash_message, hex};
use k256::ecdsa::SigningKey;

use crate::error::{Error, Result};

/// Length of a recoverable signature: `r ‖ s ‖ v`.
pub const SIGNATURE_LENGTH: usize = 65;

/// Offset added to the recovery byte by legacy verifiers.
pub const LEGACY_RECOVERY_OFFSET: u8 = 27;

/// Holder of the account key used to sign request messages.
///
/// Immutable after construction, so one signer can be shared across concurrent requests.
#[derive(Clone)]
pub struct MessageSigner {
    key: SigningKey,
    address: Address,
}

impl fmt::Debug for MessageSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl MessageSigner {
    /// Creates a signer from a secp256k1 key.
    pub fn new(key: SigningKey) -> Self {
        let address = Address::from_public_key(key.verifying_key());
        Self { key, address }
    }

    /// Parses a hex-encoded 32-byte private key, with or without `0x` prefix.
    pub fn from_hex(private_key: &str) -> Result<Self> {
        let bytes = hex::decode(private_key.trim())
            .map_err(|err| Error::InvalidPrivateKey(err.to_string()))?;
        let key =
            SigningKey::from_slice(&bytes).map_err(|err| Error::InvalidPrivateKey(err.to_string()))?;
        Ok(Self::new(key))
    }

    /// Address of the account.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs `message` with the personal-message prefix and returns `r ‖ s ‖ v`.
    ///
    /// `v` is the raw recovery id (0 or 1). With `legacy_v_adjustment`, 27 is added to it.
    pub fn sign(&self, message: &str, legacy_v_adjustment: bool) -> Result<[u8; SIGNATURE_LENGTH]> {
        let hash = eip191_hash_message(message);
        let (signature, recovery_id) = self.key.sign_prehash_recoverable(hash.as_slice())?;

        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte();
        if legacy_v_adjustment {
            out[64] = out[64].wrapping_add(LEGACY_RECOVERY_OFFSET);
        }

        Ok(out)
    }

    /// Same as [`MessageSigner::sign`], hex-encoded with a `0x` prefix.
    pub fn sign_hex(&self, message: &str, legacy_v_adjustment: bool) -> Result<String> {
        Ok(hex::encode_prefixed(self.sign(message, legacy_v_adjustment)?))
    }
}
