use std::{
    fmt::{Display, Formatter},
    ops::Deref,
};

use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use near_sdk::{env, AccountId};
use sha2::{Digest, Sha256};

use crate::{Handle, LedgerError};

/// Material signed by the input verifier for every encrypted submission.
/// Binds a handle to the contract and the account allowed to submit it.
pub struct InputMessage(String);

pub fn sha256(value: &[u8]) -> Vec<u8> {
    Sha256::digest(value).to_vec()
}

impl InputMessage {
    pub fn new(contract_account_id: &AccountId, owner_account_id: &AccountId, handle: &Handle) -> Self {
        Self(format!("{contract_account_id},{owner_account_id},{handle}"))
    }

    pub fn sha256(&self) -> Vec<u8> {
        sha256(self.0.as_bytes())
    }
}

impl Display for InputMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for InputMessage {
    type Target = String;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct MessageVerifier {
    verifying_key: VerifyingKey,
}

impl MessageVerifier {
    /// Panics on a malformed key. Keys are checked when they are configured,
    /// so a stored key always produces a verifier.
    pub fn new(verifying_key_bytes: &[u8]) -> Self {
        Self {
            verifying_key: parse_verifying_key(verifying_key_bytes),
        }
    }

    /// Panics unless `verifying_key_bytes` is a valid ed25519 public key.
    pub fn assert_valid_key(verifying_key_bytes: &[u8]) {
        parse_verifying_key(verifying_key_bytes);
    }

    pub fn verify(&self, message_sha256: &[u8], signature: &[u8]) -> Result<(), LedgerError> {
        let signature: [u8; SIGNATURE_LENGTH] = signature.try_into().map_err(|_| LedgerError::InvalidProof)?;

        self.verifying_key
            .verify_strict(message_sha256, &Signature::from_bytes(&signature))
            .map_err(|_| LedgerError::InvalidProof)
    }
}

fn parse_verifying_key(verifying_key_bytes: &[u8]) -> VerifyingKey {
    let verifying_key_bytes: [u8; PUBLIC_KEY_LENGTH] = verifying_key_bytes
        .try_into()
        .unwrap_or_else(|_| env::panic_str(&format!("Public key must be {PUBLIC_KEY_LENGTH} bytes")));

    VerifyingKey::from_bytes(&verifying_key_bytes).unwrap_or_else(|_| env::panic_str("Verifying key is invalid"))
}

#[cfg(feature = "testing")]
pub mod test_utils {
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    use crate::signer::sha256;

    pub struct MessageSigner {
        signing_key: SigningKey,
    }

    impl MessageSigner {
        pub fn new() -> Self {
            let mut csprng = OsRng;
            let signing_key: SigningKey = SigningKey::generate(&mut csprng);

            Self { signing_key }
        }

        pub fn sign(&self, message: &str) -> Vec<u8> {
            let message_hash = sha256(message.as_bytes());
            let signature = self.signing_key.sign(message_hash.as_slice());
            signature.to_bytes().to_vec()
        }

        pub fn public_key(&self) -> Vec<u8> {
            self.signing_key.verifying_key().as_ref().to_vec()
        }
    }

    impl Default for MessageSigner {
        fn default() -> Self {
            Self::new()
        }
    }
}
