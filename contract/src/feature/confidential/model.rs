use near_sdk::{
    env, near,
    store::{LookupMap, LookupSet},
    AccountId, IntoStorageKey,
};
use road_safety_model::{
    signer::{InputMessage, MessageVerifier},
    ConfidentialCapability, Derivation, Handle, LedgerError,
};

use crate::common::event::{emit, AllowData, ComputationData, EventKind};

/// Symbolic executor of confidential integer operations.
///
/// The contract never holds ciphertexts. Each operation derives the result handle from its operands,
/// records the derivation and emits it, and the off-chain coprocessor computes the actual ciphertext.
/// Decryption requests are served by the oracle only for `(handle, account)` pairs in `access_list`.
#[near]
pub struct Coprocessor {
    /// ed25519 public key of the service that signs encrypted inputs.
    verifier_key: Vec<u8>,
    derivations: LookupMap<Handle, Derivation>,
    access_list: LookupSet<(Handle, AccountId)>,
}

impl Coprocessor {
    pub fn new(verifier_key: Vec<u8>, derivations: impl IntoStorageKey, access_list: impl IntoStorageKey) -> Self {
        MessageVerifier::assert_valid_key(&verifier_key);

        Self {
            verifier_key,
            derivations: LookupMap::new(derivations),
            access_list: LookupSet::new(access_list),
        }
    }

    pub fn verifier_key(&self) -> &[u8] {
        &self.verifier_key
    }

    pub fn set_verifier_key(&mut self, verifier_key: Vec<u8>) {
        MessageVerifier::assert_valid_key(&verifier_key);
        self.verifier_key = verifier_key;
    }

    pub fn derivation(&self, handle: &Handle) -> Option<&Derivation> {
        self.derivations.get(handle)
    }

    fn derive(&mut self, derivation: Derivation) -> Handle {
        let (op, lhs, rhs) = match &derivation {
            Derivation::Add { lhs, rhs } => (b"add", lhs, rhs),
            Derivation::Sub { lhs, rhs } => (b"sub", lhs, rhs),
            Derivation::Input { .. } => env::panic_str("Inputs are registered, not derived"),
        };

        let material = [op.as_slice(), lhs.as_bytes().as_slice(), rhs.as_bytes().as_slice()].concat();
        let result = Handle::new(env::sha256_array(&material));

        if !self.derivations.contains_key(&result) {
            self.derivations.insert(result, derivation.clone());
            emit(EventKind::Computation(ComputationData { result, derivation }));
        }

        result
    }
}

impl ConfidentialCapability for Coprocessor {
    fn verify_input(&mut self, handle: Handle, proof: &[u8], owner: &AccountId) -> Result<Handle, LedgerError> {
        let message = InputMessage::new(&env::current_account_id(), owner, &handle);

        MessageVerifier::new(&self.verifier_key).verify(&message.sha256(), proof)?;

        if !self.derivations.contains_key(&handle) {
            self.derivations
                .insert(handle, Derivation::Input { owner: owner.clone() });
        }

        Ok(handle)
    }

    fn add(&mut self, lhs: Handle, rhs: Handle) -> Handle {
        self.derive(Derivation::Add { lhs, rhs })
    }

    fn subtract(&mut self, lhs: Handle, rhs: Handle) -> Handle {
        self.derive(Derivation::Sub { lhs, rhs })
    }

    fn grant(&mut self, handle: Handle, principal: &AccountId) {
        if self.access_list.insert((handle, principal.clone())) {
            emit(EventKind::Allow(AllowData {
                handle,
                account_id: principal.clone(),
            }));
        }
    }

    fn is_allowed(&self, handle: Handle, principal: &AccountId) -> bool {
        self.access_list.contains(&(handle, principal.clone()))
    }
}
