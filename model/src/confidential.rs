use near_sdk::{near, AccountId};

use crate::{Handle, LedgerError};

/// Describes how a handle was produced.
///
/// An off-chain coprocessor replays derivations to compute the ciphertext behind a handle,
/// and the decryption oracle uses them together with the access list to serve reveal requests.
#[near(serializers=[borsh, json])]
#[derive(Clone, Debug, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Derivation {
    /// Encrypted off-chain and verified on submission.
    Input { owner: AccountId },
    Add { lhs: Handle, rhs: Handle },
    /// `lhs - rhs`, wrapping modulo 2^32.
    Sub { lhs: Handle, rhs: Handle },
}

/// Confidential integer arithmetic and access control consumed by the ledger.
///
/// None of the operations discloses a plaintext. `add` and `subtract` return new handles,
/// `grant` lets a principal request decryption of a handle later. Only `verify_input` can fail.
pub trait ConfidentialCapability {
    /// Accepts an externally encrypted value if `proof` attests it was encrypted for this contract and `owner`.
    fn verify_input(&mut self, handle: Handle, proof: &[u8], owner: &AccountId) -> Result<Handle, LedgerError>;

    fn add(&mut self, lhs: Handle, rhs: Handle) -> Handle;

    fn subtract(&mut self, lhs: Handle, rhs: Handle) -> Handle;

    /// Idempotent: granting the same handle to the same principal twice changes nothing.
    fn grant(&mut self, handle: Handle, principal: &AccountId);

    fn is_allowed(&self, handle: Handle, principal: &AccountId) -> bool;
}
