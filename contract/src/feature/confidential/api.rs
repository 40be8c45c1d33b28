use near_sdk::{json_types::Base64VecU8, near, AccountId};
use road_safety_model::{api::ConfidentialApi, ConfidentialCapability, Derivation, Handle};

use crate::{Contract, ContractExt};

#[near]
impl ConfidentialApi for Contract {
    fn is_allowed(&self, handle: Handle, account_id: AccountId) -> bool {
        self.coprocessor.is_allowed(handle, &account_id)
    }

    fn get_derivation(&self, handle: Handle) -> Option<Derivation> {
        self.coprocessor.derivation(&handle).cloned()
    }

    fn get_verifier_key(&self) -> Base64VecU8 {
        self.coprocessor.verifier_key().to_vec().into()
    }
}
