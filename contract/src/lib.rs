use near_sdk::{json_types::Base64VecU8, near, store::LookupMap, AccountId, BorshStorageKey, PanicOnDefault};
use road_safety_model::{api::InitApi, data::user::UserState};

use crate::feature::{admin::model::LedgerConfig, confidential::model::Coprocessor};

mod common;
mod feature;

pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[near(contract_state)]
#[derive(PanicOnDefault)]
/// The `Contract` struct keeps the encrypted driving score ledgers of all users.
pub struct Contract {
    /// The admin account and the test mode switch.
    pub config: LedgerConfig,

    /// Ledger of every account that has submitted at least once.
    pub users: LookupMap<AccountId, UserState>,

    /// Executes confidential arithmetic symbolically and keeps the decryption access list.
    pub coprocessor: Coprocessor,
}

#[near]
#[derive(BorshStorageKey)]
pub(crate) enum StorageKey {
    Users,
    Derivations,
    AccessList,
}

#[near]
impl InitApi for Contract {
    #[init]
    #[private]
    fn init(admin: AccountId, verifier_key: Base64VecU8) -> Self {
        Self {
            config: LedgerConfig::new(admin),
            users: LookupMap::new(StorageKey::Users),
            coprocessor: Coprocessor::new(verifier_key.0, StorageKey::Derivations, StorageKey::AccessList),
        }
    }
}
