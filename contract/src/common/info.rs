use near_sdk::near;
use road_safety_model::api::InfoApi;

use crate::{Contract, ContractExt, PACKAGE_NAME, VERSION};

#[near]
impl InfoApi for Contract {
    fn contract_version(&self) -> String {
        format!("{PACKAGE_NAME}-{VERSION}")
    }
}
