use near_sdk::env;
use road_safety_model::LedgerError;

use crate::Contract;

impl Contract {
    pub(crate) fn assert_admin(&self) -> Result<(), LedgerError> {
        self.config.assert_admin(&env::predecessor_account_id())
    }

    pub(crate) fn assert_admin_in_test_mode(&self) -> Result<(), LedgerError> {
        self.assert_admin()?;
        self.config.assert_test_mode()
    }
}
