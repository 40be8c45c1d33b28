use near_sdk::{json_types::Base64VecU8, near, AccountId};
use road_safety_model::{api::AdminApi, LedgerError};

use crate::{
    common::event::{emit, EventKind},
    Contract, ContractExt,
};

#[near]
impl AdminApi for Contract {
    #[handle_result]
    fn set_test_mode(&mut self, enabled: bool) -> Result<(), LedgerError> {
        self.assert_admin()?;

        self.config.test_mode = enabled;

        emit(EventKind::SetTestMode(enabled));

        Ok(())
    }

    #[handle_result]
    fn reset_user_submit_time(&mut self, account_id: AccountId) -> Result<(), LedgerError> {
        self.assert_admin_in_test_mode()?;

        if let Some(user) = self.users.get_mut(&account_id) {
            user.last_submit_time = 0;
        }

        emit(EventKind::ResetSubmitTime(account_id));

        Ok(())
    }

    #[handle_result]
    fn set_verifier_key(&mut self, verifier_key: Base64VecU8) -> Result<(), LedgerError> {
        self.assert_admin()?;

        self.coprocessor.set_verifier_key(verifier_key.0.clone());

        emit(EventKind::SetVerifierKey(verifier_key));

        Ok(())
    }

    fn get_test_mode(&self) -> bool {
        self.config.test_mode
    }
}
