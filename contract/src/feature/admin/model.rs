use near_sdk::{near, AccountId};
use road_safety_model::LedgerError;

/// Ledger-wide settings. Fixed admin, test mode switched by the admin only.
#[near]
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    pub admin: AccountId,
    /// Disables the cadence rule and allows the admin to reset a user's cadence gate.
    pub test_mode: bool,
}

impl LedgerConfig {
    pub fn new(admin: AccountId) -> Self {
        Self { admin, test_mode: false }
    }

    pub fn assert_admin(&self, account_id: &AccountId) -> Result<(), LedgerError> {
        if &self.admin != account_id {
            return Err(LedgerError::Unauthorized);
        }

        Ok(())
    }

    pub fn assert_test_mode(&self) -> Result<(), LedgerError> {
        if !self.test_mode {
            return Err(LedgerError::NotInTestMode);
        }

        Ok(())
    }
}
