use near_sdk::{near, AccountId};
use road_safety_model::{
    api::QueryApi,
    data::{
        record::RecordView,
        user::{AverageDataView, UserState, UserStatsView},
    },
    Handle, LedgerError,
};

use crate::{Contract, ContractExt};

impl Contract {
    pub(crate) fn try_get_user(&self, account_id: &AccountId) -> Option<&UserState> {
        self.users.get(account_id)
    }

    fn with_user<T>(&self, account_id: &AccountId, f: impl FnOnce(&UserState) -> T) -> T {
        match self.try_get_user(account_id) {
            Some(user) => f(user),
            None => f(&UserState::default()),
        }
    }
}

#[near]
impl QueryApi for Contract {
    fn get_user_stats(&self, account_id: AccountId) -> UserStatsView {
        self.with_user(&account_id, UserState::stats)
    }

    fn get_record_count(&self, account_id: AccountId) -> u32 {
        self.with_user(&account_id, UserState::record_count)
    }

    #[handle_result]
    fn get_record(&self, account_id: AccountId, index: u32) -> Result<RecordView, LedgerError> {
        self.with_user(&account_id, |user| {
            user.record(index).map(|record| RecordView::new(index, record))
        })
    }

    #[handle_result]
    fn get_latest_record(&self, account_id: AccountId) -> Result<RecordView, LedgerError> {
        self.with_user(&account_id, |user| {
            let record = user.latest_record()?;
            Ok(RecordView::new(user.record_count() - 1, record))
        })
    }

    fn get_average_data(&self, account_id: AccountId) -> AverageDataView {
        self.with_user(&account_id, UserState::average_data)
    }

    #[handle_result]
    fn get_trend(&self, account_id: AccountId) -> Result<Handle, LedgerError> {
        self.with_user(&account_id, UserState::trend)
    }
}
