#![cfg(test)]

use std::{
    borrow::Borrow,
    panic::{catch_unwind, UnwindSafe},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use near_sdk::{test_utils::VMContextBuilder, testing_env, AccountId};
use road_safety_model::{api::InitApi, Handle, LedgerError, Timestamp, MS_IN_DAY, MS_IN_HOUR};

use super::{env::test_env_ext, event::EventKind};
use crate::{
    feature::confidential::model::test_utils::{MockOracle, RevealError},
    Contract,
};

/// 2024-07-29, block time before the first action of each test.
pub const START: Timestamp = 1_722_234_632_000;

pub mod accounts {
    use near_sdk::AccountId;
    use rstest::fixture;

    #[fixture]
    pub fn admin() -> AccountId {
        "admin.near".parse().unwrap()
    }

    #[fixture]
    pub fn alice() -> AccountId {
        near_sdk::test_utils::test_env::alice()
    }

    #[fixture]
    pub fn bob() -> AccountId {
        near_sdk::test_utils::test_env::bob()
    }

    #[fixture]
    pub fn carol() -> AccountId {
        near_sdk::test_utils::test_env::carol()
    }
}

pub(crate) struct Context {
    contract: Arc<Mutex<Contract>>,
    pub oracle: MockOracle,
    builder: VMContextBuilder,
}

impl Context {
    pub(crate) fn new(admin: AccountId) -> Self {
        let owner: AccountId = "owner".to_string().try_into().unwrap();
        let oracle = MockOracle::new();

        let mut builder = VMContextBuilder::new();
        builder
            .current_account_id(owner.clone())
            .signer_account_id(owner.clone())
            .predecessor_account_id(owner.clone())
            .block_timestamp(Duration::from_millis(START).as_nanos() as u64);

        testing_env!(builder.build());

        let contract = Contract::init(admin, oracle.public_key().into());

        Self {
            oracle,
            builder,
            contract: Arc::new(Mutex::new(contract)),
        }
    }

    pub(crate) fn now(&self) -> Timestamp {
        self.builder.context.block_timestamp / 1_000_000
    }

    pub(crate) fn contract(&self) -> MutexGuard<Contract> {
        self.contract.try_lock().expect("Contract is already locked")
    }

    /// Encrypts `score` for `account_id` and submits it on its behalf.
    pub(crate) fn submit(&mut self, account_id: impl Borrow<AccountId>, score: u32, mileage_level: u8) -> Result<Handle, LedgerError> {
        use road_safety_model::api::ScoreApi;

        let account_id = account_id.borrow().clone();
        self.switch_account(&account_id);

        let (handle, proof) = self.oracle.encrypt(score, &account_id);
        self.contract().submit_score(handle, proof, mileage_level)?;

        Ok(handle)
    }

    pub(crate) fn reveal(&self, handle: Handle, principal: impl Borrow<AccountId>) -> Result<u32, RevealError> {
        self.oracle.reveal(&self.contract(), handle, principal.borrow())
    }

    pub(crate) fn reveal_signed(&self, handle: Handle, principal: impl Borrow<AccountId>) -> Result<i32, RevealError> {
        self.oracle.reveal_signed(&self.contract(), handle, principal.borrow())
    }

    pub(crate) fn advance_block_timestamp_days(&mut self, days: u64) {
        self.set_block_timestamp_in_ms(self.now() + days * MS_IN_DAY);
    }

    pub(crate) fn advance_block_timestamp_hours(&mut self, hours: u64) {
        self.set_block_timestamp_in_ms(self.now() + hours * MS_IN_HOUR);
    }

    pub(crate) fn advance_block_timestamp_ms(&mut self, ms: u64) {
        self.set_block_timestamp_in_ms(self.now() + ms);
    }

    pub(crate) fn set_block_timestamp_in_ms(&mut self, ms: u64) {
        self.set_block_timestamp(Duration::from_millis(ms));
    }

    fn set_block_timestamp(&mut self, duration: Duration) {
        self.builder.block_timestamp(duration.as_nanos() as u64);
        testing_env!(self.builder.build());
    }

    pub(crate) fn switch_account(&mut self, account_id: impl Borrow<AccountId>) {
        let account_id = account_id.borrow().clone();
        self.builder
            .predecessor_account_id(account_id.clone())
            .signer_account_id(account_id);
        testing_env!(self.builder.build());
    }

    pub(crate) fn switch_account_to_admin(&mut self) {
        let admin = self.contract().config.admin.clone();
        self.switch_account(admin);
    }

    pub(crate) fn get_events(&self) -> Vec<EventKind> {
        test_env_ext::get_events()
    }
}

impl AfterCatchUnwind for Context {
    fn after_catch_unwind(&self) {
        self.contract.clear_poison();
    }
}

pub trait WhitespaceTrimmer {
    fn trim_whitespaces(&self) -> String;
}

impl WhitespaceTrimmer for &str {
    fn trim_whitespaces(&self) -> String {
        let words: Vec<_> = self.split_whitespace().collect();
        words.join(" ")
    }
}

impl WhitespaceTrimmer for String {
    fn trim_whitespaces(&self) -> String {
        self.as_str().trim_whitespaces()
    }
}

pub trait AfterCatchUnwind {
    fn after_catch_unwind(&self);
}

impl AfterCatchUnwind for () {
    fn after_catch_unwind(&self) {}
}

pub fn expect_panic(ctx: &impl AfterCatchUnwind, msg: &str, action: impl FnOnce() + UnwindSafe) {
    let res = catch_unwind(action);

    let panic_msg = res
        .err()
        .unwrap_or_else(|| panic!("Contract didn't panic when expected to.\nExpected message: {msg}"));

    if msg.is_empty() {
        ctx.after_catch_unwind();
        return;
    }

    let panic_msg = if let Some(msg) = panic_msg.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic_msg.downcast_ref::<String>() {
        msg.clone()
    } else {
        panic!("Contract didn't panic with String or &str.\nExpected message: {msg}")
    };

    assert!(
        panic_msg.contains(msg),
        "Expected panic message to contain: {msg}.\nPanic message: {panic_msg}"
    );

    ctx.after_catch_unwind();
}
