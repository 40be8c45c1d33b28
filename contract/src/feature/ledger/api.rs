use near_sdk::{env, json_types::Base64VecU8, near};
use road_safety_model::{api::ScoreApi, Handle, LedgerError};

use super::model::{ScoreSubmission, Submission};
use crate::{
    common::event::{emit, EventKind, SubmitScoreData},
    Contract, ContractExt,
};

#[near]
impl ScoreApi for Contract {
    #[handle_result]
    fn submit_score(&mut self, score: Handle, proof: Base64VecU8, mileage_level: u8) -> Result<(), LedgerError> {
        let account_id = env::predecessor_account_id();
        let now = env::block_timestamp_ms();

        // Stored only once the submission is accepted
        let mut user = self.users.get(&account_id).cloned().unwrap_or_default();

        user.submit(
            &account_id,
            Submission {
                score,
                proof: proof.0,
                mileage_level: mileage_level.into(),
            },
            now,
            &self.config,
            &mut self.coprocessor,
        )?;

        let event = SubmitScoreData {
            account_id: account_id.clone(),
            index: user.record_count() - 1,
            timestamp: now,
            mileage_level: mileage_level.into(),
            consecutive_days: user.consecutive_days,
        };

        self.users.insert(account_id, user);

        emit(EventKind::SubmitScore(event));

        Ok(())
    }
}
