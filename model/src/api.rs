use near_sdk::{json_types::Base64VecU8, AccountId};

use crate::{
    data::{
        record::RecordView,
        user::{AverageDataView, UserStatsView},
    },
    Derivation, Handle, LedgerError,
};

pub trait InitApi {
    /// * `admin` – the only account allowed to toggle test mode, reset cadence and rotate the verifier key.
    /// * `verifier_key` – ed25519 public key of the service that signs encrypted inputs.
    fn init(admin: AccountId, verifier_key: Base64VecU8) -> Self;
}

pub trait InfoApi {
    fn contract_version(&self) -> String;
}

/// The `ScoreApi` trait defines the submission entry point of the ledger.
pub trait ScoreApi {
    /// Records today's encrypted driving score of the calling account.
    ///
    /// On success the record is appended, the streak, the encrypted running total, count and trend
    /// are updated, and the caller is granted decryption access to the score, the total and the trend.
    ///
    /// # Arguments
    ///
    /// * `score` – handle of the encrypted score.
    /// * `proof` – input verifier signature over the contract, the caller and `score`.
    /// * `mileage_level` – 0 unknown, 1 short, 2 medium, 3 long. Other values are stored as is.
    ///
    /// # Errors
    ///
    /// - `CadenceViolation` if the previous submission was less than a day ago and test mode is off.
    /// - `InvalidProof` if `proof` doesn't match.
    fn submit_score(&mut self, score: Handle, proof: Base64VecU8, mileage_level: u8) -> Result<(), LedgerError>;
}

/// Privileged operations for controlled testing. All mutating methods are admin only.
pub trait AdminApi {
    fn set_test_mode(&mut self, enabled: bool) -> Result<(), LedgerError>;

    /// Clears the cadence gate of `account_id` so it can submit again immediately.
    /// Records, streak and aggregates stay untouched. Works only in test mode.
    fn reset_user_submit_time(&mut self, account_id: AccountId) -> Result<(), LedgerError>;

    fn set_verifier_key(&mut self, verifier_key: Base64VecU8) -> Result<(), LedgerError>;

    fn get_test_mode(&self) -> bool;
}

/// Read-only projections of a user's ledger. Unknown accounts look like accounts without submissions.
pub trait QueryApi {
    fn get_user_stats(&self, account_id: AccountId) -> UserStatsView;

    fn get_record_count(&self, account_id: AccountId) -> u32;

    fn get_record(&self, account_id: AccountId, index: u32) -> Result<RecordView, LedgerError>;

    fn get_latest_record(&self, account_id: AccountId) -> Result<RecordView, LedgerError>;

    /// Decrypting `total` requires a grant, which the owner receives on every submission.
    fn get_average_data(&self, account_id: AccountId) -> AverageDataView;

    fn get_trend(&self, account_id: AccountId) -> Result<Handle, LedgerError>;
}

/// Views used by the off-chain coprocessor and decryption oracle.
pub trait ConfidentialApi {
    fn is_allowed(&self, handle: Handle, account_id: AccountId) -> bool;

    fn get_derivation(&self, handle: Handle) -> Option<Derivation>;

    fn get_verifier_key(&self) -> Base64VecU8;
}
