use near_sdk::near;

use crate::{data::record::Record, Handle, LedgerError, Timestamp, CADENCE_WINDOW, STREAK_GRACE_WINDOW};

/// Everything the ledger keeps for one submitting account.
///
/// Invariants:
/// - `records.len() == running_count`
/// - `consecutive_days <= records.len()`
/// - `trend` is `current_score - previous_score` and is defined iff `previous_score` is defined
#[near]
#[derive(Default, Debug, PartialEq, Clone)]
pub struct UserState {
    /// Append-only history, index 0 is the first submission.
    pub records: Vec<Record>,
    /// Time of the last accepted submission, 0 if there is none or it was reset by the admin.
    pub last_submit_time: Timestamp,
    pub consecutive_days: u32,
    /// Encrypted sum of all submitted scores.
    pub running_total: Option<Handle>,
    pub running_count: u32,
    pub previous_score: Option<Handle>,
    pub current_score: Option<Handle>,
    pub trend: Option<Handle>,
}

impl UserState {
    pub fn record_count(&self) -> u32 {
        self.running_count
    }

    pub fn record(&self, index: u32) -> Result<&Record, LedgerError> {
        self.records
            .get(index as usize)
            .ok_or(LedgerError::IndexOutOfRange)
    }

    pub fn latest_record(&self) -> Result<&Record, LedgerError> {
        self.records.last().ok_or(LedgerError::NoRecords)
    }

    pub fn trend(&self) -> Result<Handle, LedgerError> {
        self.trend.ok_or(LedgerError::NoTrend)
    }

    /// One submission per cadence window unless test mode is on.
    pub fn check_cadence(&self, now: Timestamp, test_mode: bool) -> Result<(), LedgerError> {
        if test_mode || self.last_submit_time == 0 {
            return Ok(());
        }

        if now.saturating_sub(self.last_submit_time) < CADENCE_WINDOW {
            return Err(LedgerError::CadenceViolation);
        }

        Ok(())
    }

    /// Streak value after a submission accepted at `now`.
    ///
    /// Submissions on the same day (only possible in test mode) keep the streak,
    /// a submission within `[CADENCE_WINDOW, STREAK_GRACE_WINDOW]` extends it, anything later starts over.
    pub fn next_streak(&self, now: Timestamp) -> u32 {
        if self.records.is_empty() {
            return 1;
        }

        let elapsed = now.saturating_sub(self.last_submit_time);

        if elapsed < CADENCE_WINDOW {
            self.consecutive_days.max(1)
        } else if elapsed <= STREAK_GRACE_WINDOW {
            self.consecutive_days + 1
        } else {
            1
        }
    }

    pub fn stats(&self) -> UserStatsView {
        UserStatsView {
            record_count: self.record_count(),
            consecutive_days: self.consecutive_days,
            last_submit_time: self.last_submit_time,
        }
    }

    pub fn average_data(&self) -> AverageDataView {
        AverageDataView {
            total: self.running_total,
            count: self.running_count,
        }
    }
}

#[near(serializers=[json])]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserStatsView {
    pub record_count: u32,
    pub consecutive_days: u32,
    pub last_submit_time: Timestamp,
}

/// Encrypted total and plain count of submissions.
/// The average is computed by the owner after decrypting `total`.
#[near(serializers=[json])]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AverageDataView {
    pub total: Option<Handle>,
    pub count: u32,
}
