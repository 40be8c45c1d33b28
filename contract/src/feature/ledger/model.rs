use near_sdk::AccountId;
use road_safety_model::{
    data::{mileage::MileageLevel, record::Record, user::UserState},
    ConfidentialCapability, Handle, LedgerError, Timestamp,
};

use crate::feature::admin::model::LedgerConfig;

/// An encrypted score as it arrives from the caller.
pub struct Submission {
    pub score: Handle,
    pub proof: Vec<u8>,
    pub mileage_level: MileageLevel,
}

pub trait ScoreSubmission {
    /// Validates and applies a submission of `owner` made at `now`.
    /// Either every derived value is updated or, on error, nothing is.
    fn submit(
        &mut self,
        owner: &AccountId,
        submission: Submission,
        now: Timestamp,
        config: &LedgerConfig,
        capability: &mut impl ConfidentialCapability,
    ) -> Result<(), LedgerError>;
}

impl ScoreSubmission for UserState {
    fn submit(
        &mut self,
        owner: &AccountId,
        submission: Submission,
        now: Timestamp,
        config: &LedgerConfig,
        capability: &mut impl ConfidentialCapability,
    ) -> Result<(), LedgerError> {
        self.check_cadence(now, config.test_mode)?;
        let score = capability.verify_input(submission.score, &submission.proof, owner)?;

        // Nothing below can fail.
        let consecutive_days = self.next_streak(now);

        self.records.push(Record::new(now, submission.mileage_level, score));

        let total = match self.running_total {
            Some(total) => capability.add(total, score),
            None => score,
        };
        self.running_total = Some(total);
        self.running_count += 1;

        self.previous_score = self.current_score.replace(score);
        if let Some(previous) = self.previous_score {
            self.trend = Some(capability.subtract(score, previous));
        }

        self.last_submit_time = now;
        self.consecutive_days = consecutive_days;

        capability.grant(score, owner);
        capability.grant(total, owner);
        if let Some(trend) = self.trend {
            capability.grant(trend, owner);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::{HashMap, HashSet};

    use near_sdk::AccountId;
    use road_safety_model::{
        data::{mileage::MileageLevel, user::UserState},
        ConfidentialCapability, Handle, LedgerError, MS_IN_DAY, MS_IN_HOUR,
    };

    use crate::feature::{
        admin::model::LedgerConfig,
        ledger::model::{ScoreSubmission, Submission},
    };

    const NOW: u64 = 1_722_234_632_000;

    /// Plaintext capability: handles carry their value in the first four bytes.
    #[derive(Default)]
    struct PlainCapability {
        values: HashMap<Handle, u32>,
        grants: HashSet<(Handle, AccountId)>,
        grant_calls: Vec<(Handle, AccountId)>,
    }

    impl PlainCapability {
        fn value(&self, handle: Handle) -> u32 {
            self.values[&handle]
        }

        fn store(&mut self, value: u32) -> Handle {
            let mut bytes = [0; 32];
            bytes[..4].copy_from_slice(&value.to_le_bytes());
            bytes[4..8].copy_from_slice(&(self.values.len() as u32).to_le_bytes());
            let handle = Handle::new(bytes);
            self.values.insert(handle, value);
            handle
        }
    }

    impl ConfidentialCapability for PlainCapability {
        fn verify_input(&mut self, handle: Handle, proof: &[u8], _owner: &AccountId) -> Result<Handle, LedgerError> {
            if proof != b"valid" {
                return Err(LedgerError::InvalidProof);
            }
            Ok(handle)
        }

        fn add(&mut self, lhs: Handle, rhs: Handle) -> Handle {
            let value = self.value(lhs).wrapping_add(self.value(rhs));
            self.store(value)
        }

        fn subtract(&mut self, lhs: Handle, rhs: Handle) -> Handle {
            let value = self.value(lhs).wrapping_sub(self.value(rhs));
            self.store(value)
        }

        fn grant(&mut self, handle: Handle, principal: &AccountId) {
            self.grant_calls.push((handle, principal.clone()));
            self.grants.insert((handle, principal.clone()));
        }

        fn is_allowed(&self, handle: Handle, principal: &AccountId) -> bool {
            self.grants.contains(&(handle, principal.clone()))
        }
    }

    fn alice() -> AccountId {
        "alice.near".parse().unwrap()
    }

    fn config() -> LedgerConfig {
        LedgerConfig::new("admin.near".parse().unwrap())
    }

    fn submit(
        user: &mut UserState,
        capability: &mut PlainCapability,
        score: u32,
        now: u64,
    ) -> Result<(), LedgerError> {
        let handle = capability.store(score);
        let submission = Submission {
            score: handle,
            proof: b"valid".to_vec(),
            mileage_level: MileageLevel(1),
        };
        user.submit(&alice(), submission, now, &config(), capability)
    }

    #[test]
    fn aggregates_and_trend() {
        let mut user = UserState::default();
        let mut capability = PlainCapability::default();

        submit(&mut user, &mut capability, 70, NOW).unwrap();
        assert_eq!(user.trend, None);
        assert_eq!(user.previous_score, None);
        assert_eq!(user.running_total, user.current_score);

        submit(&mut user, &mut capability, 80, NOW + MS_IN_DAY).unwrap();
        submit(&mut user, &mut capability, 60, NOW + 2 * MS_IN_DAY).unwrap();

        assert_eq!(capability.value(user.running_total.unwrap()), 210);
        assert_eq!(user.running_count, 3);
        assert_eq!(user.records.len(), 3);
        assert_eq!(capability.value(user.current_score.unwrap()), 60);
        assert_eq!(capability.value(user.previous_score.unwrap()), 80);
        assert_eq!(capability.value(user.trend.unwrap()) as i32, -20);
        assert_eq!(user.consecutive_days, 3);
        assert_eq!(user.last_submit_time, NOW + 2 * MS_IN_DAY);
    }

    #[test]
    fn rejected_submission_changes_nothing() {
        let mut user = UserState::default();
        let mut capability = PlainCapability::default();

        submit(&mut user, &mut capability, 70, NOW).unwrap();
        let before = user.clone();
        let grants = capability.grant_calls.len();

        assert_eq!(
            submit(&mut user, &mut capability, 80, NOW + MS_IN_HOUR),
            Err(LedgerError::CadenceViolation)
        );

        let submission = Submission {
            score: capability.store(80),
            proof: b"forged".to_vec(),
            mileage_level: MileageLevel(2),
        };
        assert_eq!(
            user.submit(&alice(), submission, NOW + MS_IN_DAY, &config(), &mut capability),
            Err(LedgerError::InvalidProof)
        );

        assert_eq!(user, before);
        assert_eq!(capability.grant_calls.len(), grants);
    }

    #[test]
    fn grants_only_owner() {
        let mut user = UserState::default();
        let mut capability = PlainCapability::default();

        submit(&mut user, &mut capability, 70, NOW).unwrap();
        submit(&mut user, &mut capability, 75, NOW + MS_IN_DAY).unwrap();

        assert!(capability.grant_calls.iter().all(|(_, account)| account == &alice()));
        for handle in [user.current_score, user.running_total, user.trend] {
            assert!(capability.is_allowed(handle.unwrap(), &alice()));
        }
    }
}
