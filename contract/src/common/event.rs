use near_sdk::{json_types::Base64VecU8, log, near, serde::Serialize, serde_json, AccountId};
use road_safety_model::{data::mileage::MileageLevel, Derivation, Handle, Timestamp};

#[cfg(test)]
use super::env::test_env_ext;
use crate::{PACKAGE_NAME, VERSION};

#[derive(Debug, Clone, PartialEq)]
#[near(serializers=[json])]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum EventKind {
    SubmitScore(SubmitScoreData),
    SetTestMode(bool),
    ResetSubmitTime(AccountId),
    SetVerifierKey(Base64VecU8),
    Computation(ComputationData),
    Allow(AllowData),
}

#[derive(Serialize, Debug)]
#[serde(crate = "near_sdk::serde")]
struct RoadSafetyEvent {
    standard: &'static str,
    version: &'static str,
    #[serde(flatten)]
    event_kind: EventKind,
}

/// Accepted submission.
/// `account_id`       – the submitting account.
/// `index`            – position of the new record in the account history.
/// `timestamp`        – block time of the submission.
/// `mileage_level`    – raw mileage level as submitted.
/// `consecutive_days` – the streak after the submission.
#[derive(Debug, Clone, PartialEq)]
#[near(serializers=[json])]
pub struct SubmitScoreData {
    pub account_id: AccountId,
    pub index: u32,
    pub timestamp: Timestamp,
    pub mileage_level: MileageLevel,
    pub consecutive_days: u32,
}

/// A new handle the off-chain coprocessor has to compute.
#[derive(Debug, Clone, PartialEq)]
#[near(serializers=[json])]
pub struct ComputationData {
    pub result: Handle,
    pub derivation: Derivation,
}

/// `account_id` may request decryption of `handle` from now on.
#[derive(Debug, Clone, PartialEq)]
#[near(serializers=[json])]
pub struct AllowData {
    pub handle: Handle,
    pub account_id: AccountId,
}

impl From<EventKind> for RoadSafetyEvent {
    fn from(event_kind: EventKind) -> Self {
        Self {
            standard: PACKAGE_NAME,
            version: VERSION,
            event_kind,
        }
    }
}

#[mutants::skip]
#[cfg(not(test))]
pub(crate) fn emit(event: EventKind) {
    log!("{}", RoadSafetyEvent::from(event).to_json_event_string());
}

#[mutants::skip]
#[cfg(test)]
pub(crate) fn emit(event: EventKind) {
    test_env_ext::store_event(&event);

    if test_env_ext::should_log_events() {
        log!("{}", RoadSafetyEvent::from(event).to_json_event_string());
    }
}

impl RoadSafetyEvent {
    fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|err| near_sdk::env::panic_str(&format!("Failed to serialize RoadSafetyEvent: {err}")))
    }

    fn to_json_event_string(&self) -> String {
        format!("EVENT_JSON:{}", self.to_json_string())
    }
}
