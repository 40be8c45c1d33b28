use near_sdk::near;

use crate::{data::mileage::MileageLevel, Handle, Timestamp};

/// A single accepted submission. Never changes after it is appended.
#[near(serializers=[borsh])]
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub timestamp: Timestamp,
    pub mileage_level: MileageLevel,
    pub score: Handle,
}

impl Record {
    pub fn new(timestamp: Timestamp, mileage_level: MileageLevel, score: Handle) -> Self {
        Self {
            timestamp,
            mileage_level,
            score,
        }
    }
}

#[near(serializers=[json])]
#[derive(Clone, Debug, PartialEq)]
pub struct RecordView {
    pub index: u32,
    pub timestamp: Timestamp,
    pub mileage_level: MileageLevel,
    pub score: Handle,
}

impl RecordView {
    pub fn new(index: u32, record: &Record) -> Self {
        Self {
            index,
            timestamp: record.timestamp,
            mileage_level: record.mileage_level,
            score: record.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use near_sdk::serde_json;

    use crate::{
        data::{
            mileage::MileageLevel,
            record::{Record, RecordView},
        },
        Handle,
    };

    #[test]
    fn record_view_json() {
        let record = Record::new(1_722_234_632_000, MileageLevel(2), Handle::new([7; 32]));
        let view = RecordView::new(4, &record);

        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({
                "index": 4,
                "timestamp": 1_722_234_632_000_u64,
                "mileage_level": 2,
                "score": "BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwc="
            })
        );
    }
}
