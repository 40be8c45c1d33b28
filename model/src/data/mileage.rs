use near_sdk::near;

/// Distance category reported together with a score.
///
/// The raw value is stored as submitted. Values outside the known range are kept and read as [`MileageKind::Unknown`].
#[near(serializers=[borsh, json])]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct MileageLevel(pub u8);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MileageKind {
    Unknown,
    /// 0-20 km
    Short,
    /// 20-50 km
    Medium,
    Long,
}

impl MileageLevel {
    pub fn kind(&self) -> MileageKind {
        match self.0 {
            1 => MileageKind::Short,
            2 => MileageKind::Medium,
            3 => MileageKind::Long,
            _ => MileageKind::Unknown,
        }
    }
}

impl From<u8> for MileageLevel {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl MileageKind {
    pub fn name(&self) -> &'static str {
        match self {
            MileageKind::Unknown => "Unknown",
            MileageKind::Short => "Short",
            MileageKind::Medium => "Medium",
            MileageKind::Long => "Long",
        }
    }
}
