use std::fmt::{Display, Formatter};

use base64::{engine::general_purpose::STANDARD, Engine};
use near_sdk::{
    near,
    serde::{self, Deserialize, Deserializer, Serialize, Serializer},
};

pub const HANDLE_LENGTH: usize = 32;

/// Opaque reference to an encrypted unsigned 32-bit integer.
///
/// The ciphertext itself lives with the confidential coprocessor. Contract logic only moves handles
/// around and combines them through [`crate::ConfidentialCapability`]; it never looks inside.
/// In JSON a handle is a base64 string.
#[near(serializers=[borsh])]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle([u8; HANDLE_LENGTH]);

impl Handle {
    pub const fn new(bytes: [u8; HANDLE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HANDLE_LENGTH] {
        &self.0
    }
}

impl From<[u8; HANDLE_LENGTH]> for Handle {
    fn from(value: [u8; HANDLE_LENGTH]) -> Self {
        Self(value)
    }
}

impl Display for Handle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", STANDARD.encode(self.0))
    }
}

impl Serialize for Handle {
    fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Handle {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let bytes = STANDARD
            .decode(s)
            .map_err(|err| serde::de::Error::custom(err.to_string()))?;
        let bytes: [u8; HANDLE_LENGTH] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom(format!("Handle must be {HANDLE_LENGTH} bytes")))?;

        Ok(Self(bytes))
    }
}
