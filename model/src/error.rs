use std::fmt::{Display, Formatter};

/// Typed rejection reasons of the ledger.
///
/// Every variant is a precondition failure: the call is rejected as a whole and the ledger state stays
/// as it was before the call. The message of each variant is what a failed contract call reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LedgerError {
    /// Retry after the cadence window elapses.
    CadenceViolation,
    /// The encrypted input is malformed or was not produced for this contract and caller.
    InvalidProof,
    Unauthorized,
    NotInTestMode,
    IndexOutOfRange,
    NoRecords,
    NoTrend,
}

impl LedgerError {
    pub fn message(&self) -> &'static str {
        match self {
            LedgerError::CadenceViolation => "Only one submission per day",
            LedgerError::InvalidProof => "Invalid input proof",
            LedgerError::Unauthorized => "Can be performed only by admin",
            LedgerError::NotInTestMode => "Test mode is not enabled",
            LedgerError::IndexOutOfRange => "Record index out of range",
            LedgerError::NoRecords => "No records found",
            LedgerError::NoTrend => "Trend requires at least two submissions",
        }
    }
}

impl AsRef<str> for LedgerError {
    fn as_ref(&self) -> &str {
        self.message()
    }
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LedgerError {}
