pub mod api;
mod confidential;
pub mod data;
mod error;
mod handle;
pub mod signer;

pub use confidential::*;
pub use error::*;
pub use handle::*;

/// Milliseconds since the Unix epoch (January 1, 1970 (midnight UTC/GMT))
pub type Timestamp = u64;

/// Duration in milliseconds
pub type Duration = u64;

pub const MS_IN_SECOND: u64 = 1000;
pub const MS_IN_MINUTE: u64 = MS_IN_SECOND * 60;
pub const MS_IN_HOUR: u64 = MS_IN_MINUTE * 60;
pub const MS_IN_DAY: u64 = MS_IN_HOUR * 24;

/// Minimal spacing between two accepted submissions of the same user.
pub const CADENCE_WINDOW: Duration = MS_IN_DAY;

/// Latest submission time after the previous one that still continues a streak.
/// The extra hour absorbs clock drift of daily submissions.
pub const STREAK_GRACE_WINDOW: Duration = MS_IN_DAY + MS_IN_HOUR;
