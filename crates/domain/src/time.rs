//! Time and timestamp helpers.
//!
//! The Thing-IF wire format carries instants as milliseconds since the Unix
//! epoch; fields use `chrono::serde::ts_milliseconds{,_option}` for that.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::ArgumentError;

/// UTC timestamp used for `createdAt`, `modifiedAt`, `scheduleAt`, etc.
pub type Timestamp = DateTime<Utc>;

/// Convert epoch milliseconds into a [`Timestamp`].
///
/// # Errors
///
/// Returns [`ArgumentError::Invalid`] when `millis` is out of range.
pub fn from_millis(millis: i64) -> Result<Timestamp, ArgumentError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| ArgumentError::Invalid {
            field: "timestamp",
            reason: format!("{millis} is out of range"),
        })
}
