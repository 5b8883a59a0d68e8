//! Column decoding helpers shared by the repositories.
//!
//! Ids are stored as UUID text and timestamps as Unix seconds; a value that
//! fails to parse means a corrupted row, surfaced as a decode error rather
//! than a panic.

use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

#[track_caller]
pub fn uuid_column(row: &SqliteRow, column: &str) -> DbErrorResult<Uuid> {
    let raw: String = row.try_get(column)?;
    Uuid::parse_str(&raw).map_err(|e| DbError::Decode {
        message: format!("invalid UUID in {}: {}", column, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub fn opt_uuid_column(row: &SqliteRow, column: &str) -> DbErrorResult<Option<Uuid>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|s| {
        Uuid::parse_str(&s).map_err(|e| DbError::Decode {
            message: format!("invalid UUID in {}: {}", column, e),
            location: ErrorLocation::from(Location::caller()),
        })
    })
    .transpose()
}

#[track_caller]
pub fn timestamp_column(row: &SqliteRow, column: &str) -> DbErrorResult<DateTime<Utc>> {
    let secs: i64 = row.try_get(column)?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| DbError::Decode {
        message: format!("invalid timestamp in {}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub fn opt_timestamp_column(row: &SqliteRow, column: &str) -> DbErrorResult<Option<DateTime<Utc>>> {
    let secs: Option<i64> = row.try_get(column)?;
    secs.map(|s| {
        DateTime::from_timestamp(s, 0).ok_or_else(|| DbError::Decode {
            message: format!("invalid timestamp in {}", column),
            location: ErrorLocation::from(Location::caller()),
        })
    })
    .transpose()
}
