//! Immutable records produced while clocking.
//!
//! A [`TimeLog`] is written for every discrete clock event except resuming a
//! pause, and a [`ShiftLog`] is written once when a shift is closed. Neither is
//! edited after it has been appended; the only way to change history is to
//! delete records from the admin panel.

use crate::libs::user::{Locale, Worker};
use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Serializes a `TimeDelta` as a whole number of milliseconds.
pub mod duration_ms {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_milliseconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        Ok(TimeDelta::milliseconds(ms))
    }
}

/// Kind of a clock event as it is audited. Resuming has no kind of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLogType {
    Entrada,
    Pausa,
    Salida,
}

impl fmt::Display for TimeLogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLogType::Entrada => f.write_str("entrada"),
            TimeLogType::Pausa => f.write_str("pausa"),
            TimeLogType::Salida => f.write_str("salida"),
        }
    }
}

/// A single clock event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLog {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub locale: Locale,
    #[serde(rename = "type")]
    pub kind: TimeLogType,
    pub timestamp: DateTime<Utc>,
}

impl TimeLog {
    pub fn new(worker: &Worker, kind: TimeLogType, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: worker.user_id.clone(),
            username: worker.username.clone(),
            locale: worker.locale,
            kind,
            timestamp,
        }
    }

    /// Calendar day of the event in the local time zone.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&Local).date_naive()
    }
}

/// A completed shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftLog {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub locale: Locale,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(with = "duration_ms")]
    pub total_pause_time: TimeDelta,
    /// `end_time - start_time - total_pause_time`. Negative under clock skew.
    #[serde(with = "duration_ms")]
    pub total_work_time: TimeDelta,
}

impl ShiftLog {
    pub fn new(worker: &Worker, start_time: DateTime<Utc>, end_time: DateTime<Utc>, total_pause_time: TimeDelta) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: worker.user_id.clone(),
            username: worker.username.clone(),
            locale: worker.locale,
            start_time,
            end_time,
            total_pause_time,
            total_work_time: end_time - start_time - total_pause_time,
        }
    }
}

/// Sum of worked time over a set of shifts.
pub fn total_work_time<'a>(shifts: impl IntoIterator<Item = &'a ShiftLog>) -> TimeDelta {
    shifts.into_iter().fold(TimeDelta::zero(), |acc, shift| acc + shift.total_work_time)
}
