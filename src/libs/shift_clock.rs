//! Work-session state machine and its duration arithmetic.
//!
//! Every user owns one [`WorkSession`]. It moves between three states:
//!
//! ```text
//!            entrada              pausa
//!   Idle ───────────────▶ Running ─────────▶ Paused
//!    ▲                     │  ▲                │
//!    │        salida       │  └── continuar ───┘
//!    └─────────────────────┴───────────────────┘ salida
//! ```
//!
//! ## Timestamps, not counters
//!
//! Every duration is derived from the absolute timestamps stored in the
//! session (`start_time`, `last_pause_time`) and the accumulated
//! `total_pause_time`. Nothing is incremented per tick, so a session loaded
//! after a restart, or read after the machine slept, yields the same elapsed
//! time as one that was watched continuously.
//!
//! ## Transitions
//!
//! Transitions are pure: they take the current time explicitly and return a
//! new session, leaving the receiver untouched. An event that is not valid for
//! the current state fails with [`ClockError::InvalidTransition`].
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use fichaje::libs::shift_clock::WorkSession;
//! use fichaje::libs::user::{Locale, Worker};
//!
//! let worker = Worker { user_id: "2".into(), username: "empleado1".into(), locale: Locale::Yummy };
//! let t = |h, m| Utc.with_ymd_and_hms(2025, 3, 3, h, m, 0).unwrap();
//!
//! let session = WorkSession::default().clock_in(t(9, 0))?;
//! let session = session.pause(t(9, 30))?;
//! let session = session.resume(t(9, 45))?;
//! let (session, shift) = session.clock_out(t(17, 0), &worker)?;
//!
//! assert!(!session.is_active);
//! assert_eq!(shift.total_work_time.num_minutes(), 7 * 60 + 45);
//! # Ok::<(), fichaje::libs::shift_clock::ClockError>(())
//! ```

use crate::libs::shift::{duration_ms, ShiftLog, TimeLogType};
use crate::libs::user::Worker;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
    Paused,
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockState::Idle => f.write_str("idle"),
            ClockState::Running => f.write_str("running"),
            ClockState::Paused => f.write_str("paused"),
        }
    }
}

/// The four clock events a worker can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockAction {
    Entrada,
    Pausa,
    Continuar,
    Salida,
}

impl ClockAction {
    /// The audited event kind. `Continuar` is never audited.
    pub fn log_type(&self) -> Option<TimeLogType> {
        match self {
            ClockAction::Entrada => Some(TimeLogType::Entrada),
            ClockAction::Pausa => Some(TimeLogType::Pausa),
            ClockAction::Continuar => None,
            ClockAction::Salida => Some(TimeLogType::Salida),
        }
    }
}

impl fmt::Display for ClockAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockAction::Entrada => f.write_str("entrada"),
            ClockAction::Pausa => f.write_str("pausa"),
            ClockAction::Continuar => f.write_str("continuar"),
            ClockAction::Salida => f.write_str("salida"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("cannot {action} while the shift is {state}")]
    InvalidTransition { state: ClockState, action: ClockAction },
}

/// Per-user clock state, persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSession {
    pub is_active: bool,
    /// Only meaningful while `is_active`.
    pub is_on_pause: bool,
    pub start_time: Option<DateTime<Utc>>,
    pub last_pause_time: Option<DateTime<Utc>>,
    /// Pause time already closed by `continuar` during the current shift.
    #[serde(with = "duration_ms")]
    pub total_pause_time: TimeDelta,
}

impl Default for WorkSession {
    fn default() -> Self {
        Self {
            is_active: false,
            is_on_pause: false,
            start_time: None,
            last_pause_time: None,
            total_pause_time: TimeDelta::zero(),
        }
    }
}

/// Result of [`WorkSession::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: WorkSession,
    /// Present only when the action closed a shift.
    pub shift: Option<ShiftLog>,
}

impl WorkSession {
    /// Current state. A record without a start time cannot be running and
    /// counts as idle.
    pub fn state(&self) -> ClockState {
        match (self.is_active, self.start_time, self.is_on_pause) {
            (true, Some(_), false) => ClockState::Running,
            (true, Some(_), true) => ClockState::Paused,
            _ => ClockState::Idle,
        }
    }

    fn reject(&self, action: ClockAction) -> ClockError {
        ClockError::InvalidTransition {
            state: self.state(),
            action,
        }
    }

    /// Idle → Running.
    pub fn clock_in(&self, now: DateTime<Utc>) -> Result<WorkSession, ClockError> {
        if self.state() != ClockState::Idle {
            return Err(self.reject(ClockAction::Entrada));
        }
        Ok(WorkSession {
            is_active: true,
            is_on_pause: false,
            start_time: Some(now),
            last_pause_time: None,
            total_pause_time: TimeDelta::zero(),
        })
    }

    /// Running → Paused.
    pub fn pause(&self, now: DateTime<Utc>) -> Result<WorkSession, ClockError> {
        if self.state() != ClockState::Running {
            return Err(self.reject(ClockAction::Pausa));
        }
        Ok(WorkSession {
            is_on_pause: true,
            last_pause_time: Some(now),
            ..self.clone()
        })
    }

    /// Paused → Running, folding the finished pause into `total_pause_time`.
    pub fn resume(&self, now: DateTime<Utc>) -> Result<WorkSession, ClockError> {
        if self.state() != ClockState::Paused {
            return Err(self.reject(ClockAction::Continuar));
        }
        let pause = self.last_pause_time.map_or_else(TimeDelta::zero, |started| now - started);
        Ok(WorkSession {
            is_on_pause: false,
            last_pause_time: None,
            total_pause_time: self.total_pause_time + pause,
            ..self.clone()
        })
    }

    /// Running or Paused → Idle, producing the finished [`ShiftLog`].
    ///
    /// A pause still open at this point is not added to `total_pause_time`,
    /// so it is counted as worked time. A `now` earlier than the start yields
    /// a negative `total_work_time`, which is kept as is.
    pub fn clock_out(&self, now: DateTime<Utc>, worker: &Worker) -> Result<(WorkSession, ShiftLog), ClockError> {
        let start_time = match (self.state(), self.start_time) {
            (ClockState::Running | ClockState::Paused, Some(start_time)) => start_time,
            _ => return Err(self.reject(ClockAction::Salida)),
        };
        let shift = ShiftLog::new(worker, start_time, now, self.total_pause_time);
        Ok((WorkSession::default(), shift))
    }

    /// Dispatches a clock action to the matching transition.
    pub fn apply(&self, action: ClockAction, now: DateTime<Utc>, worker: &Worker) -> Result<Transition, ClockError> {
        let transition = match action {
            ClockAction::Entrada => Transition {
                session: self.clock_in(now)?,
                shift: None,
            },
            ClockAction::Pausa => Transition {
                session: self.pause(now)?,
                shift: None,
            },
            ClockAction::Continuar => Transition {
                session: self.resume(now)?,
                shift: None,
            },
            ClockAction::Salida => {
                let (session, shift) = self.clock_out(now, worker)?;
                Transition {
                    session,
                    shift: Some(shift),
                }
            }
        };
        Ok(transition)
    }

    /// Worked time of the open shift as seen at `now`.
    ///
    /// Advances only while running. While paused it stays frozen at the value
    /// it had when the pause began; while idle it is zero. Calling it twice
    /// with the same `now` always gives the same answer.
    pub fn elapsed_now(&self, now: DateTime<Utc>) -> TimeDelta {
        match (self.state(), self.start_time) {
            (ClockState::Running, Some(start)) => now - start - self.total_pause_time,
            (ClockState::Paused, Some(start)) => self.last_pause_time.unwrap_or(now) - start - self.total_pause_time,
            _ => TimeDelta::zero(),
        }
    }
}
