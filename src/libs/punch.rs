//! Clock punches against persistent storage.
//!
//! [`PunchService`] is the caller side of the shift clock: it loads the
//! worker's session, applies the requested action at the injected clock's
//! current time, saves the outcome and announces every audited event.
//!
//! Writes happen in a fixed order: shift record (salida only), session, clock
//! event (all actions except continuar). The shift record goes first so a
//! failed salida leaves the session open instead of losing the finished shift.
//! A failing write is reported as [`ShiftError::Persistence`]; nothing already
//! written is rolled back.
//!
//! ```rust
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use fichaje::api::NoopNotifier;
//! use fichaje::db::kv::MemoryKv;
//! use fichaje::db::storage::Storage;
//! use fichaje::libs::clock::ManualClock;
//! use fichaje::libs::punch::PunchService;
//! use fichaje::libs::shift_clock::ClockAction;
//! use fichaje::libs::user::{initial_users, Locale, Worker};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap()));
//! let service = PunchService::new(Storage::new(MemoryKv::new()), Arc::new(NoopNotifier), clock.clone());
//! let worker = Worker::new(&initial_users()[2], Locale::Yummy);
//!
//! service.punch(&worker, ClockAction::Entrada).await?;
//! clock.advance(TimeDelta::hours(8));
//! let outcome = service.punch(&worker, ClockAction::Salida).await?;
//! assert_eq!(outcome.shift.unwrap().total_work_time, TimeDelta::hours(8));
//! # Ok(())
//! # }
//! ```

use crate::api::discord::{notify_detached, Notifier};
use crate::db::storage::ShiftStore;
use crate::libs::clock::Clock;
use crate::libs::shift::{total_work_time, ShiftLog, TimeLog};
use crate::libs::shift_clock::{ClockAction, ClockError, ClockState, WorkSession};
use crate::libs::user::Worker;
use crate::msg_debug;
use anyhow::Result;
use chrono::{DateTime, Local, TimeDelta, Utc};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Why a punch was refused or not fully saved.
#[derive(Debug, Error)]
pub enum ShiftError {
    /// The action does not apply to the current state. Nothing was written.
    #[error(transparent)]
    Clock(#[from] ClockError),
    /// A store read or write failed.
    #[error("failed to save the shift: {0:#}")]
    Persistence(anyhow::Error),
}

/// What a successful punch produced.
#[derive(Debug)]
pub struct PunchOutcome {
    pub action: ClockAction,
    pub at: DateTime<Utc>,
    pub session: WorkSession,
    /// Present for every action except `Continuar`.
    pub time_log: Option<TimeLog>,
    /// Present after `Salida`.
    pub shift: Option<ShiftLog>,
    /// Detached delivery of `time_log`. Awaiting it is optional.
    pub notification: Option<JoinHandle<()>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PunchStatus {
    pub session: WorkSession,
    pub state: ClockState,
    pub elapsed: TimeDelta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftHistory {
    /// Newest first.
    pub shifts: Vec<ShiftLog>,
    pub total_work_time: TimeDelta,
}

pub struct PunchService<S: ShiftStore, N: Notifier> {
    store: S,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<S: ShiftStore, N: Notifier + 'static> PunchService<S, N> {
    pub fn new(store: S, notifier: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self { store, notifier, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Applies `action` to the worker's session.
    ///
    /// An action that is not valid in the current state fails with
    /// [`ShiftError::Clock`] and leaves storage untouched.
    pub async fn punch(&self, worker: &Worker, action: ClockAction) -> Result<PunchOutcome, ShiftError> {
        let now = self.clock.now();
        let session = self.store.get_session(&worker.user_id).map_err(ShiftError::Persistence)?;
        let transition = session.apply(action, now, worker)?;

        if let Some(shift) = &transition.shift {
            self.store.add_shift_log(shift).map_err(ShiftError::Persistence)?;
        }
        self.store
            .save_session(&worker.user_id, &transition.session)
            .map_err(ShiftError::Persistence)?;
        let time_log = action.log_type().map(|kind| TimeLog::new(worker, kind, now));
        if let Some(log) = &time_log {
            self.store.add_time_log(log).map_err(ShiftError::Persistence)?;
        }

        msg_debug!(format!("{} {} at {}", worker.username, action, now));

        let notification = time_log.clone().map(|log| notify_detached(self.notifier.clone(), log));

        Ok(PunchOutcome {
            action,
            at: now,
            session: transition.session,
            time_log,
            shift: transition.shift,
            notification,
        })
    }

    pub fn status(&self, user_id: &str) -> Result<PunchStatus> {
        let session = self.store.get_session(user_id)?;
        let now = self.clock.now();
        Ok(PunchStatus {
            state: session.state(),
            elapsed: session.elapsed_now(now),
            session,
        })
    }

    /// The user's clock events on the current local day, newest first.
    pub fn today_events(&self, user_id: &str) -> Result<Vec<TimeLog>> {
        let today = self.clock.now().with_timezone(&Local).date_naive();
        let mut events: Vec<TimeLog> = self
            .store
            .time_logs()?
            .into_iter()
            .filter(|log| log.user_id == user_id && log.local_date() == today)
            .collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(events)
    }

    pub fn history(&self, user_id: &str) -> Result<ShiftHistory> {
        let shifts: Vec<ShiftLog> = self
            .store
            .shift_logs()?
            .into_iter()
            .filter(|shift| shift.user_id == user_id)
            .collect();
        Ok(ShiftHistory {
            total_work_time: total_work_time(&shifts),
            shifts,
        })
    }
}

impl PunchOutcome {
    /// Gives the notification up to `grace` to finish. Never fails.
    pub async fn settle(&mut self, grace: std::time::Duration) {
        if let Some(handle) = self.notification.take() {
            let _ = tokio::time::timeout(grace, handle).await;
        }
    }
}
