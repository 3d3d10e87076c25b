//! Live shift clock.
//!
//! Re-reads the stored session on every tick and reports the worked time
//! derived from it, so the displayed value never drifts from the timestamps.
//! The loop ends when the token is cancelled or when the session stops
//! running (paused from another terminal, or clocked out).

use crate::db::storage::ShiftStore;
use crate::libs::clock::Clock;
use crate::libs::shift_clock::ClockState;
use anyhow::Result;
use chrono::TimeDelta;
use std::sync::Arc;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Why the ticker returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerExit {
    Cancelled,
    /// The session left the running state.
    Stopped(ClockState),
}

/// Calls `on_tick` with the worked time every `interval` while the user's
/// session is running.
///
/// The first tick fires immediately. Storage errors end the loop and are
/// returned.
pub async fn run_ticker<S, F>(
    store: &S,
    user_id: &str,
    clock: Arc<dyn Clock>,
    interval: Duration,
    cancel_token: CancellationToken,
    mut on_tick: F,
) -> Result<TickerExit>
where
    S: ShiftStore,
    F: FnMut(TimeDelta),
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let session = store.get_session(user_id)?;
                let state = session.state();
                if state != ClockState::Running {
                    return Ok(TickerExit::Stopped(state));
                }
                on_tick(session.elapsed_now(clock.now()));
            }
            _ = cancel_token.cancelled() => {
                return Ok(TickerExit::Cancelled);
            }
        }
    }
}
