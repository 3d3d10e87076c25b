#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use fichaje::db::kv::MemoryKv;
    use fichaje::db::storage::{ShiftStore, Storage};
    use fichaje::libs::clock::{Clock, ManualClock};
    use fichaje::libs::shift_clock::{ClockState, WorkSession};
    use fichaje::libs::ticker::{run_ticker, TickerExit};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    const TICK: Duration = Duration::from_millis(5);

    fn running_store() -> (Storage<MemoryKv>, Arc<ManualClock>) {
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        let store = Storage::new(MemoryKv::new());
        let session = WorkSession::default().clock_in(start).unwrap();
        store.save_session("2", &session).unwrap();
        (store, Arc::new(ManualClock::new(start)))
    }

    #[tokio::test]
    async fn test_idle_session_stops_immediately() {
        let store = Storage::new(MemoryKv::new());
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(Utc::now()));
        let mut ticks = 0;

        let exit = run_ticker(&store, "2", clock, TICK, CancellationToken::new(), |_| ticks += 1)
            .await
            .unwrap();

        assert_eq!(exit, TickerExit::Stopped(ClockState::Idle));
        assert_eq!(ticks, 0);
    }

    #[tokio::test]
    async fn test_ticks_report_elapsed_until_cancelled() {
        let (store, clock) = running_store();
        let token = CancellationToken::new();
        let stop = token.clone();
        let ticking_clock = clock.clone();
        let mut seen = Vec::new();

        let exit = run_ticker(&store, "2", clock.clone(), TICK, token, |elapsed| {
            seen.push(elapsed);
            ticking_clock.advance(TimeDelta::seconds(1));
            if seen.len() == 3 {
                stop.cancel();
            }
        })
        .await
        .unwrap();

        assert_eq!(exit, TickerExit::Cancelled);
        assert_eq!(seen, vec![TimeDelta::zero(), TimeDelta::seconds(1), TimeDelta::seconds(2)]);
    }

    #[tokio::test]
    async fn test_pause_stops_the_ticker() {
        let (store, clock) = running_store();
        let writer = store.clone();
        let pause_at = clock.now() + TimeDelta::minutes(10);
        let mut ticks = 0;

        let exit = run_ticker(&store, "2", clock, TICK, CancellationToken::new(), |_| {
            ticks += 1;
            let session = writer.get_session("2").unwrap().pause(pause_at).unwrap();
            writer.save_session("2", &session).unwrap();
        })
        .await
        .unwrap();

        assert_eq!(exit, TickerExit::Stopped(ClockState::Paused));
        assert_eq!(ticks, 1);
    }
}
