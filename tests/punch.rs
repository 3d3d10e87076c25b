#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use fichaje::api::discord::{Notifier, NotifyError};
    use fichaje::db::kv::{KeyValue, MemoryKv};
    use fichaje::db::storage::{session_key, ShiftStore, Storage, SHIFT_LOGS_KEY};
    use fichaje::libs::clock::ManualClock;
    use fichaje::libs::punch::{PunchService, ShiftError};
    use fichaje::libs::shift::{TimeLog, TimeLogType};
    use fichaje::libs::shift_clock::{ClockAction, ClockError, ClockState, WorkSession};
    use fichaje::libs::user::{initial_users, Locale, Worker};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<TimeLog>>,
    }

    impl Notifier for RecordingNotifier {
        async fn notify_time_event(&self, log: &TimeLog) -> Result<(), NotifyError> {
            self.events.lock().push(log.clone());
            Ok(())
        }
    }

    struct FailingNotifier {
        attempts: Mutex<usize>,
    }

    impl Notifier for FailingNotifier {
        async fn notify_time_event(&self, _log: &TimeLog) -> Result<(), NotifyError> {
            *self.attempts.lock() += 1;
            Err(NotifyError::Status(503))
        }
    }

    /// In-memory documents where writes to one chosen key fail.
    #[derive(Default)]
    struct FlakyKv {
        inner: MemoryKv,
        failing_key: Mutex<Option<String>>,
    }

    impl FlakyKv {
        fn fail_on(&self, key: &str) {
            *self.failing_key.lock() = Some(key.to_string());
        }

        fn recover(&self) {
            *self.failing_key.lock() = None;
        }
    }

    impl KeyValue for FlakyKv {
        fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            if self.failing_key.lock().as_deref() == Some(key) {
                anyhow::bail!("disk full while writing {}", key);
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> anyhow::Result<()> {
            self.inner.remove(key)
        }

        fn keys(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
            self.inner.keys(prefix)
        }
    }

    struct Harness {
        service: PunchService<Storage<MemoryKv>, RecordingNotifier>,
        notifier: Arc<RecordingNotifier>,
        clock: Arc<ManualClock>,
        worker: Worker,
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, h, m, 0).unwrap()
    }

    fn harness() -> Harness {
        let notifier = Arc::new(RecordingNotifier::default());
        let clock = Arc::new(ManualClock::new(at(9, 0)));
        let service = PunchService::new(Storage::new(MemoryKv::new()), notifier.clone(), clock.clone());
        let worker = Worker::new(&initial_users()[2], Locale::Yummy);
        Harness {
            service,
            notifier,
            clock,
            worker,
        }
    }

    impl Harness {
        async fn punch_at(&self, action: ClockAction, now: DateTime<Utc>) {
            self.clock.set(now);
            let mut outcome = self.service.punch(&self.worker, action).await.unwrap();
            if let Some(handle) = outcome.notification.take() {
                handle.await.unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_workday_is_persisted() {
        let h = harness();
        h.punch_at(ClockAction::Entrada, at(9, 0)).await;
        h.punch_at(ClockAction::Pausa, at(9, 30)).await;
        h.punch_at(ClockAction::Continuar, at(9, 45)).await;
        h.punch_at(ClockAction::Salida, at(17, 0)).await;

        let store = h.service.store();
        assert_eq!(store.get_session(&h.worker.user_id).unwrap(), WorkSession::default());

        let shifts = store.shift_logs().unwrap();
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].total_pause_time, TimeDelta::minutes(15));
        assert_eq!(shifts[0].total_work_time, TimeDelta::minutes(465));

        let kinds: Vec<TimeLogType> = store.time_logs().unwrap().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![TimeLogType::Salida, TimeLogType::Pausa, TimeLogType::Entrada]);
    }

    #[tokio::test]
    async fn test_continuar_emits_no_log_and_no_notification() {
        let h = harness();
        h.punch_at(ClockAction::Entrada, at(9, 0)).await;
        h.punch_at(ClockAction::Pausa, at(10, 0)).await;

        h.clock.set(at(10, 10));
        let outcome = h.service.punch(&h.worker, ClockAction::Continuar).await.unwrap();
        assert!(outcome.time_log.is_none());
        assert!(outcome.notification.is_none());
        assert!(outcome.shift.is_none());
        assert_eq!(outcome.session.state(), ClockState::Running);

        assert_eq!(h.service.store().time_logs().unwrap().len(), 2);
        assert_eq!(h.notifier.events.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_every_audited_event_is_notified() {
        let h = harness();
        h.punch_at(ClockAction::Entrada, at(9, 0)).await;
        h.punch_at(ClockAction::Pausa, at(11, 0)).await;
        h.punch_at(ClockAction::Salida, at(12, 0)).await;

        let events = h.notifier.events.lock();
        let kinds: Vec<TimeLogType> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![TimeLogType::Entrada, TimeLogType::Pausa, TimeLogType::Salida]);
        assert!(events.iter().all(|e| e.username == "empleado1" && e.locale == Locale::Yummy));
        assert_eq!(events[1].timestamp, at(11, 0));
    }

    #[tokio::test]
    async fn test_invalid_action_leaves_storage_untouched() {
        let h = harness();
        h.punch_at(ClockAction::Entrada, at(9, 0)).await;
        let stored = h.service.store().get_session(&h.worker.user_id).unwrap();

        h.clock.set(at(9, 5));
        let result = h.service.punch(&h.worker, ClockAction::Entrada).await;
        match result {
            Err(ShiftError::Clock(ClockError::InvalidTransition { state, action })) => {
                assert_eq!(state, ClockState::Running);
                assert_eq!(action, ClockAction::Entrada);
            }
            other => panic!("expected an invalid transition, got {:?}", other),
        }

        assert_eq!(h.service.store().get_session(&h.worker.user_id).unwrap(), stored);
        assert_eq!(h.service.store().time_logs().unwrap().len(), 1);
        assert_eq!(h.notifier.events.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_salida_while_paused_bills_open_pause() {
        let h = harness();
        h.punch_at(ClockAction::Entrada, at(9, 0)).await;
        h.punch_at(ClockAction::Pausa, at(12, 0)).await;

        h.clock.set(at(13, 0));
        let outcome = h.service.punch(&h.worker, ClockAction::Salida).await.unwrap();
        let shift = outcome.shift.unwrap();
        assert_eq!(shift.total_pause_time, TimeDelta::zero());
        assert_eq!(shift.total_work_time, TimeDelta::hours(4));
    }

    #[tokio::test]
    async fn test_status_follows_the_clock() {
        let h = harness();
        assert_eq!(h.service.status(&h.worker.user_id).unwrap().state, ClockState::Idle);

        h.punch_at(ClockAction::Entrada, at(9, 0)).await;
        h.clock.set(at(10, 30));
        let status = h.service.status(&h.worker.user_id).unwrap();
        assert_eq!(status.state, ClockState::Running);
        assert_eq!(status.elapsed, TimeDelta::minutes(90));

        h.punch_at(ClockAction::Pausa, at(11, 0)).await;
        h.clock.set(at(11, 40));
        let status = h.service.status(&h.worker.user_id).unwrap();
        assert_eq!(status.state, ClockState::Paused);
        assert_eq!(status.elapsed, TimeDelta::hours(2));
    }

    #[tokio::test]
    async fn test_today_events_only_lists_today_for_the_user() {
        let h = harness();
        let other = Worker::new(&initial_users()[3], Locale::Uwu);

        h.punch_at(ClockAction::Entrada, at(12, 0) - TimeDelta::days(1)).await;
        h.punch_at(ClockAction::Salida, at(12, 30) - TimeDelta::days(1)).await;
        h.punch_at(ClockAction::Entrada, at(12, 0)).await;
        h.punch_at(ClockAction::Pausa, at(12, 15)).await;
        h.service.punch(&other, ClockAction::Entrada).await.unwrap();

        h.clock.set(at(12, 20));
        let events = h.service.today_events(&h.worker.user_id).unwrap();
        let kinds: Vec<TimeLogType> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![TimeLogType::Pausa, TimeLogType::Entrada]);
        assert!(events.iter().all(|e| e.user_id == h.worker.user_id));
    }

    #[tokio::test]
    async fn test_history_sums_worked_time() {
        let h = harness();
        h.punch_at(ClockAction::Entrada, at(8, 0)).await;
        h.punch_at(ClockAction::Salida, at(10, 0)).await;
        h.punch_at(ClockAction::Entrada, at(11, 0)).await;
        h.punch_at(ClockAction::Pausa, at(12, 0)).await;
        h.punch_at(ClockAction::Continuar, at(12, 30)).await;
        h.punch_at(ClockAction::Salida, at(15, 0)).await;

        let history = h.service.history(&h.worker.user_id).unwrap();
        assert_eq!(history.shifts.len(), 2);
        assert_eq!(history.shifts[0].start_time, at(11, 0));
        assert_eq!(history.total_work_time, TimeDelta::hours(2) + TimeDelta::minutes(210));

        assert!(h.service.history("3").unwrap().shifts.is_empty());
    }

    fn flaky_service() -> (PunchService<Storage<FlakyKv>, RecordingNotifier>, Arc<RecordingNotifier>, Arc<ManualClock>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let clock = Arc::new(ManualClock::new(at(9, 0)));
        let service = PunchService::new(Storage::new(FlakyKv::default()), notifier.clone(), clock.clone());
        (service, notifier, clock)
    }

    #[tokio::test]
    async fn test_failed_shift_write_keeps_the_session_open() {
        let (service, notifier, clock) = flaky_service();
        let worker = Worker::new(&initial_users()[2], Locale::Yummy);
        let mut entrada = service.punch(&worker, ClockAction::Entrada).await.unwrap();
        entrada.settle(std::time::Duration::from_secs(5)).await;

        clock.set(at(17, 0));
        service.store().kv().fail_on(SHIFT_LOGS_KEY);
        let result = service.punch(&worker, ClockAction::Salida).await;
        assert!(matches!(result, Err(ShiftError::Persistence(_))));

        let store = service.store();
        let session = store.get_session(&worker.user_id).unwrap();
        assert_eq!(session.state(), ClockState::Running);
        assert_eq!(session.start_time, Some(at(9, 0)));
        assert!(store.shift_logs().unwrap().is_empty());
        assert_eq!(store.time_logs().unwrap().len(), 1);

        store.kv().recover();
        let mut outcome = service.punch(&worker, ClockAction::Salida).await.unwrap();
        outcome.settle(std::time::Duration::from_secs(5)).await;

        let shifts = store.shift_logs().unwrap();
        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].total_work_time, TimeDelta::hours(8));
        assert_eq!(store.get_session(&worker.user_id).unwrap(), WorkSession::default());
        assert_eq!(notifier.events.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_store_error_is_reported_as_persistence() {
        let (service, notifier, _clock) = flaky_service();
        let worker = Worker::new(&initial_users()[2], Locale::Yummy);
        assert_eq!(service.status(&worker.user_id).unwrap().state, ClockState::Idle);

        service.store().kv().fail_on(&session_key(&worker.user_id));
        let err = service.punch(&worker, ClockAction::Entrada).await.unwrap_err();
        assert!(matches!(err, ShiftError::Persistence(_)));
        assert!(err.to_string().starts_with("failed to save the shift"));

        let store = service.store();
        assert_eq!(store.get_session(&worker.user_id).unwrap(), WorkSession::default());
        assert!(store.time_logs().unwrap().is_empty());
        assert!(notifier.events.lock().is_empty());
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_undo_the_punch() {
        let notifier = Arc::new(FailingNotifier { attempts: Mutex::new(0) });
        let clock = Arc::new(ManualClock::new(at(9, 0)));
        let service = PunchService::new(Storage::new(MemoryKv::new()), notifier.clone(), clock.clone());
        let worker = Worker::new(&initial_users()[3], Locale::Uwu);

        let mut outcome = service.punch(&worker, ClockAction::Entrada).await.unwrap();
        let handle = outcome.notification.take().unwrap();
        assert!(handle.await.is_ok());
        assert_eq!(*notifier.attempts.lock(), 1);

        let store = service.store();
        assert_eq!(store.get_session(&worker.user_id).unwrap().state(), ClockState::Running);
        assert_eq!(store.time_logs().unwrap()[0].kind, TimeLogType::Entrada);

        clock.set(at(13, 0));
        let outcome = service.punch(&worker, ClockAction::Salida).await.unwrap();
        assert_eq!(outcome.shift.unwrap().total_work_time, TimeDelta::hours(4));
        assert_eq!(store.shift_logs().unwrap().len(), 1);
    }
}
