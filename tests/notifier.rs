#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use fichaje::api::discord::{notify_detached, time_log_content, DiscordNotifier, NoopNotifier, Notifier, NotifyError};
    use fichaje::libs::config::{Config, ShopWebhooks, WebhooksConfig};
    use fichaje::libs::shift::{TimeLog, TimeLogType};
    use fichaje::libs::user::{Locale, Worker};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn log(kind: TimeLogType, locale: Locale) -> TimeLog {
        let worker = Worker {
            user_id: "2".to_string(),
            username: "empleado1".to_string(),
            locale,
        };
        TimeLog::new(&worker, kind, Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap())
    }

    struct FailingNotifier {
        attempts: Mutex<usize>,
    }

    impl Notifier for FailingNotifier {
        async fn notify_time_event(&self, _log: &TimeLog) -> Result<(), NotifyError> {
            *self.attempts.lock() += 1;
            Err(NotifyError::Status(500))
        }
    }

    #[tokio::test]
    async fn test_noop_notifier_accepts_everything() {
        assert!(NoopNotifier.notify_time_event(&log(TimeLogType::Entrada, Locale::Yummy)).await.is_ok());
    }

    #[tokio::test]
    async fn test_discord_without_webhook_is_not_configured() {
        let config = Config {
            webhooks: Some(WebhooksConfig {
                yummy: ShopWebhooks {
                    time_log: "YOUR_DISCORD_WEBHOOK_URL".to_string(),
                },
                uwu: ShopWebhooks::default(),
            }),
            clock: None,
        };
        let notifier = DiscordNotifier::with_urls(config.time_log_webhook_with(Locale::Yummy, |_| None), None);
        assert!(!notifier.is_configured());

        let result = notifier.notify_time_event(&log(TimeLogType::Pausa, Locale::Yummy)).await;
        assert!(matches!(result, Err(NotifyError::NotConfigured(Locale::Yummy))));
    }

    #[tokio::test]
    async fn test_detached_failure_is_swallowed() {
        let notifier = Arc::new(FailingNotifier { attempts: Mutex::new(0) });
        let handle = notify_detached(notifier.clone(), log(TimeLogType::Salida, Locale::Uwu));

        assert!(handle.await.is_ok());
        assert_eq!(*notifier.attempts.lock(), 1);
    }

    #[test]
    fn test_message_content() {
        let content = time_log_content(&log(TimeLogType::Entrada, Locale::Yummy));
        assert!(content.starts_with("🟢 **empleado1** ENTRADA"));
        assert!(content.contains("Yummy Ice Cream"));

        assert!(time_log_content(&log(TimeLogType::Pausa, Locale::Uwu)).contains("PAUSA · UwU Café"));
        assert!(time_log_content(&log(TimeLogType::Salida, Locale::Uwu)).starts_with("🔴"));
    }
}
