//! Clock event notifications.
//!
//! Every entrada, pausa and salida is announced to the shop's Discord channel
//! through its clock events webhook. Delivery is best effort: the punch has
//! already been saved when the request goes out, so a failed or skipped
//! notification is logged and forgotten.

use crate::libs::config::Config;
use crate::libs::formatter::format_time;
use crate::libs::messages::Message;
use crate::libs::shift::{TimeLog, TimeLogType};
use crate::libs::user::Locale;
use crate::msg_debug;
use reqwest::Client;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook answered with status {0}")]
    Status(u16),
    #[error("no clock events webhook configured for {0}")]
    NotConfigured(Locale),
}

/// Announces clock events somewhere outside the application.
pub trait Notifier: Send + Sync {
    fn notify_time_event(&self, log: &TimeLog) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Discards every event.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    async fn notify_time_event(&self, _log: &TimeLog) -> Result<(), NotifyError> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookMessage {
    content: String,
}

/// Posts clock events to the per-shop Discord webhooks.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: Client,
    yummy_url: Option<String>,
    uwu_url: Option<String>,
}

impl DiscordNotifier {
    /// Webhooks from the configuration, overridden by the environment.
    pub fn new(config: &Config) -> Self {
        Self::with_urls(config.time_log_webhook(Locale::Yummy), config.time_log_webhook(Locale::Uwu))
    }

    /// Webhooks given explicitly; `None` leaves that shop unannounced.
    pub fn with_urls(yummy_url: Option<String>, uwu_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            yummy_url,
            uwu_url,
        }
    }

    fn url(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::Yummy => self.yummy_url.as_deref(),
            Locale::Uwu => self.uwu_url.as_deref(),
        }
    }

    /// True when at least one shop has a webhook.
    pub fn is_configured(&self) -> bool {
        self.yummy_url.is_some() || self.uwu_url.is_some()
    }
}

impl Notifier for DiscordNotifier {
    async fn notify_time_event(&self, log: &TimeLog) -> Result<(), NotifyError> {
        let url = self.url(log.locale).ok_or(NotifyError::NotConfigured(log.locale))?;
        let message = WebhookMessage {
            content: time_log_content(log),
        };

        let response = self.client.post(url).json(&message).send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Chat line announcing a clock event.
pub fn time_log_content(log: &TimeLog) -> String {
    let (icon, verb) = match log.kind {
        TimeLogType::Entrada => ("🟢", "ENTRADA"),
        TimeLogType::Pausa => ("⏸️", "PAUSA"),
        TimeLogType::Salida => ("🔴", "SALIDA"),
    };
    format!(
        "{} **{}** {} · {} · {}",
        icon,
        log.username,
        verb,
        log.locale.title(),
        format_time(&log.timestamp)
    )
}

/// Sends the event on a detached task. The outcome is only logged.
pub fn notify_detached<N: Notifier + 'static>(notifier: Arc<N>, log: TimeLog) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify_time_event(&log).await {
            Ok(()) => msg_debug!(Message::NotificationSent(log.locale)),
            Err(NotifyError::NotConfigured(locale)) => msg_debug!(Message::NotificationSkipped(locale)),
            Err(e) => tracing::warn!("{}", Message::NotificationFailed(e.to_string())),
        }
    })
}
