//! Outbound integrations.

pub mod discord;

pub use discord::{notify_detached, DiscordNotifier, NoopNotifier, Notifier, NotifyError};
