//! Configuration management for fichaje.
//!
//! The configuration is a small JSON file (`config.json`) stored next to the
//! database in the application data directory. Every section is optional; a
//! missing file simply means "defaults everywhere".
//!
//! ## Sections
//!
//! - **webhooks**: Discord webhook URL per shop for clock events
//! - **clock**: refresh cadence of the live clock and how long the CLI waits for
//!   a notification before exiting
//!
//! Webhook URLs can also come from the environment (or a `.env` file):
//! `FICHAJE_WEBHOOK_YUMMY_TIME` and `FICHAJE_WEBHOOK_UWU_TIME` take precedence
//! over the file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fichaje::libs::config::Config;
//! use fichaje::libs::user::Locale;
//!
//! let config = Config::read()?;
//! if let Some(url) = config.time_log_webhook(Locale::Uwu) {
//!     println!("UwU clock events go to {}", url);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::user::Locale;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Webhook destinations of one shop.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ShopWebhooks {
    /// Receives entrada, pausa and salida events.
    pub time_log: String,
}

/// Webhooks of both shops.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct WebhooksConfig {
    pub yummy: ShopWebhooks,
    pub uwu: ShopWebhooks,
}

impl WebhooksConfig {
    pub fn shop(&self, locale: Locale) -> &ShopWebhooks {
        match locale {
            Locale::Yummy => &self.yummy,
            Locale::Uwu => &self.uwu,
        }
    }
}

/// Timing of the live clock and of notification delivery.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClockConfig {
    /// Refresh interval of `status --watch`, in milliseconds.
    pub tick_interval_ms: u64,
    /// How long a clock command waits for its notification before exiting, in milliseconds.
    pub notify_grace_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig {
            tick_interval_ms: 1000,
            notify_grace_ms: 1500,
        }
    }
}

impl ClockConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn notify_grace(&self) -> Duration {
        Duration::from_millis(self.notify_grace_ms)
    }
}

/// Contents of `config.json`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhooks: Option<WebhooksConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock: Option<ClockConfig>,
}

/// Environment variable overriding the clock-event webhook of a shop.
pub fn time_log_webhook_env(locale: Locale) -> &'static str {
    match locale {
        Locale::Yummy => "FICHAJE_WEBHOOK_YUMMY_TIME",
        Locale::Uwu => "FICHAJE_WEBHOOK_UWU_TIME",
    }
}

fn usable_url(url: &str) -> Option<String> {
    let url = url.trim();
    (url.starts_with("http://") || url.starts_with("https://")).then(|| url.to_string())
}

impl Config {
    /// Reads the configuration from the data directory, defaults when absent.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(config_file_path)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration to the data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(config_file_path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Clock timings, defaults when the section is missing.
    pub fn clock(&self) -> ClockConfig {
        self.clock.clone().unwrap_or_default()
    }

    /// The clock-event webhook of a shop, if one is set to a real URL.
    ///
    /// The environment wins over the file. Placeholders such as
    /// `YOUR_DISCORD_WEBHOOK_URL` count as unset.
    pub fn time_log_webhook(&self, locale: Locale) -> Option<String> {
        self.time_log_webhook_with(locale, |name| env::var(name).ok())
    }

    /// Same as [`Config::time_log_webhook`], reading variables through `lookup`.
    pub fn time_log_webhook_with(&self, locale: Locale, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        if let Some(url) = lookup(time_log_webhook_env(locale)).as_deref().and_then(usable_url) {
            return Some(url);
        }
        self.webhooks.as_ref().and_then(|w| usable_url(&w.shop(locale).time_log))
    }

    /// Interactive setup of the selected sections, prefilled with current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let sections = [Message::ConfigModuleWebhooks.to_string(), Message::ConfigModuleClock.to_string()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&sections)
            .interact()?;

        for &selection in &selected {
            match selection {
                0 => {
                    let default = config.webhooks.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleWebhooks);
                    let mut webhooks = WebhooksConfig::default();
                    for locale in Locale::ALL {
                        let current = default.shop(locale);
                        let shop = ShopWebhooks {
                            time_log: Input::with_theme(&ColorfulTheme::default())
                                .with_prompt(Message::PromptTimeLogWebhook(locale).to_string())
                                .default(current.time_log.clone())
                                .allow_empty(true)
                                .interact_text()?,
                        };
                        match locale {
                            Locale::Yummy => webhooks.yummy = shop,
                            Locale::Uwu => webhooks.uwu = shop,
                        }
                    }
                    config.webhooks = Some(webhooks);
                }
                1 => {
                    let default = config.clock();
                    msg_print!(Message::ConfigModuleClock);
                    config.clock = Some(ClockConfig {
                        tick_interval_ms: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTickInterval.to_string())
                            .default(default.tick_interval_ms)
                            .interact_text()?,
                        notify_grace_ms: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptNotifyGrace.to_string())
                            .default(default.notify_grace_ms)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
