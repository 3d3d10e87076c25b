//! Message display macros with debug-aware routing.
//!
//! Every user-facing line goes through one of these macros. In normal mode
//! they print plain text to the terminal; when debug output is requested they
//! hand the same text to `tracing` instead, so it shows up interleaved with
//! the structured log of the run.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either variable is set:
//! - **`FICHAJE_DEBUG`**: application switch
//! - **`RUST_LOG`**: standard `tracing-subscriber` filter
//!
//! The check runs once per process and is cached.
//!
//! ## Macros
//!
//! - **`msg_print!`**: plain message
//! - **`msg_success!`** / **`msg_info!`** / **`msg_warning!`** / **`msg_error!`**:
//!   prefixed with ✅ / ℹ️ / ⚠️ / ❌ (errors go to stderr)
//! - **`msg_debug!`**: only emitted in debug mode
//! - **`msg_error_anyhow!`** / **`msg_bail_anyhow!`**: build or return an
//!   `anyhow::Error` from a message
//!
//! ```rust
//! use fichaje::{msg_info, msg_success};
//! use fichaje::libs::messages::Message;
//!
//! msg_success!(Message::ConfigSaved);
//! msg_info!(Message::NoOpenShifts, true);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("FICHAJE_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️  {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️  {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️  {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️  {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
