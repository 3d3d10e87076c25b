//! # Fichaje - shift clocking for small shops
//!
//! A command-line time clock shared by the Yummy and UwU shops. Workers clock
//! in, pause, resume and clock out; every shift is kept with its worked and
//! paused time, and admins manage staff, menus and shift history.
//!
//! ## Features
//!
//! - **Shift Clock**: entrada, pausa, continuar and salida with durations
//!   derived from timestamps
//! - **Audit Trail**: every clock event and completed shift is stored
//! - **Notifications**: clock events announced on the shop's Discord channel
//! - **Admin Panel**: staff, products and shift history management
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fichaje::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
