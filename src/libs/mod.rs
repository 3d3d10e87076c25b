//! Core library modules for fichaje.
//!
//! - **Shift clock**: [`shift_clock`] state machine, [`shift`] records,
//!   [`punch`] service, [`ticker`] live display, [`clock`] time sources
//! - **Accounts and menus**: [`user`], [`auth`], [`product`], [`admin`]
//! - **Infrastructure**: [`config`], [`data_storage`], [`messages`]
//! - **Terminal output**: [`formatter`], [`view`]
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use fichaje::libs::shift_clock::{ClockState, WorkSession};
//!
//! let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
//! let session = WorkSession::default().clock_in(start)?;
//! assert_eq!(session.state(), ClockState::Running);
//! # Ok::<(), fichaje::libs::shift_clock::ClockError>(())
//! ```

pub mod admin;
pub mod auth;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod formatter;
pub mod messages;
pub mod product;
pub mod punch;
pub mod shift;
pub mod shift_clock;
pub mod ticker;
pub mod user;
pub mod view;
