//! Terminal tables.
//!
//! Every listing of the CLI goes through [`View`], so column order and
//! formatting stay the same across commands. Times are shown in local time.

use super::formatter::{format_date, format_datetime, format_duration, format_time};
use super::product::Product;
use super::shift::{ShiftLog, TimeLog};
use super::shift_clock::WorkSession;
use super::user::User;
use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use prettytable::{row, Table};

/// Prints records as tables on stdout.
pub struct View {}

impl View {
    /// Clock events: time, event, shop and user.
    pub fn time_logs(logs: &[TimeLog]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TIME", "EVENT", "SHOP", "USER"]);
        for log in logs {
            table.add_row(row![format_time(&log.timestamp), log.kind, log.locale.title(), log.username]);
        }
        table.printstd();

        Ok(())
    }

    /// Completed shifts followed by a `TOTAL` row with `total` worked time.
    pub fn shifts(shifts: &[ShiftLog], total: TimeDelta) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "USER", "SHOP", "START", "END", "PAUSED", "WORKED"]);
        for shift in shifts {
            table.add_row(row![
                shift.id,
                format_date(&shift.start_time),
                shift.username,
                shift.locale.title(),
                format_time(&shift.start_time),
                format_time(&shift.end_time),
                format_duration(&shift.total_pause_time),
                format_duration(&shift.total_work_time)
            ]);
        }
        table.add_row(row!["", "", "", "", "", "", "TOTAL", format_duration(&total)]);
        table.printstd();

        Ok(())
    }

    /// Accounts with their role and allowed shops. Passwords are not shown.
    pub fn users(users: &[User]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "USERNAME", "ROLE", "SHOPS"]);
        for user in users {
            let shops = user.allowed_locales.iter().map(|l| l.as_str()).collect::<Vec<_>>().join(", ");
            table.add_row(row![user.id, user.username, user.role, shops]);
        }
        table.printstd();

        Ok(())
    }

    /// One shop's menu, prices with two decimals.
    pub fn products(products: &[Product]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "", "NAME", "CATEGORY", "PRICE"]);
        for product in products {
            table.add_row(row![product.id, product.icon, product.name, product.category, format!("{:.2}", product.price)]);
        }
        table.printstd();

        Ok(())
    }

    /// Sessions still clocked in, with their worked time as of `now`.
    pub fn open_sessions(sessions: &[(String, WorkSession)], now: DateTime<Utc>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["USER", "STATE", "SINCE", "WORKED"]);
        for (username, session) in sessions {
            let since = session.start_time.as_ref().map(format_datetime).unwrap_or_default();
            table.add_row(row![username, session.state(), since, format_duration(&session.elapsed_now(now))]);
        }
        table.printstd();

        Ok(())
    }
}
