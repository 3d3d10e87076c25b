//! Text of every user-facing message.
//!
//! All wording lives here so commands only pick a [`Message`] variant and its
//! parameters. The macros in [`super::macros`] add the status prefix.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let text = match self {
            // === CLOCK MESSAGES ===
            Message::ClockedIn(username, shop, time) => format!("{} clocked in at {} ({})", username, shop, time),
            Message::PauseStarted(time, worked) => format!("Pause started at {}, worked so far {}", time, worked),
            Message::PauseEnded(time) => format!("Back to work at {}", time),
            Message::ClockedOut(time, worked, paused) => {
                format!("Clocked out at {}. Worked {}, paused {}", time, worked, paused)
            }
            Message::ClockStatus(state, worked) => format!("Shift {}, worked {}", state, worked),
            Message::NoShiftInProgress => "No shift in progress".to_string(),
            Message::WatchStarted => "Live clock running, press Ctrl+C to stop".to_string(),
            Message::WatchStopped => "Live clock stopped".to_string(),
            Message::WatchTick(worked) => format!("⏱  {}", worked),

            // === TODAY / HISTORY MESSAGES ===
            Message::TodayTitle(username, date) => format!("Clock events of {} on {}", username, date),
            Message::NoEventsToday => "No clock events today".to_string(),
            Message::HistoryTitle(username) => format!("Shift history of {}", username),
            Message::NoShiftsFound => "No shifts found".to_string(),
            Message::TotalWorked(total) => format!("Total worked: {}", total),

            // === AUTH MESSAGES ===
            Message::PromptUsername => "Username".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::LoggedInAs(username, context) => format!("Logged in as {} ({})", username, context),

            // === ADMIN MESSAGES ===
            Message::UsersTitle => "Staff".to_string(),
            Message::ProductsTitle(shop) => format!("Products of {}", shop),
            Message::ShiftsTitle => "Shift history".to_string(),
            Message::ShiftsTitleForUser(username) => format!("Shift history of {}", username),
            Message::OpenSessionsTitle => "Shifts in progress".to_string(),
            Message::NoOpenShifts => "Nobody is clocked in".to_string(),
            Message::UserSaved(username) => format!("User '{}' saved", username),
            Message::UserDeleted(username) => format!("User '{}' deleted", username),
            Message::UserNotFound(id) => format!("User '{}' not found", id),
            Message::UsernameTaken(username) => format!("Username '{}' is already taken", username),
            Message::CannotDeleteSelf => "You cannot delete the account you are logged in with".to_string(),
            Message::ProductSaved(name) => format!("Product '{}' saved", name),
            Message::ProductDeleted(name) => format!("Product '{}' deleted", name),
            Message::ProductNotFound(id) => format!("Product '{}' not found", id),
            Message::ShiftDeleted(id) => format!("Shift '{}' deleted", id),
            Message::ShiftNotFound(id) => format!("Shift '{}' not found", id),
            Message::ShiftsCleared(username) => format!("Shift history of '{}' cleared", username),
            Message::AllShiftsCleared => "All shift history cleared".to_string(),
            Message::ConfirmDeleteUser(username) => format!("Delete user '{}'?", username),
            Message::ConfirmDeleteProduct(name) => format!("Delete product '{}'?", name),
            Message::ConfirmDeleteShift(id) => format!("Delete shift record '{}'?", id),
            Message::ConfirmClearShifts(username) => {
                format!("Delete ALL shift history of '{}'? This cannot be undone", username)
            }
            Message::ConfirmClearAllShifts => "Delete the shift history of EVERY user? This cannot be undone".to_string(),
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidPrice(price) => format!("Invalid price '{}'", price),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Config saved successfully".to_string(),
            Message::ConfigModuleWebhooks => "Discord webhooks".to_string(),
            Message::ConfigModuleClock => "Clock".to_string(),
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptTimeLogWebhook(locale) => format!("{} clock events webhook URL", locale.title()),
            Message::PromptTickInterval => "Live clock refresh interval (ms)".to_string(),
            Message::PromptNotifyGrace => "Wait for notifications before exiting (ms)".to_string(),

            // === NOTIFICATION MESSAGES ===
            Message::NotificationSkipped(locale) => format!("No clock events webhook for {}, notification skipped", locale),
            Message::NotificationSent(locale) => format!("Clock event sent to the {} webhook", locale),
            Message::NotificationFailed(error) => format!("Failed to send clock event: {}", error),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
