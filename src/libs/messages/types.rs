use crate::libs::user::Locale;

#[derive(Debug, Clone)]
pub enum Message {
    // === CLOCK MESSAGES ===
    ClockedIn(String, String, String), // username, shop, time
    PauseStarted(String, String),      // time, worked so far
    PauseEnded(String),                // time
    ClockedOut(String, String, String), // time, worked, paused
    ClockStatus(String, String),       // state, worked
    NoShiftInProgress,
    WatchStarted,
    WatchStopped,
    WatchTick(String), // worked

    // === TODAY / HISTORY MESSAGES ===
    TodayTitle(String, String), // username, date
    NoEventsToday,
    HistoryTitle(String), // username
    NoShiftsFound,
    TotalWorked(String),

    // === AUTH MESSAGES ===
    PromptUsername,
    PromptPassword,
    LoggedInAs(String, String), // username, context

    // === ADMIN MESSAGES ===
    UsersTitle,
    ProductsTitle(String), // shop
    ShiftsTitle,
    ShiftsTitleForUser(String),
    OpenSessionsTitle,
    NoOpenShifts,
    UserSaved(String),
    UserDeleted(String),
    UserNotFound(String),
    UsernameTaken(String),
    CannotDeleteSelf,
    ProductSaved(String),
    ProductDeleted(String),
    ProductNotFound(String),
    ShiftDeleted(String),
    ShiftNotFound(String),
    ShiftsCleared(String),
    AllShiftsCleared,
    ConfirmDeleteUser(String),
    ConfirmDeleteProduct(String),
    ConfirmDeleteShift(String),
    ConfirmClearShifts(String),
    ConfirmClearAllShifts,
    OperationCancelled,
    InvalidPrice(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleWebhooks,
    ConfigModuleClock,
    PromptSelectModules,
    PromptTimeLogWebhook(Locale),
    PromptTickInterval,
    PromptNotifyGrace,

    // === NOTIFICATION MESSAGES ===
    NotificationSkipped(Locale),
    NotificationSent(Locale),
    NotificationFailed(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    DatabaseUpToDate,
}
