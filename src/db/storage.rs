//! Typed access to the application documents.
//!
//! [`Storage`] turns any [`KeyValue`] backend into the stores the rest of the
//! application talks to. The traits are deliberately narrow so callers can be
//! handed exactly the capability they need and tests can swap the backend.
//!
//! ## Document layout
//!
//! | Key                    | Content                                   |
//! |------------------------|-------------------------------------------|
//! | `users.json`           | every [`User`]                            |
//! | `productos_yummy.json` | Yummy menu                                |
//! | `productos_uwu.json`   | UwU menu                                  |
//! | `logs_horario.json`    | every [`TimeLog`], newest first           |
//! | `historial_turnos.json`| every [`ShiftLog`], newest first          |
//! | `session_<user id>`    | that user's [`WorkSession`]               |
//!
//! A missing document is created with its initial value the first time it is
//! read, so a fresh installation starts with the seed users and menus.

use crate::db::kv::{KeyValue, SqliteKv};
use crate::libs::product::{initial_products, Product};
use crate::libs::shift::{ShiftLog, TimeLog};
use crate::libs::shift_clock::WorkSession;
use crate::libs::user::{initial_users, Locale, User};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const USERS_KEY: &str = "users.json";
pub const TIME_LOGS_KEY: &str = "logs_horario.json";
pub const SHIFT_LOGS_KEY: &str = "historial_turnos.json";
pub const SESSION_KEY_PREFIX: &str = "session_";

pub fn products_key(locale: Locale) -> &'static str {
    match locale {
        Locale::Yummy => "productos_yummy.json",
        Locale::Uwu => "productos_uwu.json",
    }
}

pub fn session_key(user_id: &str) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, user_id)
}

/// What the shift clock needs to persist.
pub trait ShiftStore: Send + Sync {
    /// The user's session, idle when none was saved yet.
    fn get_session(&self, user_id: &str) -> Result<WorkSession>;
    /// Overwrites the user's session.
    fn save_session(&self, user_id: &str, session: &WorkSession) -> Result<()>;
    /// Every saved session keyed by user id.
    fn sessions(&self) -> Result<Vec<(String, WorkSession)>>;

    /// Clock events of every user, newest first.
    fn time_logs(&self) -> Result<Vec<TimeLog>>;
    /// Puts the event at the front of the list.
    fn add_time_log(&self, log: &TimeLog) -> Result<()>;

    /// Completed shifts of every user, newest first.
    fn shift_logs(&self) -> Result<Vec<ShiftLog>>;
    /// Puts the shift at the front of the list.
    fn add_shift_log(&self, shift: &ShiftLog) -> Result<()>;
    /// Removes one shift record. Unknown ids are ignored.
    fn delete_shift_log(&self, id: &str) -> Result<()>;
    /// Removes every shift record of `user_id`.
    fn clear_shift_logs(&self, user_id: &str) -> Result<()>;
    fn clear_all_shift_logs(&self) -> Result<()>;
}

/// Staff accounts.
pub trait UserStore: Send + Sync {
    /// Every account, seeded on first read.
    fn users(&self) -> Result<Vec<User>>;
    /// Replaces the user with the same id, or appends a new one.
    fn save_user(&self, user: &User) -> Result<()>;
    fn delete_user(&self, id: &str) -> Result<()>;
}

/// Per-shop menus.
pub trait ProductStore: Send + Sync {
    /// The shop's menu, seeded on first read.
    fn products(&self, locale: Locale) -> Result<Vec<Product>>;
    fn save_products(&self, locale: Locale, products: &[Product]) -> Result<()>;
}

/// JSON documents on top of a key-value backend.
#[derive(Debug, Clone)]
pub struct Storage<K: KeyValue> {
    kv: K,
}

impl<K: KeyValue> Storage<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// The backend, for raw access to the stored documents.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    fn get_json<T: Serialize + DeserializeOwned>(&self, key: &str, initial: impl FnOnce() -> T) -> Result<T> {
        match self.kv.get(key)? {
            Some(raw) => serde_json::from_str(&raw).with_context(|| format!("corrupt document '{}'", key)),
            None => {
                let value = initial();
                self.save_json(key, &value)?;
                Ok(value)
            }
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv.set(key, &raw)
    }

    fn update_json<T, F>(&self, key: &str, update: F) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>),
    {
        let mut items: Vec<T> = self.get_json(key, Vec::new)?;
        update(&mut items);
        self.save_json(key, &items)
    }
}

impl Storage<SqliteKv> {
    /// Storage in the application data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(SqliteKv::new()?))
    }
}

impl<K: KeyValue> ShiftStore for Storage<K> {
    fn get_session(&self, user_id: &str) -> Result<WorkSession> {
        self.get_json(&session_key(user_id), WorkSession::default)
    }

    fn save_session(&self, user_id: &str, session: &WorkSession) -> Result<()> {
        self.save_json(&session_key(user_id), session)
    }

    fn sessions(&self) -> Result<Vec<(String, WorkSession)>> {
        let mut sessions = Vec::new();
        for key in self.kv.keys(SESSION_KEY_PREFIX)? {
            let user_id = key.strip_prefix(SESSION_KEY_PREFIX).unwrap_or(&key).to_string();
            let session = self.get_json(&key, WorkSession::default)?;
            sessions.push((user_id, session));
        }
        Ok(sessions)
    }

    fn time_logs(&self) -> Result<Vec<TimeLog>> {
        self.get_json(TIME_LOGS_KEY, Vec::new)
    }

    fn add_time_log(&self, log: &TimeLog) -> Result<()> {
        self.update_json(TIME_LOGS_KEY, |logs: &mut Vec<TimeLog>| logs.insert(0, log.clone()))
    }

    fn shift_logs(&self) -> Result<Vec<ShiftLog>> {
        self.get_json(SHIFT_LOGS_KEY, Vec::new)
    }

    fn add_shift_log(&self, shift: &ShiftLog) -> Result<()> {
        self.update_json(SHIFT_LOGS_KEY, |shifts: &mut Vec<ShiftLog>| shifts.insert(0, shift.clone()))
    }

    fn delete_shift_log(&self, id: &str) -> Result<()> {
        self.update_json(SHIFT_LOGS_KEY, |shifts: &mut Vec<ShiftLog>| shifts.retain(|s| s.id != id))
    }

    fn clear_shift_logs(&self, user_id: &str) -> Result<()> {
        self.update_json(SHIFT_LOGS_KEY, |shifts: &mut Vec<ShiftLog>| shifts.retain(|s| s.user_id != user_id))
    }

    fn clear_all_shift_logs(&self) -> Result<()> {
        self.save_json::<[ShiftLog]>(SHIFT_LOGS_KEY, &[])
    }
}

impl<K: KeyValue> UserStore for Storage<K> {
    fn users(&self) -> Result<Vec<User>> {
        self.get_json(USERS_KEY, initial_users)
    }

    fn save_user(&self, user: &User) -> Result<()> {
        let mut users = self.users()?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.save_json(USERS_KEY, &users)
    }

    fn delete_user(&self, id: &str) -> Result<()> {
        let mut users = self.users()?;
        users.retain(|u| u.id != id);
        self.save_json(USERS_KEY, &users)
    }
}

impl<K: KeyValue> ProductStore for Storage<K> {
    fn products(&self, locale: Locale) -> Result<Vec<Product>> {
        self.get_json(products_key(locale), || initial_products(locale))
    }

    fn save_products(&self, locale: Locale, products: &[Product]) -> Result<()> {
        self.save_json(products_key(locale), products)
    }
}
