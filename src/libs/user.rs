//! Staff accounts, shops and login contexts.
//!
//! A [`User`] is either an `admin` (may enter every shop and the admin panel)
//! or a `worker` restricted to the shops listed in `allowed_locales`.
//! "Locale" here names a shop, not a language.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two shops sharing this installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Yummy Ice Cream.
    Yummy,
    /// UwU Café.
    Uwu,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Yummy, Locale::Uwu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Yummy => "yummy",
            Locale::Uwu => "uwu",
        }
    }

    /// Human readable shop name.
    pub fn title(&self) -> &'static str {
        match self {
            Locale::Yummy => "Yummy Ice Cream",
            Locale::Uwu => "UwU Café",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Worker => f.write_str("worker"),
        }
    }
}

/// Where a login is attempted: one of the shops or the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Shop(Locale),
    AdminPanel,
}

/// A staff account. Passwords are kept and compared in plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub allowed_locales: Vec<Locale>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins may work in every shop; workers only in their allowed ones.
    pub fn can_work_in(&self, locale: Locale) -> bool {
        self.is_admin() || self.allowed_locales.contains(&locale)
    }
}

/// The identity stamped on every log a shift produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub user_id: String,
    pub username: String,
    pub locale: Locale,
}

impl Worker {
    pub fn new(user: &User, locale: Locale) -> Self {
        Self {
            user_id: user.id.clone(),
            username: user.username.clone(),
            locale,
        }
    }
}

/// Accounts created the first time the user list is read.
pub fn initial_users() -> Vec<User> {
    let user = |id: &str, username: &str, role: Role, allowed_locales: &[Locale]| User {
        id: id.to_string(),
        username: username.to_string(),
        password: "123".to_string(),
        role,
        allowed_locales: allowed_locales.to_vec(),
    };

    vec![
        user("0", "admin", Role::Admin, &Locale::ALL),
        user("1", "jefe", Role::Admin, &Locale::ALL),
        user("2", "empleado1", Role::Worker, &[Locale::Yummy]),
        user("3", "empleado2", Role::Worker, &[Locale::Uwu]),
    ]
}
