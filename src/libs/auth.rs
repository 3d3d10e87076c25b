//! Login rules.
//!
//! Credentials are compared verbatim against the stored user list. A valid
//! account still has to be allowed into the requested context: the admin
//! panel is reserved to admins, and a shop accepts admins plus the workers
//! that list it in `allowed_locales`.

use super::user::{Context, Locale, User};
use thiserror::Error;

/// Why a login was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are not told apart.
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("only administrators can open the admin panel")]
    AdminOnly,
    /// A worker tried to clock in at a shop they are not assigned to.
    #[error("you are not allowed to work at {0}")]
    LocaleNotAllowed(Locale),
}

/// Checks credentials and whether the user may enter `context`.
///
/// Username and password must match exactly. Returns a copy of the stored user.
pub fn authenticate(users: &[User], username: &str, password: &str, context: Context) -> Result<User, AuthError> {
    let user = users
        .iter()
        .find(|u| u.username == username && u.password == password)
        .ok_or(AuthError::InvalidCredentials)?;

    match context {
        Context::AdminPanel if !user.is_admin() => Err(AuthError::AdminOnly),
        Context::Shop(locale) if !user.can_work_in(locale) => Err(AuthError::LocaleNotAllowed(locale)),
        _ => Ok(user.clone()),
    }
}
