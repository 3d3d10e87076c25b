//! Admin edits of staff accounts and shop menus.

use crate::db::storage::{ProductStore, UserStore};
use crate::libs::messages::Message;
use crate::libs::product::Product;
use crate::libs::shift::ShiftLog;
use crate::libs::user::{Locale, User};
use crate::msg_bail_anyhow;
use anyhow::Result;

/// A record edited from the admin panel.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminRecord {
    User(User),
    Product { locale: Locale, product: Product },
}

impl AdminRecord {
    /// Inserts the record, or replaces the stored one with the same id.
    ///
    /// Usernames are unique across accounts, since login looks users up by name.
    pub fn apply<S: UserStore + ProductStore>(&self, store: &S) -> Result<()> {
        match self {
            AdminRecord::User(user) => {
                let users = store.users()?;
                if users.iter().any(|u| u.username == user.username && u.id != user.id) {
                    msg_bail_anyhow!(Message::UsernameTaken(user.username.clone()));
                }
                store.save_user(user)
            }
            AdminRecord::Product { locale, product } => {
                let mut products = store.products(*locale)?;
                match products.iter_mut().find(|p| p.id == product.id) {
                    Some(existing) => *existing = product.clone(),
                    None => products.push(product.clone()),
                }
                store.save_products(*locale, &products)
            }
        }
    }

    /// Removes the stored record with the same id. Unknown ids are ignored.
    pub fn remove<S: UserStore + ProductStore>(&self, store: &S) -> Result<()> {
        match self {
            AdminRecord::User(user) => store.delete_user(&user.id),
            AdminRecord::Product { locale, product } => {
                let mut products = store.products(*locale)?;
                products.retain(|p| p.id != product.id);
                store.save_products(*locale, &products)
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            AdminRecord::User(user) => &user.username,
            AdminRecord::Product { product, .. } => &product.name,
        }
    }
}

/// The user whose shift history an admin command targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftOwner {
    pub user_id: String,
    pub username: String,
}

impl ShiftOwner {
    /// Resolves `key` as a user id or username.
    ///
    /// Current accounts are tried first. Shift records keep the id and name of
    /// their worker, so the history of a deleted account can still be found.
    pub fn find(users: &[User], shifts: &[ShiftLog], key: &str) -> Option<ShiftOwner> {
        let account = users
            .iter()
            .find(|u| u.id == key)
            .or_else(|| users.iter().find(|u| u.username == key))
            .map(|u| (&u.id, &u.username));
        let former = || {
            shifts
                .iter()
                .find(|s| s.user_id == key)
                .or_else(|| shifts.iter().find(|s| s.username == key))
                .map(|s| (&s.user_id, &s.username))
        };

        account.or_else(former).map(|(user_id, username)| ShiftOwner {
            user_id: user_id.clone(),
            username: username.clone(),
        })
    }
}
