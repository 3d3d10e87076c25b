use super::login::{login, LoginArgs};
use crate::db::kv::SqliteKv;
use crate::db::storage::{ProductStore, ShiftStore, Storage, UserStore};
use crate::libs::admin::{AdminRecord, ShiftOwner};
use crate::libs::formatter::format_duration;
use crate::libs::messages::Message;
use crate::libs::product::Product;
use crate::libs::shift::{total_work_time, ShiftLog};
use crate::libs::user::{Context, Locale, Role, User};
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[command(flatten)]
    login: LoginArgs,

    #[command(subcommand)]
    command: AdminCommand,
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    /// Manage staff accounts
    #[command(subcommand)]
    Users(UserCommand),
    /// Manage shop menus
    #[command(subcommand)]
    Products(ProductCommand),
    /// Review and clean shift history
    #[command(subcommand)]
    Shifts(ShiftCommand),
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// List all users
    List,
    /// Create a user
    Add {
        username: String,
        password: String,
        #[arg(long, short, value_enum, default_value_t = Role::Worker)]
        role: Role,
        /// Shops the user may work at (repeatable)
        #[arg(long = "locale", short, value_enum)]
        locales: Vec<Locale>,
    },
    /// Change a user; omitted fields are kept
    Edit {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, short, value_enum)]
        role: Option<Role>,
        /// Replaces the allowed shops when given (repeatable)
        #[arg(long = "locale", short, value_enum)]
        locales: Vec<Locale>,
    },
    /// Delete a user
    Delete {
        id: String,
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ProductCommand {
    /// List a shop's products
    List {
        #[arg(value_enum)]
        locale: Locale,
    },
    /// Add a product to a shop
    Add {
        #[arg(value_enum)]
        locale: Locale,
        name: String,
        price: f64,
        #[arg(long, default_value = "🍽️")]
        icon: String,
        #[arg(long, short, default_value = "General")]
        category: String,
    },
    /// Change a product; omitted fields are kept
    Edit {
        #[arg(value_enum)]
        locale: Locale,
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long, short)]
        category: Option<String>,
    },
    /// Delete a product
    Delete {
        #[arg(value_enum)]
        locale: Locale,
        id: String,
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ShiftCommand {
    /// List completed shifts, optionally of one user
    List { username: Option<String> },
    /// Show who is clocked in right now
    Open,
    /// Delete one shift record
    Delete {
        id: String,
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// Delete all shift records of a user
    Clear {
        /// User id or username; deleted accounts are matched by their records
        user: String,
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
    /// Delete the shift records of every user
    ClearAll {
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn cmd(args: AdminArgs) -> Result<()> {
    let store = Storage::open_default()?;
    let admin = login(&store, &args.login, Context::AdminPanel)?;

    match args.command {
        AdminCommand::Users(command) => users(&store, &admin, command),
        AdminCommand::Products(command) => products(&store, command),
        AdminCommand::Shifts(command) => shifts(&store, command),
    }
}

fn confirm(skip: bool, prompt: Message) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
    }
    Ok(confirmed)
}

fn check_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        msg_bail_anyhow!(Message::InvalidPrice(price.to_string()));
    }
    Ok(price)
}

fn users(store: &Storage<SqliteKv>, admin: &User, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::List => {
            msg_print!(Message::UsersTitle, true);
            View::users(&store.users()?)?;
        }
        UserCommand::Add {
            username,
            password,
            role,
            locales,
        } => {
            let user = User {
                id: Uuid::new_v4().to_string(),
                username,
                password,
                role,
                allowed_locales: locales,
            };
            AdminRecord::User(user.clone()).apply(store)?;
            msg_success!(Message::UserSaved(user.username));
        }
        UserCommand::Edit {
            id,
            username,
            password,
            role,
            locales,
        } => {
            let Some(mut user) = store.users()?.into_iter().find(|u| u.id == id) else {
                msg_error!(Message::UserNotFound(id));
                return Ok(());
            };
            if let Some(username) = username {
                user.username = username;
            }
            if let Some(password) = password {
                user.password = password;
            }
            if let Some(role) = role {
                user.role = role;
            }
            if !locales.is_empty() {
                user.allowed_locales = locales;
            }
            AdminRecord::User(user.clone()).apply(store)?;
            msg_success!(Message::UserSaved(user.username));
        }
        UserCommand::Delete { id, yes } => {
            let Some(user) = store.users()?.into_iter().find(|u| u.id == id) else {
                msg_error!(Message::UserNotFound(id));
                return Ok(());
            };
            if user.id == admin.id {
                msg_error!(Message::CannotDeleteSelf);
                return Ok(());
            }
            if confirm(yes, Message::ConfirmDeleteUser(user.username.clone()))? {
                AdminRecord::User(user.clone()).remove(store)?;
                msg_success!(Message::UserDeleted(user.username));
            }
        }
    }
    Ok(())
}

fn products(store: &Storage<SqliteKv>, command: ProductCommand) -> Result<()> {
    match command {
        ProductCommand::List { locale } => {
            msg_print!(Message::ProductsTitle(locale.title().to_string()), true);
            View::products(&store.products(locale)?)?;
        }
        ProductCommand::Add {
            locale,
            name,
            price,
            icon,
            category,
        } => {
            let product = Product {
                id: Uuid::new_v4().to_string(),
                name,
                price: check_price(price)?,
                icon,
                category,
            };
            let name = product.name.clone();
            AdminRecord::Product { locale, product }.apply(store)?;
            msg_success!(Message::ProductSaved(name));
        }
        ProductCommand::Edit {
            locale,
            id,
            name,
            price,
            icon,
            category,
        } => {
            let Some(mut product) = store.products(locale)?.into_iter().find(|p| p.id == id) else {
                msg_error!(Message::ProductNotFound(id));
                return Ok(());
            };
            if let Some(name) = name {
                product.name = name;
            }
            if let Some(price) = price {
                product.price = check_price(price)?;
            }
            if let Some(icon) = icon {
                product.icon = icon;
            }
            if let Some(category) = category {
                product.category = category;
            }
            let name = product.name.clone();
            AdminRecord::Product { locale, product }.apply(store)?;
            msg_success!(Message::ProductSaved(name));
        }
        ProductCommand::Delete { locale, id, yes } => {
            let Some(product) = store.products(locale)?.into_iter().find(|p| p.id == id) else {
                msg_error!(Message::ProductNotFound(id));
                return Ok(());
            };
            if confirm(yes, Message::ConfirmDeleteProduct(product.name.clone()))? {
                let record = AdminRecord::Product { locale, product };
                record.remove(store)?;
                msg_success!(Message::ProductDeleted(record.label().to_string()));
            }
        }
    }
    Ok(())
}

fn shifts(store: &Storage<SqliteKv>, command: ShiftCommand) -> Result<()> {
    match command {
        ShiftCommand::List { username } => {
            let shifts: Vec<ShiftLog> = store
                .shift_logs()?
                .into_iter()
                .filter(|s| username.as_ref().map_or(true, |name| &s.username == name))
                .collect();
            if shifts.is_empty() {
                msg_info!(Message::NoShiftsFound);
                return Ok(());
            }
            let title = match username {
                Some(name) => Message::ShiftsTitleForUser(name),
                None => Message::ShiftsTitle,
            };
            let total = total_work_time(&shifts);
            msg_print!(title, true);
            View::shifts(&shifts, total)?;
            msg_print!(Message::TotalWorked(format_duration(&total)));
        }
        ShiftCommand::Open => {
            let users = store.users()?;
            let open: Vec<_> = store
                .sessions()?
                .into_iter()
                .filter(|(_, session)| session.is_active)
                .map(|(user_id, session)| {
                    let name = users.iter().find(|u| u.id == user_id).map_or(user_id, |u| u.username.clone());
                    (name, session)
                })
                .collect();
            if open.is_empty() {
                msg_info!(Message::NoOpenShifts);
                return Ok(());
            }
            msg_print!(Message::OpenSessionsTitle, true);
            View::open_sessions(&open, Utc::now())?;
        }
        ShiftCommand::Delete { id, yes } => {
            if !store.shift_logs()?.iter().any(|s| s.id == id) {
                msg_error!(Message::ShiftNotFound(id));
                return Ok(());
            }
            if confirm(yes, Message::ConfirmDeleteShift(id.clone()))? {
                store.delete_shift_log(&id)?;
                msg_success!(Message::ShiftDeleted(id));
            }
        }
        ShiftCommand::Clear { user, yes } => {
            let Some(owner) = ShiftOwner::find(&store.users()?, &store.shift_logs()?, &user) else {
                msg_error!(Message::UserNotFound(user));
                return Ok(());
            };
            if confirm(yes, Message::ConfirmClearShifts(owner.username.clone()))? {
                store.clear_shift_logs(&owner.user_id)?;
                msg_success!(Message::ShiftsCleared(owner.username));
            }
        }
        ShiftCommand::ClearAll { yes } => {
            if confirm(yes, Message::ConfirmClearAllShifts)? {
                store.clear_all_shift_logs()?;
                msg_success!(Message::AllShiftsCleared);
            }
        }
    }
    Ok(())
}
