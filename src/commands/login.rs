use crate::db::storage::UserStore;
use crate::libs::auth::authenticate;
use crate::libs::messages::Message;
use crate::libs::user::{Context, Locale, User};
use crate::msg_debug;
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

/// Credentials, prompted for when not given on the command line.
#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, short, help = "Username")]
    user: Option<String>,

    #[arg(long, short, help = "Password (prompted when omitted)")]
    password: Option<String>,
}

/// Credentials plus the shop being worked at.
#[derive(Debug, Args)]
pub struct ShopLoginArgs {
    #[command(flatten)]
    pub login: LoginArgs,

    #[arg(long, short, value_enum, help = "Shop")]
    pub locale: Locale,
}

pub fn login<S: UserStore>(store: &S, args: &LoginArgs, context: Context) -> Result<User> {
    let username = match &args.user {
        Some(username) => username.clone(),
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUsername.to_string())
            .interact_text()?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptPassword.to_string())
            .interact()?,
    };

    let user = authenticate(&store.users()?, &username, &password, context)?;
    let place = match context {
        Context::Shop(locale) => locale.title().to_string(),
        Context::AdminPanel => "admin".to_string(),
    };
    msg_debug!(Message::LoggedInAs(user.username.clone(), place));

    Ok(user)
}

/// Logs into a shop, returning the user and the shop.
pub fn shop_login<S: UserStore>(store: &S, args: &ShopLoginArgs) -> Result<(User, Locale)> {
    let user = login(store, &args.login, Context::Shop(args.locale))?;
    Ok((user, args.locale))
}
