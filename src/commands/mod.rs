//! Command-line interface.
//!
//! Workers punch with `entrada`, `pausa`, `continuar` and `salida` and review
//! their own shifts with `status`, `today` and `history`. Everything under
//! `admin` requires an administrator login.

pub mod admin;
pub mod clock;
pub mod history;
pub mod init;
pub mod login;
pub mod status;
pub mod today;

use crate::libs::shift_clock::ClockAction;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Clock in and start a shift")]
    Entrada(clock::ClockArgs),
    #[command(about = "Start a pause")]
    Pausa(clock::ClockArgs),
    #[command(about = "End the pause and get back to work")]
    Continuar(clock::ClockArgs),
    #[command(about = "Clock out and close the shift")]
    Salida(clock::ClockArgs),
    #[command(about = "Show the current shift")]
    Status(status::StatusArgs),
    #[command(about = "Show today's clock events")]
    Today(login::ShopLoginArgs),
    #[command(about = "Show your shift history")]
    History(login::ShopLoginArgs),
    #[command(about = "Admin panel: users, products and shift history")]
    Admin(admin::AdminArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Entrada(args) => clock::cmd(ClockAction::Entrada, args).await,
            Commands::Pausa(args) => clock::cmd(ClockAction::Pausa, args).await,
            Commands::Continuar(args) => clock::cmd(ClockAction::Continuar, args).await,
            Commands::Salida(args) => clock::cmd(ClockAction::Salida, args).await,
            Commands::Status(args) => status::cmd(args).await,
            Commands::Today(args) => today::cmd(args),
            Commands::History(args) => history::cmd(args),
            Commands::Admin(args) => admin::cmd(args),
        }
    }
}
