use super::login::{shop_login, ShopLoginArgs};
use crate::api::discord::NoopNotifier;
use crate::db::storage::Storage;
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::config::Config;
use crate::libs::formatter::format_duration;
use crate::libs::messages::Message;
use crate::libs::punch::PunchService;
use crate::libs::shift_clock::ClockState;
use crate::libs::ticker::{run_ticker, TickerExit};
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    shop: ShopLoginArgs,

    #[arg(long, short, help = "Keep the worked time updating until Ctrl+C")]
    watch: bool,
}

pub async fn cmd(args: StatusArgs) -> Result<()> {
    let config = Config::read()?;
    let store = Storage::open_default()?;
    let (user, _) = shop_login(&store, &args.shop)?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let service = PunchService::new(store, Arc::new(NoopNotifier), clock.clone());

    let status = service.status(&user.id)?;
    if status.state == ClockState::Idle {
        msg_info!(Message::NoShiftInProgress);
        return Ok(());
    }
    msg_print!(Message::ClockStatus(status.state.to_string(), format_duration(&status.elapsed)));

    if !args.watch || status.state != ClockState::Running {
        return Ok(());
    }

    let cancel_token = CancellationToken::new();
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    msg_info!(Message::WatchStarted);
    let exit = run_ticker(
        service.store(),
        &user.id,
        clock,
        config.clock().tick_interval(),
        cancel_token,
        |elapsed| {
            print!("\r{}", Message::WatchTick(format_duration(&elapsed)));
            let _ = io::stdout().flush();
        },
    )
    .await?;
    println!();

    if let TickerExit::Stopped(state) = exit {
        let status = service.status(&user.id)?;
        msg_print!(Message::ClockStatus(state.to_string(), format_duration(&status.elapsed)));
    }
    msg_info!(Message::WatchStopped);

    Ok(())
}
