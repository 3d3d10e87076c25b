use super::login::{shop_login, ShopLoginArgs};
use crate::api::discord::{DiscordNotifier, NoopNotifier, Notifier};
use crate::db::storage::Storage;
use crate::db::kv::SqliteKv;
use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::formatter::{format_duration, format_time};
use crate::libs::messages::Message;
use crate::libs::punch::{PunchOutcome, PunchService};
use crate::libs::shift_clock::ClockAction;
use crate::libs::user::Worker;
use crate::msg_success;
use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct ClockArgs {
    #[command(flatten)]
    shop: ShopLoginArgs,
}

pub async fn cmd(action: ClockAction, args: ClockArgs) -> Result<()> {
    let config = Config::read()?;
    let store = Storage::open_default()?;
    let (user, locale) = shop_login(&store, &args.shop)?;
    let worker = Worker::new(&user, locale);
    let grace = config.clock().notify_grace();

    let discord = DiscordNotifier::new(&config);
    if discord.is_configured() {
        punch(store, Arc::new(discord), &worker, action, grace).await
    } else {
        punch(store, Arc::new(NoopNotifier), &worker, action, grace).await
    }
}

async fn punch<N: Notifier + 'static>(
    store: Storage<SqliteKv>,
    notifier: Arc<N>,
    worker: &Worker,
    action: ClockAction,
    grace: Duration,
) -> Result<()> {
    let service = PunchService::new(store, notifier, Arc::new(SystemClock));
    let mut outcome = service.punch(worker, action).await?;
    msg_success!(punch_message(worker, &outcome));
    outcome.settle(grace).await;
    Ok(())
}

fn punch_message(worker: &Worker, outcome: &PunchOutcome) -> Message {
    let time = format_time(&outcome.at);
    match (outcome.action, &outcome.shift) {
        (ClockAction::Salida, Some(shift)) => Message::ClockedOut(
            time,
            format_duration(&shift.total_work_time),
            format_duration(&shift.total_pause_time),
        ),
        (ClockAction::Pausa, _) => Message::PauseStarted(time, format_duration(&outcome.session.elapsed_now(outcome.at))),
        (ClockAction::Continuar, _) => Message::PauseEnded(time),
        _ => Message::ClockedIn(worker.username.clone(), worker.locale.title().to_string(), time),
    }
}
