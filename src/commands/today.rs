use super::login::{shop_login, ShopLoginArgs};
use crate::api::discord::NoopNotifier;
use crate::db::storage::Storage;
use crate::libs::clock::SystemClock;
use crate::libs::messages::Message;
use crate::libs::punch::PunchService;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;

pub fn cmd(args: ShopLoginArgs) -> Result<()> {
    let store = Storage::open_default()?;
    let (user, _) = shop_login(&store, &args)?;
    let service = PunchService::new(store, Arc::new(NoopNotifier), Arc::new(SystemClock));

    let events = service.today_events(&user.id)?;
    if events.is_empty() {
        msg_info!(Message::NoEventsToday);
        return Ok(());
    }

    let date = Local::now().format("%B %-d, %Y").to_string();
    msg_print!(Message::TodayTitle(user.username, date), true);
    View::time_logs(&events)?;

    Ok(())
}
