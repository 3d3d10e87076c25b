use super::login::{shop_login, ShopLoginArgs};
use crate::api::discord::NoopNotifier;
use crate::db::storage::Storage;
use crate::libs::clock::SystemClock;
use crate::libs::formatter::format_duration;
use crate::libs::messages::Message;
use crate::libs::punch::PunchService;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use std::sync::Arc;

pub fn cmd(args: ShopLoginArgs) -> Result<()> {
    let store = Storage::open_default()?;
    let (user, _) = shop_login(&store, &args)?;
    let service = PunchService::new(store, Arc::new(NoopNotifier), Arc::new(SystemClock));

    let history = service.history(&user.id)?;
    if history.shifts.is_empty() {
        msg_info!(Message::NoShiftsFound);
        return Ok(());
    }

    msg_print!(Message::HistoryTitle(user.username), true);
    View::shifts(&history.shifts, history.total_work_time)?;
    msg_print!(Message::TotalWorked(format_duration(&history.total_work_time)));

    Ok(())
}
