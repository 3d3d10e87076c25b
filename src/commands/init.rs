use crate::{
    libs::{config::Config, config::CONFIG_FILE_NAME, data_storage::DataStorage, messages::Message},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(short, long, help = "Print the configuration file path and exit")]
    path: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.path {
        msg_print!(DataStorage::new().get_path(CONFIG_FILE_NAME)?.display());
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
