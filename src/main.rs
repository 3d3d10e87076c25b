use fichaje::commands::Cli;
use fichaje::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let default_filter = if is_debug_mode() { "fichaje=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_target(false)
        .init();

    Cli::menu().await
}
