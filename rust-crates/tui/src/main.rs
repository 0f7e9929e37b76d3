use clap::Parser;
use color_eyre::eyre::{
    Result,
    WrapErr,
    eyre,
};
use earnhub::config::{
    self,
    Settings,
};
use std::path::Path;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling,
};
use tracing_subscriber::{
    EnvFilter,
    fmt,
};

mod client;
mod ui;

const LOG_FILE_PREFIX: &str = "earnhub.log";

#[derive(Parser, Debug)]
#[command(
    name = "earnhub",
    about = "Earn rewards by completing tasks, spinning the wheel and inviting friends"
)]
struct Cli {
    /// Where settings, storage and logs live (defaults to ~/.earnhub)
    #[arg(long)]
    data_dir: Option<String>,
    /// Keep all state in memory; nothing is written to the storage directory
    #[arg(long)]
    ephemeral: bool,
    /// Override how long the simulated payment verification takes
    #[arg(long)]
    verification_delay_secs: Option<u64>,
    /// Log filter used when RUST_LOG is unset (e.g. `info`, `earnhub=debug`)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(data_dir: &Path, level: &str) -> Result<WorkerGuard> {
    let appender = rolling::daily(config::logs_dir(data_dir), LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .wrap_err_with(|| format!("invalid log filter '{level}'"))?;
    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!(e))?;
    Ok(guard)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let data_dir = config::resolve_data_dir(cli.data_dir.as_deref()).map_err(|e| eyre!(e))?;
    config::ensure_structure(&data_dir).map_err(|e| eyre!(e))?;
    let _log_guard = init_tracing(&data_dir, &cli.log_level)?;
    tracing::info!(data_dir = %data_dir.display(), ephemeral = cli.ephemeral, "starting earnhub");

    let mut settings = Settings::load_or_create(&data_dir).map_err(|e| eyre!(e))?;
    if let Some(secs) = cli.verification_delay_secs {
        settings.timings.verification_delay_ms = secs.saturating_mul(1_000);
    }

    let app_config = client::AppConfig {
        data_dir,
        ephemeral: cli.ephemeral,
        settings,
    };
    client::run_app(app_config).await
}
