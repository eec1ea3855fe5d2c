use std::sync::Arc;

use clap::{Parser, Subcommand};
use sovereign_notifier::{
    Error,
    config::Config,
    factory,
    process::{Notifier, WatchMode},
    shutdown::ShutdownManager,
    subscribers::{LoggingHeaderSubscriber, LoggingTxSubscriber},
    sync,
};
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOGS_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "sovereign-notifier";
/// Daily files kept on disk, five days of logs
const LOG_FILES_KEPT: usize = 5;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Cli::parse();

    init_logging(&args)?;

    if let Err(err) = run(args) {
        error!(%err, "sovereign notifier stopped");
        return Err(err);
    }

    Ok(())
}

fn init_logging(args: &Cli) -> Result<(), Error> {
    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level).map_err(|e| Error::Custom(e.to_string()))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let file_layer = if args.log_save_file {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix("log")
            .max_log_files(LOG_FILES_KEPT)
            .build(LOGS_DIR)
            .map_err(|e| Error::Custom(format!("creating log file: {e}")))?;

        Some(fmt::layer().with_ansi(false).with_writer(appender))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(!args.disable_ansi_color))
        .with(file_layer)
        .init();

    Ok(())
}

fn run(args: Cli) -> Result<(), Error> {
    let config = Config::new(&args.config)?;

    let notifier = Arc::new(factory::create_sovereign_notifier(
        &config.notifier,
        config.web_socket.marshaller_type,
    )?);

    match args.command {
        Command::Run(_) => {
            info!(
                url = %config.web_socket.url,
                mode = %notifier.watch_mode(),
                watched = notifier.watched_count(),
                "running sovereign notifier"
            );

            notifier.register_header_subscriber(Arc::new(LoggingHeaderSubscriber::new()))?;

            if notifier.watch_mode() == WatchMode::Addresses {
                notifier.register_tx_subscriber(Arc::new(LoggingTxSubscriber::new()))?;
            }

            let daemon = sync::pipeline::pipeline(&config, notifier)?;

            let _signals = ShutdownManager::new().exit_on_signal();

            daemon.block();
        }
        Command::Validate(_) => {
            info!(
                mode = %notifier.watch_mode(),
                watched = notifier.watched_count(),
                shards = config.notifier.num_main_shards,
                block_cache_size = ?config.notifier.block_cache_size,
                "configuration is valid"
            );
        }
    }

    Ok(())
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect to the observer and publish incoming headers until interrupted
    Run(Args),
    /// Load the configuration and build the notifier, then exit
    Validate(Args),
}

#[derive(Debug, clap::Args)]
pub struct Args {}

#[derive(Debug, Parser)]
#[clap(name = "sovereign-notifier")]
#[clap(bin_name = "sovereign-notifier")]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    config: Option<std::path::PathBuf>,

    /// Log filter directives, overrides RUST_LOG (default: info)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also write logs to rotating files under `logs/`
    #[arg(long, global = true)]
    log_save_file: bool,

    /// Print console logs without ANSI colors
    #[arg(long, global = true)]
    disable_ansi_color: bool,
}
