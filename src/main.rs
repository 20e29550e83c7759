use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use launcher_deps::commands;
use launcher_deps::core::config::{default_data_dir, SetupConfig};
use launcher_deps::core::i18n::Locale;
use launcher_deps::core::notify::{LogAlerts, LogSink};
use launcher_deps::{init_logging, AppState, SetupResult};

#[derive(Parser)]
#[command(name = "launcher-deps", version, about = "Set up launcher dependencies in game prefixes")]
struct Cli {
    /// Data directory holding settings, game records and the installer cache.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Language of user-facing alerts (en, es, de).
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the dependency into a game's prefix if it needs it.
    Setup { app_name: String },
    /// Show whether a game needs the dependency and whether it is installed.
    Status { app_name: String },
    /// Refresh the cached installer only.
    Fetch,
    /// List games in the library.
    List,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> SetupResult<()> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let mut config = SetupConfig::load(&data_dir);
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let state = AppState::new(config, Arc::new(LogSink), Arc::new(LogAlerts))?;

    match cli.command {
        Commands::Setup { app_name } => commands::setup_dependency(&state, &app_name).await,
        Commands::Status { app_name } => {
            print_json(&commands::get_dependency_status(&state, &app_name).await?)
        }
        Commands::Fetch => {
            let outcome = commands::refresh_installer_cache(&state).await?;
            println!("{outcome:?}");
            Ok(())
        }
        Commands::List => {
            for game in commands::list_games(&state).await? {
                println!("{}\t{}\t{}", game.app_name, game.runner, game.title);
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> SetupResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
