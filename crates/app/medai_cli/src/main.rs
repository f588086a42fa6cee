// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use medai_core::config::WidgetConfig;

mod chat;
mod cli;
mod commands;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init()?;

    let args = Cli::parse();
    let config = WidgetConfig::from_env();
    log::debug!("{config:?}");

    match &args.command {
        Commands::Ask {
            message,
            session,
            json,
            query_string,
        } => commands::ask(&config, message, session, *json, *query_string)?,
        Commands::Chat { session, no_delay } => commands::chat(&config, session, *no_delay)?,
        Commands::Problem { name, dictionary } => {
            commands::problem(&config, name, dictionary.as_ref())?
        }
        Commands::Equivalent {
            medicine,
            from,
            to,
            json,
        } => commands::equivalent(from, to, medicine, *json)?,
        Commands::Prompt { message, session } => commands::prompt(&config, message, session)?,
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
