use anyhow::Result;
use clap::Parser;

use roster::Config;
use roster::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config = Config::load(args.config.as_deref())?;

    let level = if args.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.no_color {
        colored::control::set_override(false);
    }

    log::debug!("Using database {}", config.database_url);
    cli::run(args, config).await
}
