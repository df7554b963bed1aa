use anyhow::{Context, Result};
use clap::Parser;

use ladle::cli::handlers::{self, CommandContext};
use ladle::cli::{Cli, Commands};
use ladle::config::LadleConfig;
use ladle::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_file.clone());

    let config =
        LadleConfig::load(&cli.config).context("Failed to load ladle configuration")?;
    let ctx = CommandContext { config };

    match cli.command {
        Commands::Serve {
            port,
            bind,
            database_url,
        } => handlers::handle_serve(ctx, port, bind, database_url),
        Commands::Schema => handlers::handle_schema(),
    }
}
