use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ladle")]
#[command(
    author,
    version,
    about = "A small GraphQL backend for recipes and their ordered steps"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true, default_value = "ladle.toml")]
    pub config: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write JSON logs to this file in addition to stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the GraphQL server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long, env = "LADLE_PORT")]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(long, env = "LADLE_BIND")]
        bind: Option<String>,

        /// Database URL (overrides config)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,
    },

    /// Print the GraphQL SDL and exit
    Schema,
}
