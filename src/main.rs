use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("diagnorm=debug")
    } else {
        EnvFilter::new("diagnorm=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Parse(args) => cli::parse::execute(args),
        Commands::Run(args) => cli::run::execute(args).await,
        Commands::Tools => cli::tools::execute(),
        Commands::Schema => cli::schema::execute(),
    }
}
