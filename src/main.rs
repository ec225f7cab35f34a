use clap::Parser;
use gdpr_advisor::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Chunk(args) => cli::chunk::run(args).await,
        Command::Build(args) => cli::build::run(args).await,
        Command::Analyze(args) => cli::analyze::run(args).await,
    }
}
