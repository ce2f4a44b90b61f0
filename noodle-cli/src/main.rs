#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::Result;
use clap::Parser;
use noodle_cli::commands;
use noodle_cli::{Cli, Commands};
use noodle_common::logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = commands::load_config(&cli)?;
    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );

    match &cli.command {
        Commands::Respond(args) => {
            let output = commands::respond(&config, args).await?;
            println!("{output}");
        }
        Commands::Plot(args) => {
            let path = commands::plot(&config, args)?;
            println!("{}", commands::saved_message(&path));
        }
    }
    Ok(())
}
