mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use env_logger::Env;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            if let Some(body) = error.body() {
                eprintln!("response body:\n{body}");
            }
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let result = commands::run(&cli).await?;
    log::info!(target: "vinventory", "command complete records={}", result.records.len());
    output::render(&result, cli.format, cli.pretty)
}
