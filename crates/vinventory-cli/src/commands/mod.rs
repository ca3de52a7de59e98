mod inventories;
mod search;

use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Records produced by a command plus the columns shown in table output.
pub struct CommandResult {
    pub records: Vec<Value>,
    pub columns: &'static [&'static str],
}

impl CommandResult {
    pub fn new(records: Vec<Value>, columns: &'static [&'static str]) -> Self {
        Self { records, columns }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Search(args) => search::run(args).await,
        Command::Inventories => inventories::run(),
    }
}
