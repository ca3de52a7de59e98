use serde_json::json;

use vinventory_core::RegionRegistry;

use crate::error::CliError;

use super::CommandResult;

const COLUMNS: &[&str] = &["key", "country", "market", "language", "super_region"];

pub fn run() -> Result<CommandResult, CliError> {
    let registry = RegionRegistry::builtin();
    let records = registry
        .iter()
        .map(|(key, defaults)| {
            json!({
                "key": key,
                "country": defaults.country,
                "market": defaults.market,
                "language": defaults.language,
                "super_region": defaults.super_region,
            })
        })
        .collect();

    Ok(CommandResult::new(records, COLUMNS))
}
