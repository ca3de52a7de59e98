use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use vinventory_core::{
    FetchConfig, HttpClient, InventoryClient, QueryOptions, ReqwestHttpClient, TransportOptions,
    MODEL_FIELD,
};

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandResult;

const COLUMNS: &[&str] = &["VIN", "Model", "Year", "TrimName", "Price", "City"];

pub async fn run(args: &SearchArgs) -> Result<CommandResult, CliError> {
    let options = query_options(args)?;
    let config = fetch_config(args)?;
    let client = InventoryClient::new(http_client(args)?);

    let items = client
        .fetch_inventory(&args.inventory, options, &config)
        .await?;

    let records = items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CommandResult::new(records, COLUMNS))
}

fn query_options(args: &SearchArgs) -> Result<QueryOptions, CliError> {
    let mut options = QueryOptions::new().with_field("condition", args.condition.as_str());

    if let Some(arrange_by) = &args.arrange_by {
        options = options.with_field("arrangeby", arrange_by.as_str());
    }
    if let Some(order) = args.order {
        options = options.with_field("order", order.as_str());
    }

    for raw in &args.fields {
        let (key, value) = parse_field(raw)?;
        options = options.with_field(key, value);
    }

    // --model wins over --field model=...
    if let Some(model) = &args.model {
        options = options.with_model(model);
    }

    Ok(options)
}

fn fetch_config(args: &SearchArgs) -> Result<FetchConfig, CliError> {
    let mut transport = TransportOptions::default();
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        transport = transport.with_header(name, value);
    }
    if let Some(user_agent) = &args.user_agent {
        transport = transport.with_header("user-agent", user_agent.as_str());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        if timeout_ms == 0 {
            return Err(CliError::Argument(String::from(
                "--timeout-ms must be greater than zero",
            )));
        }
        transport = transport.with_timeout(Duration::from_millis(timeout_ms));
    }

    Ok(FetchConfig::default()
        .with_retries(args.retries)
        .with_randomized_backoff(args.jitter)
        .with_transport(transport))
}

fn http_client(args: &SearchArgs) -> Result<Arc<dyn HttpClient>, CliError> {
    match &args.proxy {
        Some(proxy) => Ok(Arc::new(ReqwestHttpClient::with_proxy(proxy)?)),
        None => Ok(Arc::new(ReqwestHttpClient::new())),
    }
}

/// `KEY=VALUE`; VALUE is JSON when it parses as JSON, a plain string otherwise.
/// `model` always stays a string so that `model=3` is normalized like `--model 3`.
fn parse_field(raw: &str) -> Result<(String, Value), CliError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::Argument(format!("--field expects KEY=VALUE, got '{raw}'")))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::Argument(format!("--field has an empty key: '{raw}'")));
    }

    let value = if key == MODEL_FIELD {
        Value::String(value.to_owned())
    } else {
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()))
    };

    Ok((key.to_owned(), value))
}

fn parse_header(raw: &str) -> Result<(String, String), CliError> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| CliError::Argument(format!("--header expects NAME:VALUE, got '{raw}'")))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Argument(format!("--header has an empty name: '{raw}'")));
    }

    Ok((name.to_owned(), value.trim().to_owned()))
}
