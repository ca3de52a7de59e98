//! CLI argument definitions for vinventory.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Fetch every listing of one inventory, filtered by model |
//! | `inventories` | List the known inventory keys |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! # Every new Model Y in the US inventory
//! vinventory search us --model y
//!
//! # Used Model 3 in Germany, cheapest first, as a table
//! vinventory search de --model 3 --condition used --arrange-by Price --order asc --format table
//!
//! # Extra filter fields are forwarded as-is (JSON values allowed)
//! vinventory search us --model s --field 'options={"TRIM":["LRAWD"]}'
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Vehicle inventory search across regional catalogs.
#[derive(Debug, Parser)]
#[command(
    name = "vinventory",
    author,
    version,
    about = "Vehicle inventory search across regional catalogs",
    long_about = "vinventory pages through the public inventory search of a regional \
catalog, keeps one listing per VIN and prints the listings of the requested model.\n\
\n\
Set RUST_LOG=vinventory=debug to see every page request."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON array (default)
    /// - ndjson: One JSON object per line
    /// - table: Fixed columns for terminal display
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed columns for terminal display.
    Table,
    /// Single JSON array.
    Json,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch all listings of an inventory.
    ///
    /// # Examples
    ///
    ///   vinventory search us --model y
    ///   vinventory search cn --model 3 --format table
    Search(SearchArgs),

    /// List known inventory keys with their region defaults.
    Inventories,
}

/// Vehicle condition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
        }
    }
}

/// Sort direction for `--arrange-by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Arguments for the `search` command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Inventory key (e.g., us, de, cn). See `vinventory inventories`.
    pub inventory: String,

    /// Model to keep (e.g., 3, y, m3, my). Without it every listing is printed.
    #[arg(long, short)]
    pub model: Option<String>,

    /// New or used inventory.
    #[arg(long, value_enum, default_value_t = Condition::New)]
    pub condition: Condition,

    /// Field the API sorts by (e.g., Price, Year, Odometer).
    #[arg(long)]
    pub arrange_by: Option<String>,

    /// Sort direction.
    #[arg(long, value_enum)]
    pub order: Option<SortOrder>,

    /// Extra query field, repeatable. VALUE is parsed as JSON when possible.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Retry attempts per page after the first failure.
    #[arg(long, default_value_t = 2)]
    pub retries: u32,

    /// Randomize the delay between retries (1x to 2x the backoff).
    #[arg(long, default_value_t = false)]
    pub jitter: bool,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Extra request header, repeatable.
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Proxy URL for every request.
    #[arg(long)]
    pub proxy: Option<String>,

    /// User agent sent with every request.
    #[arg(long)]
    pub user_agent: Option<String>,
}
