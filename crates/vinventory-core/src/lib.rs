//! # vinventory core
//!
//! Fetches the vendor's public vehicle inventory for one regional catalog,
//! page by page, keeps one record per VIN and returns the listings of the
//! requested model.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Per-call fetch configuration and transport options |
//! | [`domain`] | Query, item and page types |
//! | [`error`] | Configuration and fetch errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`inventory`] | Pagination, deduplication and model filter |
//! | [`region`] | Inventory key to region defaults |
//! | [`retry`] | Retry policy, backoff and failed-attempt hook |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vinventory_core::{FetchConfig, InventoryClient, QueryOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = InventoryClient::default();
//!     let options = QueryOptions::new().with_model("y").with_field("condition", "new");
//!
//!     let items = client
//!         .fetch_inventory("us", options, &FetchConfig::default())
//!         .await?;
//!
//!     for item in &items {
//!         println!("{}", item.vin().unwrap_or("-"));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ InventoryClient │────▶│ RegionRegistry   │
//! └────────┬────────┘     └──────────────────┘
//!          │ plan
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ InventorySearch │────▶│ RetryPolicy      │
//! │ (page loop)     │     └────────┬─────────┘
//! └────────┬────────┘              ▼
//!          │              ┌──────────────────┐
//!          │              │ HttpClient       │
//!          ▼              │ (reqwest/fake)   │
//! ┌─────────────────┐     └──────────────────┘
//! │ Accumulator     │
//! │ (unique by VIN) │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use vinventory_core::InventoryError;
//!
//! fn describe(error: &InventoryError) -> String {
//!     match error {
//!         InventoryError::UnknownInventory { key } => format!("no such inventory: {key}"),
//!         InventoryError::Fetch { source, .. } => match source.body() {
//!             Some(body) => format!("{error}\n{body}"),
//!             None => error.to_string(),
//!         },
//!         InventoryError::Encode(_) => error.to_string(),
//!     }
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod inventory;
pub mod region;
pub mod retry;

pub use config::{FetchConfig, TransportOptions};

pub use domain::{
    EffectiveQuery, InventoryAccumulator, InventoryItem, ModelCode, PageQuery, PageResult,
    QueryOptions, MODEL_FIELD, MODEL_MARKER,
};

pub use error::{FetchError, InventoryError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use inventory::{ApiDomain, InventoryClient, InventorySearch, ITEMS_PER_PAGE};

pub use region::{RegionDefaults, RegionRegistry};

pub use retry::{
    ignore_failed_attempt, log_failed_attempt, Backoff, FailedAttempt, FailedAttemptHook,
    RetryExhausted, RetryPolicy,
};
