//! Paginated, VIN-deduplicated inventory fetcher.
//!
//! A call resolves the inventory key, then requests pages of
//! [`ITEMS_PER_PAGE`] items one after another. The next offset is always the
//! number of unique items collected so far, so duplicates that straddle a page
//! boundary never hide unseen records. The loop ends on the first short or
//! empty page. Any page that still fails after its retries fails the whole
//! call.

use std::sync::Arc;
use std::time::Instant;

use crate::config::FetchConfig;
use crate::domain::{
    EffectiveQuery, InventoryAccumulator, InventoryItem, ModelCode, PageQuery, PageResult,
    QueryOptions,
};
use crate::error::{FetchError, InventoryError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::region::{normalize_key, RegionRegistry};

/// Page size requested from the API.
pub const ITEMS_PER_PAGE: usize = 50;

const VENDOR: &str = "tesla";
const RESULTS_PATH: &str = "/inventory/api/v4/inventory-results";

/// API host family. Only the `cn` inventory is served from the `.cn` domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiDomain {
    China,
    Global,
}

impl ApiDomain {
    pub fn for_inventory(inventory: &str) -> Self {
        if normalize_key(inventory) == "cn" {
            Self::China
        } else {
            Self::Global
        }
    }

    pub const fn tld(self) -> &'static str {
        match self {
            Self::China => "cn",
            Self::Global => "com",
        }
    }

    pub fn endpoint(self) -> String {
        format!("https://www.{VENDOR}.{}{RESULTS_PATH}", self.tld())
    }
}

/// Entry point for inventory searches.
#[derive(Clone)]
pub struct InventoryClient {
    http_client: Arc<dyn HttpClient>,
    registry: Arc<RegionRegistry>,
}

impl Default for InventoryClient {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()))
    }
}

impl InventoryClient {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            registry: Arc::new(RegionRegistry::builtin()),
        }
    }

    pub fn with_registry(mut self, registry: RegionRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Resolves the inventory and builds the query without touching the network.
    ///
    /// # Errors
    ///
    /// [`InventoryError::UnknownInventory`] when the key is not registered.
    pub fn plan(
        &self,
        inventory: &str,
        options: QueryOptions,
    ) -> Result<InventorySearch, InventoryError> {
        let defaults = self
            .registry
            .lookup(inventory)
            .ok_or_else(|| InventoryError::unknown_inventory(inventory))?;

        Ok(InventorySearch {
            inventory: normalize_key(inventory),
            domain: ApiDomain::for_inventory(inventory),
            query: EffectiveQuery::merge(defaults, &options),
            model: options.model().cloned(),
        })
    }

    /// Fetches every page of `inventory` and returns the items of the requested model.
    ///
    /// Without a model, every unique item is returned.
    pub async fn fetch_inventory(
        &self,
        inventory: &str,
        options: QueryOptions,
        config: &FetchConfig,
    ) -> Result<Vec<InventoryItem>, InventoryError> {
        let search = self.plan(inventory, options)?;
        search.run(self.http_client.as_ref(), config).await
    }
}

/// A validated search, ready to paginate.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySearch {
    inventory: String,
    domain: ApiDomain,
    query: EffectiveQuery,
    model: Option<ModelCode>,
}

impl InventorySearch {
    pub fn inventory(&self) -> &str {
        &self.inventory
    }

    pub const fn domain(&self) -> ApiDomain {
        self.domain
    }

    pub fn query(&self) -> &EffectiveQuery {
        &self.query
    }

    pub fn model(&self) -> Option<&ModelCode> {
        self.model.as_ref()
    }

    /// Request URL for the page starting at `offset`.
    pub fn page_url(&self, offset: usize) -> Result<String, InventoryError> {
        let page = PageQuery::new(&self.query, ITEMS_PER_PAGE, offset);
        let encoded = serde_json::to_string(&page)
            .map_err(|error| InventoryError::Encode(error.to_string()))?;

        Ok(format!(
            "{}?query={}",
            self.domain.endpoint(),
            urlencoding::encode(&encoded)
        ))
    }

    /// Paginates until a short page, then applies the model filter.
    pub async fn run(
        &self,
        http_client: &dyn HttpClient,
        config: &FetchConfig,
    ) -> Result<Vec<InventoryItem>, InventoryError> {
        let started = Instant::now();
        let mut accumulator = InventoryAccumulator::new();
        let mut pages = 0_usize;

        loop {
            let offset = accumulator.len();
            let page = self.fetch_page(http_client, config, offset).await?;
            pages += 1;

            let fetched = page.len();
            let added = accumulator.extend(page.items);
            if fetched < ITEMS_PER_PAGE {
                break;
            }
            if added == 0 {
                log::debug!(
                    target: "vinventory",
                    "inventory={} offset={offset} full page held no new VIN, stopping",
                    self.inventory
                );
                break;
            }
        }

        let unique = accumulator.len();
        let items: Vec<InventoryItem> = accumulator
            .into_items()
            .into_iter()
            .filter(|item| self.keeps(item))
            .collect();

        log::info!(
            target: "vinventory",
            "inventory={} model={} pages={pages} unique={unique} items={} duration={}ms",
            self.inventory,
            self.model.as_ref().map_or("*", ModelCode::as_str),
            items.len(),
            started.elapsed().as_millis()
        );

        Ok(items)
    }

    fn keeps(&self, item: &InventoryItem) -> bool {
        self.model
            .as_ref()
            .map_or(true, |model| model.matches(item.model()))
    }

    async fn fetch_page(
        &self,
        http_client: &dyn HttpClient,
        config: &FetchConfig,
        offset: usize,
    ) -> Result<PageResult, InventoryError> {
        let url = self.page_url(offset)?;
        log::debug!(
            target: "vinventory",
            "url={url} offset={offset} query={}",
            serde_json::to_string(&self.query).unwrap_or_default()
        );

        config
            .retry
            .run(&config.on_failed_attempt, |_| {
                request_page(
                    http_client,
                    config.transport.apply(HttpRequest::get(url.as_str())),
                )
            })
            .await
            .map_err(|exhausted| InventoryError::Fetch {
                offset,
                attempts: exhausted.attempts,
                source: exhausted.error,
            })
    }
}

async fn request_page(
    http_client: &dyn HttpClient,
    request: HttpRequest,
) -> Result<PageResult, FetchError> {
    let response = http_client.execute(request).await?;
    if !response.is_success() {
        return Err(FetchError::Status {
            status: response.status,
            body: response.body,
        });
    }

    PageResult::from_body(&response.body)
}
