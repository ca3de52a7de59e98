//! # Domain Models
//!
//! Types exchanged between callers, the fetcher and the inventory API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ModelCode`] | Normalized vehicle variant (`"m3"`, `"my"`) |
//! | [`QueryOptions`] | Caller filter fields plus optional variant |
//! | [`EffectiveQuery`] | Region defaults merged with caller options |
//! | [`PageQuery`] | JSON object sent for one page |
//! | [`InventoryItem`] | Listing record with an open field map |
//! | [`PageResult`] | Parsed items of one page |
//! | [`InventoryAccumulator`] | VIN-unique items across pages |

mod item;
mod model_code;
mod query;

pub use item::{InventoryAccumulator, InventoryItem, PageResult};
pub use model_code::{ModelCode, MODEL_MARKER};
pub use query::{EffectiveQuery, PageQuery, QueryOptions, MODEL_FIELD};
