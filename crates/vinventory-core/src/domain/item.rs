use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FetchError;

const VIN_FIELD: &str = "VIN";
const MODEL_FIELD: &str = "Model";

/// One vehicle listing as returned by the inventory API.
///
/// The record is kept exactly as received. `VIN` and `Model` are read when
/// they are strings; any other shape is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryItem {
    fields: Map<String, Value>,
}

impl InventoryItem {
    pub fn new(vin: impl Into<String>, model: impl Into<String>) -> Self {
        Self::default()
            .with_field(VIN_FIELD, vin.into())
            .with_field(MODEL_FIELD, model.into())
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn vin(&self) -> Option<&str> {
        self.field(VIN_FIELD).and_then(Value::as_str)
    }

    pub fn model(&self) -> Option<&str> {
        self.field(MODEL_FIELD).and_then(Value::as_str)
    }

    /// Any field of the record, including `VIN` and `Model`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Dedup identity: the raw `VIN` value, so `"1"` and `1` stay distinct.
    fn identity(&self) -> Option<String> {
        self.field(VIN_FIELD).map(Value::to_string)
    }
}

/// Parsed response for one offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub items: Vec<InventoryItem>,
    fetched: usize,
}

impl PageResult {
    /// Parses a response body.
    ///
    /// Only a body that is not JSON fails. A missing, `null` or non-array
    /// `results` is an empty page; array entries that are not objects are
    /// counted but skipped.
    pub fn from_body(body: &str) -> Result<Self, FetchError> {
        let mut raw: Value =
            serde_json::from_str(body).map_err(|error| FetchError::parse(&error, body))?;

        let results = match raw.get_mut("results").map(Value::take) {
            Some(Value::Array(results)) => results,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                log::debug!(
                    target: "vinventory",
                    "results is not an array, treating page as empty kind={}",
                    value_kind(&other)
                );
                Vec::new()
            }
        };

        let fetched = results.len();
        let items = results
            .into_iter()
            .filter_map(|record| match record {
                Value::Object(fields) => Some(InventoryItem { fields }),
                other => {
                    log::debug!(
                        target: "vinventory",
                        "skipping result that is not an object kind={}",
                        value_kind(&other)
                    );
                    None
                }
            })
            .collect();

        Ok(Self { items, fetched })
    }

    /// Raw number of entries in `results`, skipped ones included.
    pub fn len(&self) -> usize {
        self.fetched
    }

    pub fn is_empty(&self) -> bool {
        self.fetched == 0
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Items seen so far, unique by VIN, in first-seen order.
///
/// Identity is the raw `VIN` value. Records without a VIN share one identity,
/// so only the first one is kept.
#[derive(Debug, Default)]
pub struct InventoryAccumulator {
    items: Vec<InventoryItem>,
    seen: HashSet<Option<String>>,
}

impl InventoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unseen items and returns how many were new.
    pub fn extend(&mut self, page: Vec<InventoryItem>) -> usize {
        let before = self.items.len();
        for item in page {
            if self.seen.insert(item.identity()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<InventoryItem> {
        self.items
    }
}
