use serde::Serialize;
use serde_json::{Map, Value};

use super::ModelCode;
use crate::region::RegionDefaults;

/// Field name the API expects the variant designator under.
pub const MODEL_FIELD: &str = "model";

/// Caller filter fields plus an optional variant.
///
/// Field values are forwarded to the API untouched; only `model` is interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    model: Option<ModelCode>,
    fields: Map<String, Value>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = ModelCode::parse(model);
        self
    }

    /// Adds a filter field. A string `model` field is routed through [`Self::with_model`].
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == MODEL_FIELD {
            if let Value::String(model) = &value {
                return self.with_model(model);
            }
        }

        self.fields.insert(key, value);
        self
    }

    pub fn model(&self) -> Option<&ModelCode> {
        self.model.as_ref()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Region defaults merged with caller options; sent unchanged with every page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EffectiveQuery(Map<String, Value>);

impl EffectiveQuery {
    /// Caller options override region defaults. `country` never reaches the query.
    pub fn merge(defaults: &RegionDefaults, options: &QueryOptions) -> Self {
        let mut fields = defaults.query_fields();
        for (key, value) in options.fields() {
            fields.insert(key.clone(), value.clone());
        }
        if let Some(model) = options.model() {
            fields.insert(String::from(MODEL_FIELD), Value::String(model.to_string()));
        }
        fields.remove("country");

        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// JSON object carried in the `query` URL parameter of one page request.
#[derive(Debug, Clone, Serialize)]
pub struct PageQuery<'a> {
    pub query: &'a EffectiveQuery,
    pub count: usize,
    pub offset: usize,
    #[serde(rename = "outsideOffset")]
    pub outside_offset: usize,
    #[serde(rename = "outsideSearch")]
    pub outside_search: bool,
}

impl<'a> PageQuery<'a> {
    pub fn new(query: &'a EffectiveQuery, count: usize, offset: usize) -> Self {
        Self {
            query,
            count,
            offset,
            outside_offset: offset,
            outside_search: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn defaults() -> RegionDefaults {
        RegionDefaults::new("US", "US", "en", "north america")
    }

    #[test]
    fn merge_drops_country_and_keeps_region_fields() {
        let query = EffectiveQuery::merge(&defaults(), &QueryOptions::new());

        assert_eq!(query.get("country"), None);
        assert_eq!(query.get("market"), Some(&json!("US")));
        assert_eq!(query.get("language"), Some(&json!("en")));
        assert_eq!(query.get("super_region"), Some(&json!("north america")));
    }

    #[test]
    fn caller_fields_override_defaults() {
        let options = QueryOptions::new()
            .with_field("language", "es")
            .with_field("condition", "used")
            .with_field("options", json!({ "TRIM": ["LRAWD"] }));
        let query = EffectiveQuery::merge(&defaults(), &options);

        assert_eq!(query.get("language"), Some(&json!("es")));
        assert_eq!(query.get("condition"), Some(&json!("used")));
        assert_eq!(query.get("options"), Some(&json!({ "TRIM": ["LRAWD"] })));
    }

    #[test]
    fn caller_country_is_not_forwarded() {
        let options = QueryOptions::new().with_field("country", "DE");
        let query = EffectiveQuery::merge(&defaults(), &options);

        assert_eq!(query.get("country"), None);
    }

    #[test]
    fn model_field_is_normalized() {
        let options = QueryOptions::new().with_field("model", "3");
        assert_eq!(options.model().map(ModelCode::as_str), Some("m3"));
        assert!(options.fields().get("model").is_none());

        let query = EffectiveQuery::merge(&defaults(), &options);
        assert_eq!(query.get("model"), Some(&json!("m3")));
    }

    #[test]
    fn page_query_mirrors_offset_into_outside_cursor() {
        let query = EffectiveQuery::merge(&defaults(), &QueryOptions::new().with_model("y"));
        let page = serde_json::to_value(PageQuery::new(&query, 50, 100)).expect("serializes");

        assert_eq!(page["count"], json!(50));
        assert_eq!(page["offset"], json!(100));
        assert_eq!(page["outsideOffset"], json!(100));
        assert_eq!(page["outsideSearch"], json!(true));
        assert_eq!(page["query"]["model"], json!("my"));
    }
}
