use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Prefix the inventory API puts in front of every model designator.
pub const MODEL_MARKER: char = 'm';

/// Normalized vehicle variant designator (`"my"`, `"m3"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ModelCode(String);

impl ModelCode {
    /// Normalize caller input: trim and prepend the marker when missing.
    ///
    /// Case is preserved, so `"Y"` becomes `"mY"` and only matches items whose
    /// `Model` is exactly `"mY"`. Returns `None` for blank input so that an
    /// empty model never becomes a filter.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.starts_with(MODEL_MARKER) {
            Some(Self(trimmed.to_owned()))
        } else {
            Some(Self(format!("{MODEL_MARKER}{trimmed}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether an item's `Model` field designates this variant.
    pub fn matches(&self, model: Option<&str>) -> bool {
        model == Some(self.as_str())
    }
}

impl Display for ModelCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ModelCode {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or(Self(value))
    }
}

impl From<ModelCode> for String {
    fn from(value: ModelCode) -> Self {
        value.0
    }
}
