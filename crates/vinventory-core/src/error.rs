use thiserror::Error;

use crate::http_client::HttpError;

/// A single failed attempt at fetching one inventory page.
///
/// Every variant is retried by [`RetryPolicy`](crate::RetryPolicy). `Status`
/// and `Parse` keep the raw response body for diagnosis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("inventory transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("inventory upstream returned status {status}")]
    Status { status: u16, body: String },

    #[error("inventory response is not valid JSON: {message}")]
    Parse { message: String, body: String },
}

impl FetchError {
    pub(crate) fn parse(error: &serde_json::Error, body: impl Into<String>) -> Self {
        Self::Parse {
            message: error.to_string(),
            body: body.into(),
        }
    }

    /// Raw response text, when the failure happened after a body was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Transport(_) => None,
            Self::Status { body, .. } | Self::Parse { body, .. } => Some(body),
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "fetch.transport",
            Self::Status { .. } => "fetch.status",
            Self::Parse { .. } => "fetch.parse",
        }
    }
}

/// Terminal errors of an inventory fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The inventory key is not in the region registry. Raised before any request.
    #[error("inventory `{key}` not found")]
    UnknownInventory { key: String },

    /// A page kept failing after every retry; nothing accumulated so far is returned.
    #[error("inventory page at offset {offset} failed after {attempts} attempt(s): {source}")]
    Fetch {
        offset: usize,
        attempts: u32,
        #[source]
        source: FetchError,
    },

    #[error("failed to encode page query: {0}")]
    Encode(String),
}

impl InventoryError {
    pub fn unknown_inventory(key: impl Into<String>) -> Self {
        Self::UnknownInventory { key: key.into() }
    }

    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownInventory { .. })
    }

    /// Raw body of the last failed response, if one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::UnknownInventory { .. } | Self::Encode(_) => None,
            Self::Fetch { source, .. } => source.body(),
        }
    }
}
