use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Inventory(#[from] vinventory_core::InventoryError),

    #[error("invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Transport(#[from] vinventory_core::HttpError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Inventory(error) if error.is_configuration() => 2,
            Self::Inventory(_) => 3,
            Self::Argument(_) => 2,
            Self::Transport(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }

    /// Raw upstream body worth showing next to the message, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Inventory(error) => error.body(),
            _ => None,
        }
    }
}
