use thiserror::Error;

use super::config::ConfigError;
use crate::core::charges::ChargeError;
use crate::core::geometry::embed::EmbedError;
use crate::core::io::sdf::SdfError;

/// A fatal analysis failure. Its `Display` text is the single message reported to callers.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to parse SDF into a molecule: {source}")]
    Parse {
        #[from]
        source: SdfError,
    },

    #[error("Unable to generate 3D conformer: {source}")]
    Conformer {
        #[from]
        source: EmbedError,
    },

    #[error("Failed to compute Gasteiger charges: {source}")]
    Charges {
        #[from]
        source: ChargeError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}

impl EngineError {
    /// Whether the failure lies in the request itself rather than in analysing it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::Parse { .. })
    }
}
