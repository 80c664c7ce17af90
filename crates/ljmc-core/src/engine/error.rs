use thiserror::Error;

use super::config::ConfigError;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration rejected: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Transport failure while distributing the initial state: {source}")]
    Setup { source: TransportError },

    #[error("Transport failure at step {step}: {source}")]
    Transport {
        step: usize,
        source: TransportError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
