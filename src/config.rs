use std::time::Duration;

use crate::core::constants::{
    DEFAULT_CONFIRM_POLL_MS, DEFAULT_CONFIRM_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_TX_MAX_AGE_SECS,
};

/// SDK configuration for connecting to the launch platform.
#[derive(Clone, Debug)]
pub struct SdkConfig {
    /// Platform API base URL
    pub api_url: String,

    /// RPC endpoint URL used for confirmation polling
    pub rpc_url: String,

    /// Confirmation commitment level ("confirmed" or "finalized")
    pub commitment: String,

    /// HTTP request timeout
    pub http_timeout: Duration,

    /// Total time to wait for a broadcast transaction to confirm
    pub confirm_timeout: Duration,

    /// Delay between signature status polls
    pub confirm_poll_interval: Duration,

    /// How long a built transaction stays usable before its blockhash
    /// lease is treated as expired
    pub tx_max_age: Duration,
}

impl SdkConfig {
    pub fn localnet() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            rpc_url: "http://localhost:8899".to_string(),
            commitment: "confirmed".to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            confirm_timeout: Duration::from_secs(DEFAULT_CONFIRM_TIMEOUT_SECS),
            confirm_poll_interval: Duration::from_millis(DEFAULT_CONFIRM_POLL_MS),
            tx_max_age: Duration::from_secs(DEFAULT_TX_MAX_AGE_SECS),
        }
    }

    pub fn mainnet(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: "confirmed".to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            confirm_timeout: Duration::from_secs(DEFAULT_CONFIRM_TIMEOUT_SECS),
            confirm_poll_interval: Duration::from_millis(DEFAULT_CONFIRM_POLL_MS),
            tx_max_age: Duration::from_secs(DEFAULT_TX_MAX_AGE_SECS),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_commitment(mut self, commitment: impl Into<String>) -> Self {
        self.commitment = commitment.into();
        self
    }

    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    pub fn with_tx_max_age(mut self, max_age: Duration) -> Self {
        self.tx_max_age = max_age;
        self
    }
}
