//! Client configuration.
//!
//! [`SuiConfig`] picks the node to talk to and how the HTTP client behaves.
//! Retries configured here apply to reads only; submissions are never
//! repeated automatically.

use crate::error::{SuiError, SuiResult};
use crate::retry::RetryConfig;
use std::time::Duration;
use url::Url;

const MAINNET_RPC: &str = "https://fullnode.mainnet.sui.io:443";
const TESTNET_RPC: &str = "https://fullnode.testnet.sui.io:443";
const DEVNET_RPC: &str = "https://fullnode.devnet.sui.io:443";
const LOCALNET_RPC: &str = "http://127.0.0.1:9000";

/// HTTP connection pool settings passed to `reqwest`.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Idle connections kept per host; `None` for no limit.
    pub max_idle_per_host: Option<usize>,
    /// How long an idle connection is kept.
    pub idle_timeout: Duration,
    /// TCP keepalive interval; `None` disables it.
    pub tcp_keepalive: Option<Duration>,
    /// Disables Nagle's algorithm when set.
    pub tcp_nodelay: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: None,
            idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Some(Duration::from_secs(60)),
            tcp_nodelay: true,
        }
    }
}

impl PoolConfig {
    /// Few, short-lived connections; suits a local node.
    pub fn low_latency() -> Self {
        Self {
            max_idle_per_host: Some(8),
            idle_timeout: Duration::from_secs(30),
            tcp_keepalive: Some(Duration::from_secs(15)),
            tcp_nodelay: true,
        }
    }

    /// More idle connections kept around longer.
    pub fn high_throughput() -> Self {
        Self {
            max_idle_per_host: Some(32),
            idle_timeout: Duration::from_secs(300),
            tcp_keepalive: Some(Duration::from_secs(30)),
            tcp_nodelay: true,
        }
    }
}

/// Known Sui networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    /// Sui mainnet
    Mainnet,
    /// Sui testnet
    Testnet,
    /// Sui devnet
    Devnet,
    /// A node started with `sui start` on this machine
    Localnet,
    /// Any other endpoint
    Custom,
}

impl Network {
    /// Returns the network name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
            Network::Custom => "custom",
        }
    }
}

/// Configuration for [`Sui`](crate::Sui) and
/// [`JsonRpcClient`](crate::api::JsonRpcClient).
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sui_rust_sdk::SuiConfig;
/// use sui_rust_sdk::retry::RetryConfig;
///
/// let config = SuiConfig::testnet()
///     .with_timeout(Duration::from_secs(10))
///     .with_retry(RetryConfig::aggressive());
/// assert_eq!(config.timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct SuiConfig {
    pub(crate) network: Network,
    pub(crate) rpc_url: Url,
    pub(crate) timeout: Duration,
    pub(crate) retry_config: RetryConfig,
    pub(crate) pool_config: PoolConfig,
    pub(crate) api_key: Option<String>,
}

impl Default for SuiConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

impl SuiConfig {
    fn preset(network: Network, url: &str) -> Self {
        Self {
            network,
            rpc_url: Url::parse(url).expect("valid preset URL"),
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
            pool_config: PoolConfig::default(),
            api_key: None,
        }
    }

    /// Sui mainnet, with conservative read retries.
    pub fn mainnet() -> Self {
        Self::preset(Network::Mainnet, MAINNET_RPC).with_retry(RetryConfig::conservative())
    }

    /// Sui testnet.
    pub fn testnet() -> Self {
        Self::preset(Network::Testnet, TESTNET_RPC)
    }

    /// Sui devnet.
    pub fn devnet() -> Self {
        Self::preset(Network::Devnet, DEVNET_RPC)
    }

    /// A local node on the default port 9000.
    pub fn localnet() -> Self {
        let mut config = Self::preset(Network::Localnet, LOCALNET_RPC)
            .with_timeout(Duration::from_secs(10))
            .with_retry(RetryConfig::aggressive());
        config.pool_config = PoolConfig::low_latency();
        config
    }

    /// Any JSON-RPC endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::Url`] if `rpc_url` does not parse.
    pub fn custom(rpc_url: &str) -> SuiResult<Self> {
        Ok(Self {
            network: Network::Custom,
            rpc_url: Url::parse(rpc_url)?,
            ..Self::devnet()
        })
    }

    /// Sets the per-request timeout. Requests that exceed it surface as
    /// dispatch timeouts.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry policy for reads.
    #[must_use]
    pub fn with_retry(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Disables read retries.
    #[must_use]
    pub fn without_retry(self) -> Self {
        self.with_retry(RetryConfig::no_retry())
    }

    /// Keeps the current retry delays but changes the attempt count.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry_config.max_retries = max_retries;
        self
    }

    /// Sets the connection pool configuration.
    #[must_use]
    pub fn with_pool(mut self, pool_config: PoolConfig) -> Self {
        self.pool_config = pool_config;
        self
    }

    /// Sends `x-api-key` with every request, for hosted RPC providers.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the network.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Returns the JSON-RPC URL.
    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the read retry policy.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    /// Returns the connection pool configuration.
    pub fn pool_config(&self) -> &PoolConfig {
        &self.pool_config
    }

    /// Returns the API key, if set.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub(crate) fn validate(&self) -> SuiResult<()> {
        if self.timeout.is_zero() {
            return Err(SuiError::Config("timeout must be positive".into()));
        }
        match self.rpc_url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(SuiError::Config(format!(
                "unsupported RPC URL scheme '{other}'"
            ))),
        }
    }
}
