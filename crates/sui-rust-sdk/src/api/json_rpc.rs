//! JSON-RPC 2.0 client for Sui fullnodes.

use crate::api::rpc::RpcClient;
use crate::config::SuiConfig;
use crate::dispatch::ExecutionMode;
use crate::error::{SuiError, SuiResult};
use crate::retry::{RetryConfig, RetryExecutor};
use crate::signer::Signature;
use crate::transaction::TransactionData;
use crate::types::{ObjectId, ObjectInfo, TransactionDigest};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";
const API_KEY_HEADER: &str = "x-api-key";

/// Client for a fullnode's JSON-RPC endpoint.
///
/// Reads are retried according to the config's [`RetryConfig`].
/// Submissions are sent exactly once.
///
/// # Example
///
/// ```rust,no_run
/// use sui_rust_sdk::api::{JsonRpcClient, RpcClient};
/// use sui_rust_sdk::types::ObjectId;
/// use sui_rust_sdk::SuiConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let client = JsonRpcClient::new(SuiConfig::testnet())?;
///     let clock = client.get_object(ObjectId::from_hex("0x6")?).await?;
///     println!("clock is at version {}", clock.object_ref.version);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    config: SuiConfig,
    client: Client,
    retry_config: Arc<RetryConfig>,
    request_id: Arc<AtomicU64>,
}

impl JsonRpcClient {
    /// Creates a client from `config`.
    ///
    /// TLS certificate validation is left at reqwest's defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails to
    /// build.
    pub fn new(config: SuiConfig) -> SuiResult<Self> {
        config.validate()?;
        let pool = config.pool_config();

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(pool.max_idle_per_host.unwrap_or(usize::MAX))
            .pool_idle_timeout(pool.idle_timeout)
            .tcp_nodelay(pool.tcp_nodelay);
        if let Some(keepalive) = pool.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }
        let client = builder.build().map_err(SuiError::Http)?;
        let retry_config = Arc::new(config.retry_config().clone());

        Ok(Self {
            config,
            client,
            retry_config,
            request_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Returns the endpoint URL.
    pub fn rpc_url(&self) -> &Url {
        self.config.rpc_url()
    }

    /// Returns the retry configuration used for reads.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    // === Transactions ===

    async fn execute_transaction_block(&self, tx_bytes: &[u8], signature: &Signature) -> SuiResult<Value> {
        let params = json!([
            base64::encode(tx_bytes),
            [signature.to_base64()],
            {
                "showEffects": true,
                "showEvents": true,
                "showObjectChanges": false,
            },
            "WaitForLocalExecution",
        ]);
        self.call("sui_executeTransactionBlock", params).await
    }

    async fn dry_run_transaction_block(&self, tx_bytes: &[u8]) -> SuiResult<Value> {
        self.call("sui_dryRunTransactionBlock", json!([base64::encode(tx_bytes)]))
            .await
    }

    /// DevInspect runs the command list on behalf of the sender, so only the
    /// kind, sender and gas price are sent.
    async fn dev_inspect_transaction_block(&self, tx_bytes: &[u8]) -> SuiResult<Value> {
        let data = TransactionData::from_bcs(tx_bytes)?;
        let params = json!([
            data.sender().to_hex(),
            base64::encode(data.kind().to_bcs()?),
            data.gas_data().price.to_string(),
            Value::Null,
        ]);
        self.call("sui_devInspectTransactionBlock", params).await
    }

    // === Helper Methods ===

    fn next_request(&self, method: &str, params: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": self.request_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        })
    }

    /// Sends one request with no retry.
    async fn call(&self, method: &str, params: Value) -> SuiResult<Value> {
        let body = self.next_request(method, params);
        debug!(method, "json-rpc call");
        Self::send(&self.client, self.config.rpc_url(), self.config.api_key(), &body).await
    }

    /// Sends an idempotent read, retrying transient failures.
    async fn call_read(&self, method: &str, params: Value) -> SuiResult<Value> {
        let executor = RetryExecutor::new((*self.retry_config).clone());
        executor
            .execute(|| {
                let body = self.next_request(method, params.clone());
                async move {
                    Self::send(&self.client, self.config.rpc_url(), self.config.api_key(), &body)
                        .await
                }
            })
            .await
    }

    async fn send(
        client: &Client,
        url: &Url,
        api_key: Option<&str>,
        body: &Value,
    ) -> SuiResult<Value> {
        let mut request = client
            .post(url.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .json(body);
        if let Some(key) = api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response(response: reqwest::Response) -> SuiResult<Value> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(ToString::to_string)
                })
                .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
            return Err(SuiError::api(status.as_u16(), message));
        }

        let mut body: Value = serde_json::from_slice(&bytes)?;
        if let Some(error) = body.get("error") {
            return Err(SuiError::TransactionRejected {
                code: error.get("code").and_then(Value::as_i64).unwrap_or_default(),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            });
        }
        match body.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(SuiError::Json(serde::de::Error::custom(
                "JSON-RPC response has neither result nor error",
            ))),
        }
    }
}

#[async_trait]
impl RpcClient for JsonRpcClient {
    async fn submit_transaction(
        &self,
        tx_bytes: &[u8],
        signature: Option<&Signature>,
        mode: ExecutionMode,
    ) -> SuiResult<Value> {
        match (mode, signature) {
            (ExecutionMode::Execute, Some(signature)) => {
                info!(rpc_url = %self.config.rpc_url(), "submitting transaction for execution");
                self.execute_transaction_block(tx_bytes, signature).await
            }
            (ExecutionMode::Execute, None) => Err(SuiError::MissingSignature(mode.to_string())),
            (ExecutionMode::DryRun, _) => self.dry_run_transaction_block(tx_bytes).await,
            (ExecutionMode::DevInspect, _) => self.dev_inspect_transaction_block(tx_bytes).await,
        }
    }

    async fn get_object(&self, object_id: ObjectId) -> SuiResult<ObjectInfo> {
        let params = json!([object_id.to_hex(), { "showType": true, "showOwner": true }]);
        let result = self.call_read("sui_getObject", params).await?;

        if let Some(error) = result.get("error") {
            let code = error.get("code").and_then(Value::as_str).unwrap_or("unknown");
            return Err(SuiError::NotFound(format!("object {object_id}: {code}")));
        }
        let data = result.get("data").ok_or_else(|| {
            SuiError::Json(serde::de::Error::custom("sui_getObject result has no data"))
        })?;
        ObjectInfo::from_json(data).ok_or_else(|| {
            SuiError::Json(serde::de::Error::custom(format!(
                "cannot parse object {object_id}"
            )))
        })
    }

    async fn get_transaction_effects(&self, digest: &TransactionDigest) -> SuiResult<Value> {
        let params = json!([digest.to_string(), { "showEffects": true, "showEvents": true }]);
        self.call_read("sui_getTransactionBlock", params).await
    }
}
