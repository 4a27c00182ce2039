//! Parsed node responses.

use crate::dispatch::abort::AbortReason;
use crate::dispatch::ExecutionMode;
use crate::error::{DispatchErrorKind, SuiError, SuiResult};
use crate::types::{ObjectRef, TransactionDigest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a transaction that ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// All commands completed.
    Success,
    /// Execution aborted; on Execute, gas was still charged.
    Failure(AbortReason),
}

impl ExecutionStatus {
    /// Returns true on success.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionStatus::Success)
    }
}

/// Gas charged for a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasCostSummary {
    /// Cost of computation.
    pub computation_cost: u64,
    /// Cost of storing new or modified objects.
    pub storage_cost: u64,
    /// Refund for storage released.
    pub storage_rebate: u64,
    /// Part of the storage fee that is never refunded.
    pub non_refundable_storage_fee: u64,
}

impl GasCostSummary {
    /// Creates a summary.
    pub fn new(computation_cost: u64, storage_cost: u64, storage_rebate: u64) -> Self {
        Self {
            computation_cost,
            storage_cost,
            storage_rebate,
            non_refundable_storage_fee: 0,
        }
    }

    /// Computation plus storage, before rebate.
    pub fn gross_cost(&self) -> u64 {
        self.computation_cost.saturating_add(self.storage_cost)
    }

    /// What the sender actually pays. Negative when the rebate exceeds the
    /// charges.
    pub fn net_cost(&self) -> i64 {
        let net = i128::from(self.gross_cost()) - i128::from(self.storage_rebate);
        i64::try_from(net).unwrap_or(if net < 0 { i64::MIN } else { i64::MAX })
    }

    fn from_json(json: &Value) -> Self {
        Self {
            computation_cost: u64_field(json, "computationCost"),
            storage_cost: u64_field(json, "storageCost"),
            storage_rebate: u64_field(json, "storageRebate"),
            non_refundable_storage_fee: u64_field(json, "nonRefundableStorageFee"),
        }
    }
}

/// Object changes and gas of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEffects {
    /// Gas charged.
    pub gas_used: GasCostSummary,
    /// Objects created.
    pub created: Vec<ObjectRef>,
    /// Objects modified, at their new versions.
    pub mutated: Vec<ObjectRef>,
    /// Objects deleted.
    pub deleted: Vec<ObjectRef>,
}

impl TransactionEffects {
    fn from_json(effects: &Value) -> Self {
        Self {
            gas_used: effects
                .get("gasUsed")
                .map(GasCostSummary::from_json)
                .unwrap_or_default(),
            created: object_refs(effects, "created"),
            mutated: object_refs(effects, "mutated"),
            deleted: object_refs(effects, "deleted"),
        }
    }
}

/// A value returned by a command under DevInspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnValue {
    /// BCS bytes of the value.
    pub bcs: Vec<u8>,
    /// Move type of the value.
    pub type_tag: String,
}

impl ReturnValue {
    /// Decodes the value.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not decode as `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> SuiResult<T> {
        bcs::from_bytes(&self.bcs).map_err(SuiError::bcs)
    }

    /// Parses the `[[bytes...], "type"]` pair nodes return.
    fn from_json(json: &Value) -> Option<Self> {
        let pair = json.as_array()?;
        let bcs = pair
            .first()?
            .as_array()?
            .iter()
            .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()?;
        let type_tag = pair.get(1)?.as_str()?.to_string();
        Some(Self { bcs, type_tag })
    }
}

/// Everything a dispatch learned about a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    /// Mode the transaction was dispatched in.
    pub mode: ExecutionMode,
    /// Digest of the dispatched bytes.
    pub digest: TransactionDigest,
    /// Success, or why it aborted.
    pub status: ExecutionStatus,
    /// Gas and object changes.
    pub effects: TransactionEffects,
    /// Emitted events, as returned by the node.
    pub events: Vec<Value>,
    /// Per-command return values; DevInspect only.
    pub return_values: Vec<Vec<ReturnValue>>,
}

impl ExecutionResult {
    /// Interprets a node response.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchErrorKind::MalformedResponse`] dispatch error if the
    /// response has no recognizable `effects.status`.
    pub fn from_json(mode: ExecutionMode, digest: TransactionDigest, response: &Value) -> SuiResult<Self> {
        let effects = response
            .get("effects")
            .ok_or_else(|| malformed("response has no effects"))?;
        let status = effects
            .get("status")
            .ok_or_else(|| malformed("effects have no status"))?;

        let status = match status.get("status").and_then(Value::as_str) {
            Some("success") => ExecutionStatus::Success,
            Some("failure") => {
                let message = status
                    .get("error")
                    .and_then(Value::as_str)
                    .or_else(|| response.get("error").and_then(Value::as_str))
                    .unwrap_or("unknown failure");
                ExecutionStatus::Failure(AbortReason::parse(message))
            }
            Some(other) => return Err(malformed(format!("unknown execution status '{other}'"))),
            None => return Err(malformed("execution status is missing")),
        };

        let events = response
            .get("events")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let return_values = response
            .get("results")
            .and_then(Value::as_array)
            .map(|results| {
                results
                    .iter()
                    .map(|result| {
                        result
                            .get("returnValues")
                            .and_then(Value::as_array)
                            .map(|values| values.iter().filter_map(ReturnValue::from_json).collect())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            mode,
            digest,
            status,
            effects: TransactionEffects::from_json(effects),
            events,
            return_values,
        })
    }

    /// Returns true if the transaction succeeded.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The abort reason, if the transaction failed.
    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match &self.status {
            ExecutionStatus::Failure(reason) => Some(reason),
            ExecutionStatus::Success => None,
        }
    }

    /// Turns a failure into [`SuiError::ExecutionFailed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the status is [`ExecutionStatus::Failure`].
    pub fn into_success(self) -> SuiResult<Self> {
        match &self.status {
            ExecutionStatus::Success => Ok(self),
            ExecutionStatus::Failure(reason) => Err(SuiError::ExecutionFailed {
                reason: reason.to_string(),
            }),
        }
    }
}

fn malformed(message: impl Into<String>) -> SuiError {
    SuiError::dispatch(DispatchErrorKind::MalformedResponse, message)
}

/// Gas amounts arrive as decimal strings; plain numbers are accepted too.
fn u64_field(json: &Value, key: &str) -> u64 {
    json.get(key)
        .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
        .unwrap_or(0)
}

/// Created and mutated entries wrap the ref in `reference`; deleted ones don't.
fn object_refs(effects: &Value, key: &str) -> Vec<ObjectRef> {
    effects
        .get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    ObjectRef::from_json(entry.get("reference").unwrap_or(entry))
                })
                .collect()
        })
        .unwrap_or_default()
}
