//! Error types for the Sui SDK.
//!
//! Every fallible operation returns [`SuiResult`]. The variants follow the
//! lifecycle of a transaction: encoding and builder misuse are local
//! programming errors, signer errors can be retried by signing again, and
//! [`SuiError::Dispatch`] means the node never gave an authoritative answer.
//! An on-chain abort is *not* an error; it is reported through
//! [`ExecutionStatus::Failure`](crate::dispatch::ExecutionStatus::Failure).

use std::fmt;
use thiserror::Error;

/// A specialized Result type for Sui SDK operations.
pub type SuiResult<T> = Result<T, SuiError>;

/// Why a dispatch did not produce an authoritative answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchErrorKind {
    /// Connection refused, reset, or an unexpected HTTP status.
    Transport,
    /// The collaborator gave up waiting; the remote fate is unknown.
    Timeout,
    /// A response arrived but could not be interpreted.
    MalformedResponse,
}

impl fmt::Display for DispatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DispatchErrorKind::Transport => "transport failure",
            DispatchErrorKind::Timeout => "timeout",
            DispatchErrorKind::MalformedResponse => "malformed response",
        };
        f.write_str(s)
    }
}

/// The main error type for the Sui SDK.
#[derive(Error, Debug)]
pub enum SuiError {
    /// A pure value or reference does not fit its declared wire shape
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The builder was already finalized
    #[error("Transaction builder already finalized")]
    BuilderFinalized,

    /// A required transaction field is missing or invalid
    #[error("Incomplete transaction: {0}")]
    IncompleteTransaction(String),

    /// A `Result` argument points at a command it cannot reference
    #[error("Invalid reference in command {command}: {reason}")]
    InvalidReference {
        /// Index of the command holding the bad argument
        command: usize,
        /// Human readable description
        reason: String,
    },

    /// A command is structurally unusable (e.g. split without amounts)
    #[error("Invalid command {command}: {reason}")]
    InvalidCommand {
        /// Index of the offending command
        command: usize,
        /// Human readable description
        reason: String,
    },

    /// The signer could not be resolved or reached
    #[error("Signer unavailable: {0}")]
    SignerUnavailable(String),

    /// The operator declined the signing request
    #[error("Signing request rejected by user")]
    UserRejected,

    /// Execute and DryRun need a signature
    #[error("A signature is required for {0}")]
    MissingSignature(String),

    /// No authoritative answer was received from the node
    #[error("Dispatch failed ({kind}): {message}")]
    Dispatch {
        /// Failure category
        kind: DispatchErrorKind,
        /// Details from the transport layer
        message: String,
    },

    /// The node refused the transaction before executing it
    #[error("Transaction rejected ({code}): {message}")]
    TransactionRejected {
        /// JSON-RPC error code
        code: i64,
        /// Error message from the node
        message: String,
    },

    /// Transaction executed and aborted on chain
    #[error("Execution failed: {reason}")]
    ExecutionFailed {
        /// Abort reason reported by the node
        reason: String,
    },

    /// Transaction effects did not show up in time
    #[error("Transaction {digest} not found after {timeout_secs} seconds")]
    TransactionTimeout {
        /// Digest that was polled
        digest: String,
        /// How long we waited
        timeout_secs: u64,
    },

    /// Error occurred during HTTP communication
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error occurred during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error occurred during BCS serialization/deserialization
    #[error("BCS error: {0}")]
    Bcs(String),

    /// Error occurred during URL parsing
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Error occurred during hex encoding/decoding
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Error occurred during base64 decoding
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Invalid account address or object id
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid public key
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Invalid signature
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// API returned an error response
    #[error("API error ({status_code}): {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Object or transaction not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal SDK error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Any other error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Maximum length for error messages to prevent excessive memory usage in logs.
const MAX_ERROR_MESSAGE_LENGTH: usize = 1000;

/// Patterns that might indicate sensitive information in error messages.
const SENSITIVE_PATTERNS: &[&str] = &[
    "private_key",
    "secret",
    "password",
    "mnemonic",
    "seed",
    "bearer",
    "authorization",
];

impl SuiError {
    /// Creates a new BCS error
    pub fn bcs<E: fmt::Display>(err: E) -> Self {
        Self::Bcs(err.to_string())
    }

    /// Creates a new encoding error
    pub fn encoding<S: Into<String>>(msg: S) -> Self {
        Self::Encoding(msg.into())
    }

    /// Creates an incomplete transaction error
    pub fn incomplete<S: Into<String>>(msg: S) -> Self {
        Self::IncompleteTransaction(msg.into())
    }

    /// Creates a new API error from response details
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a dispatch error of the given kind
    pub fn dispatch(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        Self::Dispatch {
            kind,
            message: message.into(),
        }
    }

    /// Converts a transport-side error into a [`SuiError::Dispatch`].
    ///
    /// Rejections, existing dispatch errors and problems with the caller's
    /// own input (bad transaction bytes, missing signature) are returned
    /// unchanged.
    pub fn into_dispatch(self) -> Self {
        match self {
            e @ (Self::Dispatch { .. }
            | Self::TransactionRejected { .. }
            | Self::MissingSignature(_)
            | Self::Encoding(_)
            | Self::Bcs(_)) => e,
            Self::Http(e) if e.is_timeout() => {
                Self::dispatch(DispatchErrorKind::Timeout, e.to_string())
            }
            e @ Self::Api {
                status_code: 408 | 504,
                ..
            } => Self::dispatch(DispatchErrorKind::Timeout, e.to_string()),
            Self::Json(e) => Self::dispatch(DispatchErrorKind::MalformedResponse, e.to_string()),
            other => Self::dispatch(DispatchErrorKind::Transport, other.to_string()),
        }
    }

    /// Returns true if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::Api {
                    status_code: 404,
                    ..
                }
        )
    }

    /// Returns true if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::TransactionTimeout { .. }
                | Self::Dispatch {
                    kind: DispatchErrorKind::Timeout,
                    ..
                }
        )
    }

    /// Returns true if the node never gave an authoritative answer
    pub fn is_dispatch(&self) -> bool {
        matches!(self, Self::Dispatch { .. })
    }

    /// Returns true if this is a transient error that might succeed on retry.
    ///
    /// Only meaningful for reads; submissions are never retried by the SDK.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status_code, .. } => {
                matches!(status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            Self::Dispatch { kind, .. } => {
                matches!(kind, DispatchErrorKind::Transport | DispatchErrorKind::Timeout)
            }
            _ => false,
        }
    }

    /// Returns a sanitized version of the error message safe for logging.
    ///
    /// Control characters are stripped, long messages are truncated and
    /// messages that look like they carry key material are redacted.
    pub fn sanitized_message(&self) -> String {
        Self::sanitize_string(&self.to_string())
    }

    fn sanitize_string(s: &str) -> String {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect();

        let lower = cleaned.to_lowercase();
        for pattern in SENSITIVE_PATTERNS {
            if lower.contains(pattern) {
                return format!("[REDACTED: message contained sensitive pattern '{pattern}']");
            }
        }

        if cleaned.len() > MAX_ERROR_MESSAGE_LENGTH {
            let mut end = MAX_ERROR_MESSAGE_LENGTH;
            while !cleaned.is_char_boundary(end) {
                end -= 1;
            }
            format!(
                "{}... [truncated, total length: {}]",
                &cleaned[..end],
                cleaned.len()
            )
        } else {
            cleaned
        }
    }

    /// Returns the error message suitable for display to end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Encoding(_) => "Invalid transaction argument",
            Self::BuilderFinalized => "Transaction was already built",
            Self::IncompleteTransaction(_) => "Transaction is missing required fields",
            Self::InvalidReference { .. } | Self::InvalidCommand { .. } => {
                "Transaction commands are invalid"
            }
            Self::SignerUnavailable(_) => "Signer is not available",
            Self::UserRejected => "Request was rejected",
            Self::MissingSignature(_) => "Transaction is not signed",
            Self::Dispatch {
                kind: DispatchErrorKind::Timeout,
                ..
            } => "Request timed out; the transaction may or may not have executed",
            Self::Dispatch { .. } => "Could not reach the network",
            Self::TransactionRejected { .. } => "Transaction was rejected by the network",
            Self::ExecutionFailed { .. } => "Transaction execution failed",
            Self::TransactionTimeout { .. } => "Transaction timed out",
            Self::Http(_) => "Network error occurred",
            Self::Json(_) | Self::Bcs(_) | Self::Base64(_) => "Failed to process data",
            Self::Url(_) => "Invalid URL",
            Self::Hex(_) => "Invalid hex format",
            Self::InvalidAddress(_) => "Invalid address",
            Self::InvalidPublicKey(_) => "Invalid public key",
            Self::InvalidPrivateKey(_) => "Invalid private key",
            Self::InvalidSignature(_) => "Invalid signature",
            Self::SignatureVerificationFailed => "Signature verification failed",
            Self::NotFound(_)
            | Self::Api {
                status_code: 404, ..
            } => "Resource not found",
            Self::Api {
                status_code: 429, ..
            } => "Rate limit exceeded",
            Self::Api { status_code, .. } if *status_code >= 500 => "Server error",
            Self::Api { .. } => "API error",
            Self::Config(_) => "Configuration error",
            Self::Internal(_) => "Internal error",
            Self::Other(_) => "An error occurred",
        }
    }
}
