//! # Sui Rust SDK
//!
//! Client-side transaction construction, signing and dispatch for Sui.
//!
//! The flow has three stages:
//!
//! 1. **Build.** [`TransactionBuilder`](transaction::TransactionBuilder)
//!    collects commands and gas settings and finalizes them into an
//!    immutable [`TransactionData`](transaction::TransactionData) with a
//!    canonical BCS encoding.
//! 2. **Sign.** A [`Signer`](signer::Signer) signs those bytes. Keys may be
//!    in memory, resolved on demand from a
//!    [`SignerProvider`](signer::SignerProvider), or gated by an operator
//!    through an [`InteractiveSigner`](signer::InteractiveSigner).
//! 3. **Dispatch.** A [`Dispatcher`](dispatch::Dispatcher) sends the bytes
//!    in Execute, DryRun or DevInspect mode and tells apart "never ran"
//!    ([`SuiError::Dispatch`]) from "ran and aborted"
//!    ([`ExecutionStatus::Failure`](dispatch::ExecutionStatus::Failure)).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sui_rust_sdk::signer::{Ed25519Keypair, Signer};
//! use sui_rust_sdk::transaction::{MoveCall, TransactionBuilder};
//! use sui_rust_sdk::{Sui, SuiConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let sui = Sui::new(SuiConfig::testnet())?;
//!     let signer = Signer::from(Ed25519Keypair::generate());
//!
//!     let mut builder = TransactionBuilder::new();
//!     let clock = sui.get_object("0x6".parse()?).await?;
//!     let clock = builder.object_from_info(&clock, false)?;
//!     builder.move_call(MoveCall::new("0x2::clock::timestamp_ms")?.arg(clock))?;
//!     builder.set_sender(signer.address())?;
//!
//!     let data = builder.finalize_for_inspection()?;
//!     let result = sui.dev_inspect(&data).await?;
//!     println!("{:?}", result.return_values);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`transaction`] - Inputs, arguments, commands and the transaction builder
//! - [`signer`] - Signer capability and signatures
//! - [`dispatch`] - Execution modes and result interpretation
//! - [`api`] - The node interface and its JSON-RPC implementation
//! - [`crypto`] - Ed25519, Blake2b and intent messages
//! - [`types`] - Addresses, object references, digests and type tags

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod api;
pub mod config;
pub mod crypto;
pub mod dispatch;
pub mod error;
pub mod retry;
pub mod signer;
pub mod transaction;
pub mod types;

mod sui;

// Re-export main entry points
pub use config::SuiConfig;
pub use error::{SuiError, SuiResult};
pub use sui::Sui;

// Re-export commonly used types
pub use types::{ObjectId, ObjectRef, SuiAddress, TransactionDigest};
