//! Node access.
//!
//! [`RpcClient`] is the seam between dispatch and the network. The SDK ships
//! [`JsonRpcClient`]; tests and embedders can supply their own.

mod json_rpc;
mod rpc;

pub use json_rpc::JsonRpcClient;
pub use rpc::RpcClient;
