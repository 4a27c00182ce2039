//! Behavioral tests for the SDK.
//!
//! These tests drive the build, sign and dispatch flow end to end against
//! stub node clients, without requiring a live network.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use sui_rust_sdk::api::RpcClient;
use sui_rust_sdk::dispatch::ExecutionMode;
use sui_rust_sdk::signer::Signature;
use sui_rust_sdk::types::{ObjectDigest, ObjectId, ObjectInfo, ObjectRef, SuiAddress, TypeTag};
use sui_rust_sdk::{SuiResult, TransactionDigest};

/// Node stub that replays canned responses and records every submission.
#[derive(Default)]
struct ScriptedRpc {
    responses: Mutex<Vec<SuiResult<Value>>>,
    submissions: Mutex<Vec<(Vec<u8>, bool, ExecutionMode)>>,
    reads: AtomicUsize,
}

impl ScriptedRpc {
    fn replying(response: Value) -> Self {
        Self {
            responses: Mutex::new(vec![Ok(response)]),
            ..Self::default()
        }
    }

    fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl RpcClient for ScriptedRpc {
    async fn submit_transaction(
        &self,
        tx_bytes: &[u8],
        signature: Option<&Signature>,
        mode: ExecutionMode,
    ) -> SuiResult<Value> {
        self.submissions
            .lock()
            .unwrap()
            .push((tx_bytes.to_vec(), signature.is_some(), mode));
        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "unexpected submission");
        responses.remove(0)
    }

    async fn get_object(&self, object_id: ObjectId) -> SuiResult<ObjectInfo> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(sui_rust_sdk::SuiError::NotFound(object_id.to_string()))
    }

    async fn get_transaction_effects(&self, digest: &TransactionDigest) -> SuiResult<Value> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(sui_rust_sdk::SuiError::NotFound(digest.to_string()))
    }
}

fn gas_coin() -> ObjectRef {
    ObjectRef::new(
        ObjectId::from_hex("0x5e11").unwrap(),
        12,
        ObjectDigest::new([0x42; 32]),
    )
}

fn success_effects() -> Value {
    json!({
        "effects": {
            "status": { "status": "success" },
            "gasUsed": {
                "computationCost": "750000",
                "storageCost": "1976000",
                "storageRebate": "978120",
                "nonRefundableStorageFee": "9880"
            },
            "created": [{
                "owner": { "AddressOwner": "0xa11ce" },
                "reference": {
                    "objectId": "0xc0c0",
                    "version": "13",
                    "digest": format!("0x{}", "ab".repeat(32))
                }
            }],
            "mutated": [{
                "owner": { "AddressOwner": "0xa11ce" },
                "reference": {
                    "objectId": "0x5e11",
                    "version": "13",
                    "digest": format!("0x{}", "cd".repeat(32))
                }
            }]
        },
        "events": []
    })
}

mod encoding_tests {
    use super::*;
    use sui_rust_sdk::transaction::{encode_pure, PureType};

    #[test]
    fn test_encode_pure_is_deterministic() {
        let cases = [
            (json!(1_000_000u64), PureType::U64),
            (json!("340282366920938463463374607431768211455"), PureType::U128),
            (json!("0xa11ce"), PureType::Address),
            (json!("hello sui"), PureType::String),
            (json!([1, 2, 3]), PureType::vector(PureType::U16)),
            (json!(null), PureType::option(PureType::Bool)),
        ];
        for (value, ty) in &cases {
            let first = encode_pure(value, ty).unwrap();
            let second = encode_pure(value, ty).unwrap();
            assert_eq!(first, second, "{ty:?}");
        }
    }

    #[test]
    fn test_typed_and_serde_encodings_agree() {
        assert_eq!(
            encode_pure(&json!(42), &PureType::U64).unwrap(),
            bcs::to_bytes(&42u64).unwrap()
        );

        let address = SuiAddress::from_hex("0xa11ce").unwrap();
        assert_eq!(
            encode_pure(&json!("0xa11ce"), &PureType::Address).unwrap(),
            bcs::to_bytes(&address).unwrap()
        );
    }

    #[test]
    fn test_value_of_wrong_shape_is_rejected() {
        assert!(encode_pure(&json!(256), &PureType::U8).is_err());
        assert!(encode_pure(&json!("abc"), &PureType::U64).is_err());
        assert!(encode_pure(&json!(true), &PureType::Address).is_err());
    }
}

mod builder_tests {
    use super::*;
    use sui_rust_sdk::transaction::{
        Argument, CallArg, MoveCall, ObjectArg, TransactionBuilder, TransactionData,
    };
    use sui_rust_sdk::types::Owner;
    use sui_rust_sdk::SuiError;

    fn with_gas(builder: &mut TransactionBuilder) {
        builder
            .set_sender(SuiAddress::from_hex("0xa11ce").unwrap())
            .unwrap()
            .set_gas_payment(vec![gas_coin()])
            .unwrap()
            .set_gas_budget(10_000_000)
            .unwrap()
            .set_gas_price(1_000)
            .unwrap();
    }

    #[test]
    fn test_forward_reference_is_rejected() {
        let mut builder = TransactionBuilder::new();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        // Command 0 uses the output of command 1.
        builder
            .transfer_objects([Argument::nested_result(1, 0)], recipient)
            .unwrap();
        let amount = builder.pure(&5u64).unwrap();
        builder.split_coins(builder.gas(), [amount]).unwrap();
        with_gas(&mut builder);

        assert!(matches!(
            builder.finalize(),
            Err(SuiError::InvalidReference { command: 0, .. })
        ));
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let mut builder = TransactionBuilder::new();
        builder
            .merge_coins(builder.gas(), [Argument::result(0)])
            .unwrap();
        with_gas(&mut builder);
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::InvalidReference { command: 0, .. })
        ));
    }

    #[test]
    fn test_out_of_range_output_is_rejected() {
        let mut builder = TransactionBuilder::new();
        let amounts = [builder.pure(&1u64).unwrap(), builder.pure(&2u64).unwrap()];
        let coins = builder.split_coins(builder.gas(), amounts).unwrap();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder
            .transfer_objects([coins.nested(0), coins.nested(2)], recipient)
            .unwrap();
        with_gas(&mut builder);
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::InvalidReference { command: 1, .. })
        ));
    }

    #[test]
    fn test_backward_references_are_accepted() {
        let mut builder = TransactionBuilder::new();
        let amounts = [builder.pure(&1u64).unwrap(), builder.pure(&2u64).unwrap()];
        let coins = builder.split_coins(builder.gas(), amounts).unwrap();
        builder
            .merge_coins(coins.nested(0), [coins.nested(1)])
            .unwrap();
        let value = builder
            .move_call(MoveCall::new("0x2::coin::value").unwrap().type_arg(TypeTag::sui()).arg(coins.nested(0)))
            .unwrap();
        assert_eq!(value.index(), 2);
        with_gas(&mut builder);
        assert_eq!(builder.finalize().unwrap().kind().commands().len(), 3);
    }

    #[test]
    fn test_transaction_bytes_use_the_node_layout() {
        let mut builder = TransactionBuilder::new();
        let amount = builder.pure(&10u64).unwrap();
        let coins = builder.split_coins(builder.gas(), [amount]).unwrap();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder
            .transfer_objects([coins.nested(0)], recipient)
            .unwrap();
        with_gas(&mut builder);
        let bytes = builder.finalize().unwrap().to_bcs().unwrap();

        // V1, ProgrammableTransaction, two inputs, Pure(10u64)
        assert_eq!(&bytes[..5], &[0, 0, 2, 0, 8]);
        let commands_at = 3 + 10 + 34;
        assert_eq!(
            &bytes[commands_at..commands_at + 17],
            &[2, 2, 0, 1, 1, 0, 0, 1, 1, 3, 0, 0, 0, 0, 1, 1, 0]
        );
    }

    #[test]
    fn test_clock_is_a_shared_input() {
        let clock = ObjectInfo {
            object_ref: ObjectRef::new(
                ObjectId::from_hex("0x6").unwrap(),
                1_204,
                ObjectDigest::new([6; 32]),
            ),
            type_: Some("0x2::clock::Clock".to_string()),
            owner: Some(Owner::Shared {
                initial_shared_version: 1,
            }),
        };
        let mut builder = TransactionBuilder::new();
        let clock = builder.object_from_info(&clock, false).unwrap();
        builder
            .move_call(MoveCall::new("0x2::clock::timestamp_ms").unwrap().arg(clock))
            .unwrap();
        builder.set_sender(SuiAddress::ONE).unwrap();
        let data = builder.finalize_for_inspection().unwrap();

        assert_eq!(
            data.kind().inputs(),
            &[CallArg::Object(ObjectArg::SharedObject {
                id: ObjectId::from_hex("0x6").unwrap(),
                initial_shared_version: 1,
                mutable: false,
            })]
        );
    }

    #[test]
    fn test_finalize_only_once() {
        let mut builder = TransactionBuilder::new();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder.transfer_objects([builder.gas()], recipient).unwrap();
        with_gas(&mut builder);

        let data = builder.finalize().unwrap();
        assert!(builder.is_finalized());
        assert!(matches!(builder.finalize(), Err(SuiError::BuilderFinalized)));
        assert!(matches!(
            builder.set_gas_budget(1),
            Err(SuiError::BuilderFinalized)
        ));
        assert!(matches!(
            builder.split_coins(builder.gas(), Vec::<Argument>::new()),
            Err(SuiError::BuilderFinalized)
        ));
        // The data handed out is unaffected by the refused calls.
        assert_eq!(data.gas_data().budget, 10_000_000);
    }

    #[test]
    fn test_last_setter_wins() {
        let mut builder = TransactionBuilder::new();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder.transfer_objects([builder.gas()], recipient).unwrap();
        with_gas(&mut builder);
        builder.set_gas_budget(7_000_000).unwrap();
        builder.set_gas_price(750).unwrap();

        let data = builder.finalize().unwrap();
        assert_eq!(data.gas_data().budget, 7_000_000);
        assert_eq!(data.gas_data().price, 750);
        assert_eq!(data.gas_data().owner, data.sender());
    }

    #[test]
    fn test_incomplete_transaction() {
        let mut builder = TransactionBuilder::new();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder.transfer_objects([builder.gas()], recipient).unwrap();
        builder.set_sender(SuiAddress::ONE).unwrap();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::IncompleteTransaction(_))
        ));
        // Inspection only needs the sender.
        assert!(builder.finalize_for_inspection().is_ok());
    }

    #[test]
    fn test_bcs_round_trip() {
        let mut builder = TransactionBuilder::new();
        let amount = builder.pure(&1_000u64).unwrap();
        let coin = builder.split_coins(builder.gas(), [amount]).unwrap();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder
            .transfer_objects([coin.nested(0)], recipient)
            .unwrap();
        with_gas(&mut builder);

        let data = builder.finalize().unwrap();
        let bytes = data.to_bcs().unwrap();
        let decoded = TransactionData::from_bcs(&bytes).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(decoded.to_bcs().unwrap(), bytes);
        assert_eq!(decoded.digest().unwrap(), data.digest().unwrap());
    }
}

mod dispatch_tests {
    use super::*;
    use sui_rust_sdk::dispatch::{AbortCategory, Dispatcher, ExecutionStatus};
    use sui_rust_sdk::error::DispatchErrorKind;
    use sui_rust_sdk::signer::{Ed25519Keypair, ReadySigner};
    use sui_rust_sdk::transaction::{MoveCall, TransactionBuilder, TransactionData};
    use sui_rust_sdk::SuiError;

    fn split_and_transfer(keypair: &Ed25519Keypair) -> TransactionData {
        let mut builder = TransactionBuilder::new();
        let amount = builder.pure(&1_000u64).unwrap();
        let coin = builder.split_coins(builder.gas(), [amount]).unwrap();
        let recipient = builder.pure(&keypair.address()).unwrap();
        builder.transfer_objects([coin.nested(0)], recipient).unwrap();
        builder
            .set_sender(keypair.address())
            .unwrap()
            .set_gas_payment(vec![gas_coin()])
            .unwrap()
            .set_gas_budget(10_000_000)
            .unwrap()
            .set_gas_price(1_000)
            .unwrap();
        builder.finalize().unwrap()
    }

    #[tokio::test]
    async fn test_split_and_transfer_dry_run_succeeds() {
        let keypair = Ed25519Keypair::generate();
        let data = split_and_transfer(&keypair);
        let bytes = data.to_bcs().unwrap();
        let signature = keypair.sign_transaction(&bytes).unwrap();

        let rpc = ScriptedRpc::replying(success_effects());
        let result = Dispatcher::new(&rpc)
            .dry_run(&bytes, &signature)
            .await
            .unwrap();

        assert_eq!(result.status, ExecutionStatus::Success);
        assert_eq!(result.mode, ExecutionMode::DryRun);
        assert_eq!(result.digest, data.digest().unwrap());
        assert_eq!(result.effects.created.len(), 1);
        assert_eq!(result.effects.mutated[0].object_id, gas_coin().object_id);
        assert_eq!(
            result.effects.gas_used.net_cost(),
            750_000 + 1_976_000 - 978_120
        );

        let submissions = rpc.submissions.lock().unwrap();
        assert_eq!(*submissions, vec![(bytes, true, ExecutionMode::DryRun)]);
    }

    #[tokio::test]
    async fn test_aborting_move_call_is_a_failure_not_an_error() {
        let keypair = Ed25519Keypair::generate();
        let mut builder = TransactionBuilder::new();
        let amount = builder.pure(&u64::MAX).unwrap();
        builder
            .move_call(
                MoveCall::new("0x2::coin::split")
                    .unwrap()
                    .type_arg(TypeTag::sui())
                    .args([builder.gas(), amount]),
            )
            .unwrap();
        builder
            .set_sender(keypair.address())
            .unwrap()
            .set_gas_payment(vec![gas_coin()])
            .unwrap()
            .set_gas_budget(10_000_000)
            .unwrap()
            .set_gas_price(1_000)
            .unwrap();
        let bytes = builder.finalize().unwrap().to_bcs().unwrap();
        let signature = keypair.sign_transaction(&bytes).unwrap();

        let rpc = ScriptedRpc::replying(json!({
            "effects": {
                "status": {
                    "status": "failure",
                    "error": "MoveAbort(MoveLocation { module: ModuleId { address: 0x2, name: Identifier(\"balance\") }, function: 3, instruction: 13, function_name: Some(\"split\") }, 2) in command 0"
                },
                "gasUsed": { "computationCost": "1000000", "storageCost": "988000", "storageRebate": "978120" },
                "mutated": [{ "owner": { "AddressOwner": "0xa11ce" }, "reference": { "objectId": "0x5e11", "version": "13", "digest": format!("0x{}", "01".repeat(32)) } }]
            }
        }));

        let result = Dispatcher::new(&rpc)
            .execute(&bytes, &signature)
            .await
            .unwrap();

        let reason = result.abort_reason().expect("failure status");
        assert_eq!(reason.category, AbortCategory::MoveAbort);
        assert_eq!(reason.abort_code, Some(2));
        assert_eq!(reason.command, Some(0));
        assert_eq!(reason.location.as_deref(), Some("0x2::balance::split"));
        // Gas was still charged.
        assert!(result.effects.gas_used.computation_cost > 0);
        assert_eq!(rpc.submission_count(), 1);
    }

    #[tokio::test]
    async fn test_unsigned_execute_never_reaches_node() {
        let rpc = ScriptedRpc::default();
        let err = Dispatcher::new(&rpc)
            .dispatch(ExecutionMode::Execute, b"bytes", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SuiError::MissingSignature(_)));
        assert_eq!(rpc.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_dev_inspect_needs_no_signature() {
        let keypair = Ed25519Keypair::generate();
        let mut builder = TransactionBuilder::new();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder.transfer_objects([builder.gas()], recipient).unwrap();
        builder.set_sender(keypair.address()).unwrap();
        let bytes = builder.finalize_for_inspection().unwrap().to_bcs().unwrap();

        let rpc = ScriptedRpc::replying(success_effects());
        let result = Dispatcher::new(&rpc).dev_inspect(&bytes).await.unwrap();
        assert!(result.is_success());
        assert_eq!(
            *rpc.submissions.lock().unwrap(),
            vec![(bytes, false, ExecutionMode::DevInspect)]
        );
    }

    #[tokio::test]
    async fn test_stub_timeout_is_dispatch_error() {
        let rpc = ScriptedRpc {
            responses: Mutex::new(vec![Err(SuiError::dispatch(
                DispatchErrorKind::Timeout,
                "no response within 30s",
            ))]),
            ..ScriptedRpc::default()
        };
        let keypair = Ed25519Keypair::generate();
        let bytes = split_and_transfer(&keypair).to_bcs().unwrap();
        let signature = keypair.sign_transaction(&bytes).unwrap();

        let err = Dispatcher::new(&rpc)
            .execute(&bytes, &signature)
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(err.is_dispatch());
        // A timed out execute is not retried.
        assert_eq!(rpc.submission_count(), 1);
    }
}

mod network_tests {
    use super::*;
    use std::time::Duration;
    use sui_rust_sdk::api::JsonRpcClient;
    use sui_rust_sdk::dispatch::Dispatcher;
    use sui_rust_sdk::error::DispatchErrorKind;
    use sui_rust_sdk::signer::{Ed25519Keypair, ReadySigner};
    use sui_rust_sdk::transaction::TransactionBuilder;
    use sui_rust_sdk::{SuiConfig, SuiError};
    use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_slow_node_yields_timeout_not_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "jsonrpc": "2.0", "id": 1, "result": success_effects() }))
                    .set_delay(Duration::from_secs(2)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = SuiConfig::custom(&server.uri())
            .unwrap()
            .with_timeout(Duration::from_millis(100));
        let client = JsonRpcClient::new(config).unwrap();

        let keypair = Ed25519Keypair::generate();
        let mut builder = TransactionBuilder::new();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder.transfer_objects([builder.gas()], recipient).unwrap();
        builder
            .set_sender(keypair.address())
            .unwrap()
            .set_gas_payment(vec![gas_coin()])
            .unwrap()
            .set_gas_budget(10_000_000)
            .unwrap()
            .set_gas_price(1_000)
            .unwrap();
        let bytes = builder.finalize().unwrap().to_bcs().unwrap();
        let signature = keypair.sign_transaction(&bytes).unwrap();

        let err = Dispatcher::new(&client)
            .execute(&bytes, &signature)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SuiError::Dispatch {
                kind: DispatchErrorKind::Timeout,
                ..
            }
        ));
    }
}

mod signer_tests {
    use super::*;
    use std::time::Duration;
    use sui_rust_sdk::dispatch::Dispatcher;
    use sui_rust_sdk::signer::{
        Approval, DeferredSigner, Ed25519Keypair, InteractiveSigner, ReadySigner, Signer,
        SignerProvider, SigningApprover, SigningRequest,
    };
    use sui_rust_sdk::transaction::TransactionBuilder;
    use sui_rust_sdk::SuiError;

    struct Rejecting {
        asked: AtomicUsize,
    }

    #[async_trait]
    impl SigningApprover for Rejecting {
        async fn review(&self, _request: &SigningRequest) -> SuiResult<Approval> {
            self.asked.fetch_add(1, Ordering::SeqCst);
            Ok(Approval::Reject)
        }
    }

    struct Offline;

    #[async_trait]
    impl SignerProvider for Offline {
        async fn resolve(&self, _address: SuiAddress) -> SuiResult<Arc<dyn ReadySigner>> {
            Err(SuiError::SignerUnavailable("wallet is locked".into()))
        }
    }

    struct Slow(Ed25519Keypair);

    #[async_trait]
    impl SignerProvider for Slow {
        async fn resolve(&self, _address: SuiAddress) -> SuiResult<Arc<dyn ReadySigner>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Arc::new(self.0.clone()))
        }
    }

    fn transfer(sender: SuiAddress) -> Vec<u8> {
        let mut builder = TransactionBuilder::new();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder.transfer_objects([builder.gas()], recipient).unwrap();
        builder
            .set_sender(sender)
            .unwrap()
            .set_gas_payment(vec![gas_coin()])
            .unwrap()
            .set_gas_budget(10_000_000)
            .unwrap()
            .set_gas_price(1_000)
            .unwrap();
        builder.finalize().unwrap().to_bcs().unwrap()
    }

    /// Signs, then executes; the node is only reached after a signature.
    async fn sign_and_execute(rpc: &ScriptedRpc, signer: &Signer, bytes: &[u8]) -> SuiResult<()> {
        let signature = signer.sign_transaction(bytes).await?;
        Dispatcher::new(rpc).execute(bytes, &signature).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_rejecting_interactive_signer_never_dispatches() {
        let keypair = Ed25519Keypair::generate();
        let approver = Arc::new(Rejecting {
            asked: AtomicUsize::new(0),
        });
        let signer = Signer::from(InteractiveSigner::new(
            Arc::new(keypair.clone()),
            approver.clone(),
        ));
        let bytes = transfer(keypair.address());
        let rpc = ScriptedRpc::default();

        let err = sign_and_execute(&rpc, &signer, &bytes).await.unwrap_err();
        assert!(matches!(err, SuiError::UserRejected));
        assert_eq!(approver.asked.load(Ordering::SeqCst), 1);
        assert_eq!(rpc.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_provider_never_dispatches() {
        let keypair = Ed25519Keypair::generate();
        let signer = Signer::from(DeferredSigner::new(keypair.address(), Arc::new(Offline)));
        let rpc = ScriptedRpc::default();

        let err = sign_and_execute(&rpc, &signer, &transfer(keypair.address()))
            .await
            .unwrap_err();
        assert!(matches!(err, SuiError::SignerUnavailable(_)));
        assert_eq!(rpc.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_timeout_is_unavailable() {
        let keypair = Ed25519Keypair::generate();
        let signer = Signer::from(
            DeferredSigner::new(keypair.address(), Arc::new(Slow(keypair.clone())))
                .with_timeout(Duration::from_millis(20)),
        );
        assert!(matches!(
            signer.sign_transaction(b"tx").await,
            Err(SuiError::SignerUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_signature_recovers_sender() {
        let keypair = Ed25519Keypair::generate();
        let bytes = transfer(keypair.address());
        let signature = Signer::from(keypair.clone())
            .sign_transaction(&bytes)
            .await
            .unwrap();

        assert_eq!(signature.signer_address(), keypair.address());
        assert!(signature.verify_transaction(&bytes).is_ok());
        assert!(signature.verify_raw_bytes(&bytes).is_err());
        let wire = Signature::from_base64(&signature.to_base64()).unwrap();
        assert_eq!(wire, signature);
    }
}
