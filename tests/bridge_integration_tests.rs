// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end transfers against the in-memory fakes.
//!
//! The reference route is 10.00 USDC from Base Sepolia (domain 6) to Ethereum
//! Sepolia (domain 0).

use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::{address, keccak256, Address, Bytes, FixedBytes, TxHash, U256};
use alloy_sol_types::SolCall;
use usdc_cctp::contracts::message_transmitter::MessageTransmitter;
use usdc_cctp::contracts::token_messenger::TokenMessenger;
use usdc_cctp::contracts::call_target;
use usdc_cctp::protocol::address_to_bytes32;
use usdc_cctp::providers::IrisAttestationProvider;
use usdc_cctp::testing::{
    burn_message, message_sent_log, AttestationReply, FakeAttestationProvider,
    FakeBlockchainProvider, FakeClock,
};
use usdc_cctp::traits::AttestationProvider;
use usdc_cctp::{
    AttestationResponse, AttestationStatus, BridgeError, CctpBridge, ChainDescriptor, DomainId,
    Network, PollingConfig, StatusChecker, StatusQuery, Step, TransferRequest,
};

const SENDER: Address = address!("1111111111111111111111111111111111111111");
const RECIPIENT: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d";
const SEPOLIA_MESSAGE_TRANSMITTER: Address = address!("7865fafc2db2093669d92c0f33aeef291086befd");

type Bridge<A> = CctpBridge<FakeBlockchainProvider, FakeBlockchainProvider, A, FakeClock>;

struct Scenario {
    source: FakeBlockchainProvider,
    destination: FakeBlockchainProvider,
    attestations: FakeAttestationProvider,
    clock: FakeClock,
    message: Bytes,
    message_hash: FixedBytes<32>,
}

impl Scenario {
    /// Base Sepolia → Sepolia with 50 USDC available and the allowance granted.
    fn new() -> Self {
        let base = base_sepolia();
        let source = FakeBlockchainProvider::new();
        source.set_balance(U256::from(50_000_000u64));
        source.set_allowance(U256::MAX);

        let message = burn_message(
            DomainId::Base,
            DomainId::Ethereum,
            42,
            base.usdc,
            SENDER,
            RECIPIENT.parse().unwrap(),
            U256::from(10_000_000u64),
        )
        .encode();
        let message_hash = keccak256(&message);
        source.emit_logs_on(
            TokenMessenger::depositForBurnCall::SELECTOR,
            vec![message_sent_log(base.message_transmitter, message.clone())],
        );

        Self {
            source,
            destination: FakeBlockchainProvider::new(),
            attestations: FakeAttestationProvider::new(),
            clock: FakeClock::new(),
            message,
            message_hash,
        }
    }

    fn bridge(&self) -> Bridge<FakeAttestationProvider> {
        self.bridge_with(self.attestations.clone())
    }

    fn bridge_with<A: AttestationProvider>(&self, attestations: A) -> Bridge<A> {
        CctpBridge::builder()
            .source(base_sepolia())
            .destination(sepolia())
            .source_provider(self.source.clone())
            .destination_provider(self.destination.clone())
            .attestation_provider(attestations)
            .clock(self.clock.clone())
            .polling(
                PollingConfig::default()
                    .with_poll_interval(Duration::from_secs(5))
                    .with_timeout(Duration::from_secs(60)),
            )
            .build()
    }

    fn burns(&self) -> usize {
        self.source
            .sent_with_selector(TokenMessenger::depositForBurnCall::SELECTOR)
    }

    fn mints(&self) -> usize {
        self.destination
            .sent_with_selector(MessageTransmitter::receiveMessageCall::SELECTOR)
    }
}

fn base_sepolia() -> ChainDescriptor {
    ChainDescriptor::for_chain(NamedChain::BaseSepolia, None).unwrap()
}

fn sepolia() -> ChainDescriptor {
    ChainDescriptor::for_chain(NamedChain::Sepolia, None).unwrap()
}

fn request(recipient: &str, amount: &str) -> TransferRequest {
    TransferRequest::builder()
        .sender(SENDER)
        .recipient(recipient)
        .amount(amount.parse().unwrap())
        .build()
}

fn signature() -> Bytes {
    Bytes::from(vec![0x5a; 65])
}

#[tokio::test]
async fn test_base_sepolia_to_sepolia() {
    let scenario = Scenario::new();
    scenario.attestations.add_response_sequence(
        scenario.message_hash,
        vec![
            AttestationResponse::pending(),
            AttestationResponse {
                status: AttestationStatus::PendingConfirmations,
                attestation: None,
                message: None,
            },
            AttestationResponse::complete(signature()),
        ],
    );

    let report = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap();

    // One burn, padded recipient, destination domain 0
    let burns = scenario.source.sent_transactions();
    assert_eq!(burns.len(), 1);
    let (burn_tx_hash, burn_tx) = &burns[0];
    assert_eq!(call_target(burn_tx), Some(base_sepolia().token_messenger));
    let burn = TokenMessenger::depositForBurnCall::abi_decode(burn_tx.input.input().unwrap())
        .unwrap();
    assert_eq!(burn.amount, U256::from(10_000_000u64));
    assert_eq!(burn.destinationDomain, 0);
    assert_eq!(
        burn.mintRecipient,
        address_to_bytes32(RECIPIENT.parse().unwrap())
    );
    assert_eq!(burn.burnToken, base_sepolia().usdc);

    // Three lookups, two waits
    assert_eq!(scenario.attestations.get_call_count(scenario.message_hash), 3);
    assert_eq!(scenario.clock.sleep_log()[..2], [Duration::from_secs(5); 2]);

    // One mint on Sepolia's MessageTransmitter with the original bytes
    let mints = scenario.destination.sent_transactions();
    assert_eq!(mints.len(), 1);
    let (mint_tx_hash, mint_tx) = &mints[0];
    assert_eq!(call_target(mint_tx), Some(SEPOLIA_MESSAGE_TRANSMITTER));
    let mint = MessageTransmitter::receiveMessageCall::abi_decode(mint_tx.input.input().unwrap())
        .unwrap();
    assert_eq!(mint.message, scenario.message);
    assert_eq!(mint.attestation, signature());

    assert_eq!(report.burn_tx_hash, *burn_tx_hash);
    assert_eq!(report.mint_tx_hash, *mint_tx_hash);
    assert_ne!(report.burn_tx_hash, report.mint_tx_hash);
    assert_eq!(report.message_hash, scenario.message_hash);
    assert_eq!(report.nonce, 42);
    assert_eq!(report.amount, "10.000000");
    assert_eq!(report.source_chain, "base-sepolia");
    assert_eq!(report.destination_chain, "sepolia");
    assert!(report.approve_tx_hash.is_none());
    assert!(report
        .burn_tx_url
        .starts_with("https://sepolia.basescan.org/tx/0x"));
    assert!(report
        .mint_tx_url
        .starts_with("https://sepolia.etherscan.io/tx/0x"));
}

#[test]
fn test_testnet_source_polls_the_sandbox() {
    let source = base_sepolia();
    assert_eq!(source.network(), Network::Testnet);

    let iris = IrisAttestationProvider::for_network(source.network());
    insta::assert_snapshot!(
        iris.attestation_url(FixedBytes::from([0x11; 32])),
        @"https://iris-api-sandbox.circle.com/attestations/0x1111111111111111111111111111111111111111111111111111111111111111"
    );
}

#[tokio::test]
async fn test_transfer_against_attestation_http_api() {
    let scenario = Scenario::new();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            format!("/attestations/{}", scenario.message_hash).as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"status":"complete","attestation":"{}"}}"#,
            signature()
        ))
        .create_async()
        .await;

    let report = scenario
        .bridge_with(IrisAttestationProvider::new(server.url()))
        .transfer(&request(RECIPIENT, "10"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(report.message_hash, scenario.message_hash);
    assert_eq!(scenario.mints(), 1);
}

#[tokio::test]
async fn test_pending_never_mints() {
    let scenario = Scenario::new();
    scenario.attestations.add_always_pending(scenario.message_hash);

    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap_err();

    assert!(matches!(err.root(), BridgeError::AttestationTimeout { .. }));
    assert_eq!(err.step(), Some(Step::Attestation));
    assert_eq!(scenario.burns(), 1);
    assert_eq!(scenario.mints(), 0);

    // 60s budget at 5s: lookups at 0, 5, ..., 60
    assert_eq!(scenario.attestations.get_call_count(scenario.message_hash), 13);
    assert_eq!(scenario.clock.total_sleep_time(), Duration::from_secs(60));
}

#[tokio::test]
async fn test_timeout_reports_resume_point() {
    let scenario = Scenario::new();
    scenario.attestations.add_reply_sequence(
        scenario.message_hash,
        vec![AttestationReply::NotFound, AttestationReply::ServerError(503)],
    );

    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap_err();

    match err.root() {
        BridgeError::AttestationTimeout {
            message_hash,
            elapsed_secs,
        } => {
            assert_eq!(*message_hash, scenario.message_hash);
            assert_eq!(*elapsed_secs, 60);
        }
        other => panic!("expected a timeout, got {other:?}"),
    }

    let (burn_tx_hash, message_hash) = err.resume_point().unwrap();
    assert_eq!(burn_tx_hash, scenario.source.sent_transactions()[0].0);
    assert_eq!(message_hash, Some(scenario.message_hash));
}

#[tokio::test]
async fn test_failed_attestation_stops_before_mint() {
    let scenario = Scenario::new();
    scenario.attestations.add_failed_response(scenario.message_hash);

    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap_err();

    assert!(matches!(err.root(), BridgeError::AttestationFailed { .. }));
    assert_eq!(scenario.mints(), 0);
    assert_eq!(scenario.attestations.get_call_count(scenario.message_hash), 1);
}

#[tokio::test]
async fn test_invalid_recipient_sends_nothing() {
    for recipient in [
        "742d35Cc6634C0532925a3b844Bc9e7595f8fA0d",
        "0x742d35Cc6634C0532925a3b844Bc9e7595f8fA",
        "0xzz2d35Cc6634C0532925a3b844Bc9e7595f8fA0d",
        "0x0000000000000000000000000000000000000000",
    ] {
        let scenario = Scenario::new();
        let err = scenario
            .bridge()
            .transfer(&request(recipient, "10.00"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, BridgeError::InvalidInput(_)),
            "{recipient}: {err}"
        );
        assert!(scenario.source.sent_transactions().is_empty());
        assert!(scenario.destination.sent_transactions().is_empty());
    }
}

#[tokio::test]
async fn test_insufficient_balance_sends_nothing() {
    let scenario = Scenario::new();
    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "50.000001"))
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::InsufficientBalance { .. }));
    assert!(scenario.source.sent_transactions().is_empty());
}

#[tokio::test]
async fn test_reverted_burn() {
    let scenario = Scenario::new();
    scenario
        .source
        .revert_on(TokenMessenger::depositForBurnCall::SELECTOR);

    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::BurnFailed { .. }));
    assert!(err.resume_point().is_none());
    assert_eq!(scenario.attestations.get_call_count(scenario.message_hash), 0);
    assert_eq!(scenario.mints(), 0);
}

#[tokio::test]
async fn test_unsubmitted_burn_cannot_be_resumed() {
    let scenario = Scenario::new();
    scenario
        .source
        .fail_send_on(TokenMessenger::depositForBurnCall::SELECTOR);

    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::BurnFailed { .. }), "{err}");
    assert!(err.resume_point().is_none());
    assert_eq!(scenario.burns(), 0);
    assert_eq!(scenario.mints(), 0);
}

#[tokio::test]
async fn test_reverted_mint_is_not_retried() {
    let scenario = Scenario::new();
    scenario
        .attestations
        .add_complete_response(scenario.message_hash, signature());
    scenario
        .destination
        .revert_on(MessageTransmitter::receiveMessageCall::SELECTOR);

    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap_err();

    match err.root() {
        BridgeError::MintFailed { message_hash, .. } => {
            assert_eq!(*message_hash, scenario.message_hash)
        }
        other => panic!("expected a mint failure, got {other:?}"),
    }
    assert_eq!(err.step(), Some(Step::Mint));
    assert_eq!(scenario.mints(), 1);
    assert!(err.resume_point().is_some());
}

#[tokio::test]
async fn test_resume_after_timeout_mints_once() {
    let scenario = Scenario::new();
    scenario.attestations.add_always_pending(scenario.message_hash);

    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap_err();
    let (burn_tx_hash, _) = err.resume_point().unwrap();

    scenario
        .attestations
        .add_complete_response(scenario.message_hash, signature());
    let report = scenario
        .bridge()
        .resume(SENDER, burn_tx_hash)
        .await
        .unwrap();

    assert_eq!(report.burn_tx_hash, burn_tx_hash);
    assert_eq!(scenario.burns(), 1);
    assert_eq!(scenario.mints(), 1);
}

#[test]
fn test_message_hash_is_deterministic() {
    let scenario = Scenario::new();
    let again = Scenario::new();

    assert_eq!(keccak256(&scenario.message), scenario.message_hash);
    assert_eq!(again.message_hash, scenario.message_hash);
    assert_eq!(
        usdc_cctp::protocol::message_hash(&scenario.message),
        scenario.message_hash
    );
}

#[tokio::test]
async fn test_status_of_a_burn() {
    let scenario = Scenario::new();

    // Leave a confirmed burn on the fake source chain
    scenario.attestations.add_always_pending(scenario.message_hash);
    let err = scenario
        .bridge()
        .transfer(&request(RECIPIENT, "10.00"))
        .await
        .unwrap_err();
    let (burn_tx_hash, _) = err.resume_point().unwrap();

    scenario
        .attestations
        .add_complete_response(scenario.message_hash, signature());
    let checker = StatusChecker::builder()
        .source(base_sepolia())
        .provider(scenario.source.clone())
        .attestation_provider(scenario.attestations.clone())
        .clock(scenario.clock.clone())
        .build();

    let report = checker
        .check(StatusQuery::BurnTransaction(burn_tx_hash))
        .await
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.message_hash, scenario.message_hash);
    assert_eq!(report.destination_domain, Some(DomainId::Ethereum));
    assert_eq!(report.attestation, Some(signature()));

    let by_hash = checker
        .check(StatusQuery::MessageHash(scenario.message_hash))
        .await
        .unwrap();
    assert_eq!(by_hash.status, AttestationStatus::Complete);

    // Read-only
    assert_eq!(scenario.burns(), 1);
    assert_eq!(scenario.mints(), 0);
    assert!(checker
        .check(StatusQuery::BurnTransaction(TxHash::repeat_byte(0x99)))
        .await
        .is_err());
}
