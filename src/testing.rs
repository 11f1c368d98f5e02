// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test utilities and fake implementations of the provider traits
//!
//! These fakes let the balance, send, bridge and status flows run end to end
//! without a node, the attestation service or real waiting. They cover the
//! adversarial cases too: reverted burns and mints, receipts that never show
//! up, rate limiting, and attestations that never complete.

use alloy_primitives::{keccak256, Address, Bytes, FixedBytes, Log, LogData, TxHash, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::contracts::call_selector;
use crate::contracts::erc20::Erc20;
use crate::contracts::message_transmitter::MessageTransmitter::MessageSent;
use crate::protocol::{
    address_to_bytes32, AttestationResponse, BurnMessage, CctpMessage, DomainId, MessageHeader,
};
use crate::receipt::TransactionOutcome;
use crate::traits::{AttestationProvider, BlockchainProvider, Clock};
use crate::{BridgeError, Result};

// ============================================================================
// Fake Blockchain Provider
// ============================================================================

#[derive(Debug)]
struct ChainState {
    call_responses: HashMap<[u8; 4], Bytes>,
    call_failures: HashSet<[u8; 4]>,
    sent: Vec<(TxHash, TransactionRequest)>,
    emitted_logs: HashMap<[u8; 4], Vec<Log>>,
    reverts: HashSet<[u8; 4]>,
    send_failures: HashSet<[u8; 4]>,
    unmined: HashSet<[u8; 4]>,
    receipts: HashMap<TxHash, Option<TransactionOutcome>>,
    receipt_failures: Vec<TxHash>,
    block_number: u64,
}

impl Default for ChainState {
    fn default() -> Self {
        Self {
            call_responses: HashMap::new(),
            call_failures: HashSet::new(),
            sent: Vec::new(),
            emitted_logs: HashMap::new(),
            reverts: HashSet::new(),
            send_failures: HashSet::new(),
            unmined: HashSet::new(),
            receipts: HashMap::new(),
            receipt_failures: Vec::new(),
            block_number: 12345,
        }
    }
}

/// A fake single-chain provider.
///
/// Reads are answered by function selector. Every sent transaction is
/// recorded, gets a deterministic hash, and is "mined" at the current block
/// unless configured otherwise:
/// - `revert_on` mines it with a failed status and no logs
/// - `fail_send_on` rejects it before broadcast
/// - `never_mine_on` accepts it but never produces a receipt
/// - `emit_logs_on` attaches logs to successful receipts
#[derive(Clone, Debug, Default)]
pub struct FakeBlockchainProvider {
    state: Arc<Mutex<ChainState>>,
}

impl FakeBlockchainProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `eth_call`s with `selector` with the raw `output`.
    pub fn set_call_response(&self, selector: [u8; 4], output: Bytes) {
        self.state
            .lock()
            .unwrap()
            .call_responses
            .insert(selector, output);
    }

    pub fn set_balance(&self, balance: U256) {
        self.set_call_response(Erc20::balanceOfCall::SELECTOR, balance.abi_encode().into());
    }

    pub fn set_allowance(&self, allowance: U256) {
        self.set_call_response(Erc20::allowanceCall::SELECTOR, allowance.abi_encode().into());
    }

    pub fn set_decimals(&self, decimals: u8) {
        self.set_call_response(
            Erc20::decimalsCall::SELECTOR,
            <alloy_sol_types::sol_data::Uint<8> as alloy_sol_types::SolType>::abi_encode(&decimals)
                .into(),
        );
    }

    /// Make `eth_call`s with `selector` fail with a provider error.
    pub fn fail_call_on(&self, selector: [u8; 4]) {
        self.state.lock().unwrap().call_failures.insert(selector);
    }

    pub fn set_block_number(&self, block_number: u64) {
        self.state.lock().unwrap().block_number = block_number;
    }

    pub fn emit_logs_on(&self, selector: [u8; 4], logs: Vec<Log>) {
        self.state
            .lock()
            .unwrap()
            .emitted_logs
            .insert(selector, logs);
    }

    pub fn revert_on(&self, selector: [u8; 4]) {
        self.state.lock().unwrap().reverts.insert(selector);
    }

    pub fn fail_send_on(&self, selector: [u8; 4]) {
        self.state.lock().unwrap().send_failures.insert(selector);
    }

    pub fn never_mine_on(&self, selector: [u8; 4]) {
        self.state.lock().unwrap().unmined.insert(selector);
    }

    /// Add a transaction outcome that will be returned for the given hash
    pub fn add_receipt(&self, outcome: TransactionOutcome) {
        self.state
            .lock()
            .unwrap()
            .receipts
            .insert(outcome.tx_hash, Some(outcome));
    }

    /// Configure a transaction hash to return None (not found)
    pub fn add_not_found(&self, tx_hash: TxHash) {
        self.state.lock().unwrap().receipts.insert(tx_hash, None);
    }

    /// Configure a transaction hash to return an error
    pub fn add_failure(&self, tx_hash: TxHash) {
        self.state.lock().unwrap().receipt_failures.push(tx_hash);
    }

    /// Every transaction handed to `send_transaction`, in order.
    pub fn sent_transactions(&self) -> Vec<(TxHash, TransactionRequest)> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sent_with_selector(&self, selector: [u8; 4]) -> usize {
        self.state
            .lock()
            .unwrap()
            .sent
            .iter()
            .filter(|(_, tx)| call_selector(tx) == Some(selector))
            .count()
    }
}

#[async_trait]
impl BlockchainProvider for FakeBlockchainProvider {
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        let state = self.state.lock().unwrap();
        let selector = call_selector(&tx)
            .ok_or_else(|| BridgeError::Provider("Call without input".to_string()))?;

        if state.call_failures.contains(&selector) {
            return Err(BridgeError::Provider("Simulated RPC error".to_string()));
        }

        state.call_responses.get(&selector).cloned().ok_or_else(|| {
            BridgeError::Provider(format!(
                "No response configured for selector 0x{}",
                alloy_primitives::hex::encode(selector)
            ))
        })
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        let selector = call_selector(&tx).unwrap_or_default();

        if state.send_failures.contains(&selector) {
            return Err(BridgeError::Provider(
                "Simulated broadcast failure".to_string(),
            ));
        }

        let input = tx.input.input().cloned().unwrap_or_default();
        let mut preimage = (state.sent.len() as u64).to_be_bytes().to_vec();
        preimage.extend_from_slice(&input);
        let tx_hash = keccak256(preimage);

        state.sent.push((tx_hash, tx));

        if !state.unmined.contains(&selector) {
            let success = !state.reverts.contains(&selector);
            let logs = if success {
                state
                    .emitted_logs
                    .get(&selector)
                    .cloned()
                    .unwrap_or_default()
            } else {
                Vec::new()
            };
            let outcome = TransactionOutcome {
                tx_hash,
                success,
                block_number: Some(state.block_number),
                logs,
            };
            state.receipts.insert(tx_hash, Some(outcome));
        }

        Ok(tx_hash)
    }

    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionOutcome>> {
        let state = self.state.lock().unwrap();
        if state.receipt_failures.contains(&tx_hash) {
            return Err(BridgeError::Provider("Simulated RPC error".to_string()));
        }

        Ok(state.receipts.get(&tx_hash).cloned().unwrap_or(None))
    }

    async fn get_block_number(&self) -> Result<u64> {
        Ok(self.state.lock().unwrap().block_number)
    }
}

// ============================================================================
// Fake Attestation Provider
// ============================================================================

/// One scripted reply from [`FakeAttestationProvider`].
#[derive(Clone, Debug)]
pub enum AttestationReply {
    Response(AttestationResponse),
    /// 404
    NotFound,
    /// 429 with the given `Retry-After`
    RateLimited(u64),
    /// Any other non-success HTTP status
    ServerError(u16),
    /// The request never got a response
    NetworkError,
}

impl AttestationReply {
    fn into_result(self) -> Result<AttestationResponse> {
        match self {
            Self::Response(response) => Ok(response),
            Self::NotFound => Err(BridgeError::AttestationNotFound),
            Self::RateLimited(retry_after_seconds) => {
                Err(BridgeError::RateLimitExceeded { retry_after_seconds })
            }
            Self::ServerError(status) => Err(BridgeError::AttestationService { status }),
            Self::NetworkError => Err(BridgeError::Provider(
                "connection reset by peer".to_string(),
            )),
        }
    }
}

impl From<AttestationResponse> for AttestationReply {
    fn from(response: AttestationResponse) -> Self {
        Self::Response(response)
    }
}

/// A fake attestation service that replays scripted replies per message hash.
///
/// Each call returns the next reply in the sequence; once the sequence is
/// exhausted the last reply repeats. Unknown hashes get a 404.
#[derive(Clone, Debug, Default)]
pub struct FakeAttestationProvider {
    replies: Arc<Mutex<HashMap<FixedBytes<32>, Vec<AttestationReply>>>>,
    calls: Arc<Mutex<HashMap<FixedBytes<32>, usize>>>,
}

impl FakeAttestationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_reply_sequence(&self, message_hash: FixedBytes<32>, replies: Vec<AttestationReply>) {
        self.replies.lock().unwrap().insert(message_hash, replies);
        self.calls.lock().unwrap().insert(message_hash, 0);
    }

    pub fn add_response_sequence(
        &self,
        message_hash: FixedBytes<32>,
        responses: Vec<AttestationResponse>,
    ) {
        self.add_reply_sequence(message_hash, responses.into_iter().map(Into::into).collect());
    }

    /// Configure an immediate complete response with attestation data
    pub fn add_complete_response(&self, message_hash: FixedBytes<32>, attestation: Bytes) {
        self.add_response_sequence(message_hash, vec![AttestationResponse::complete(attestation)]);
    }

    /// Configure an immediate failed response
    pub fn add_failed_response(&self, message_hash: FixedBytes<32>) {
        self.add_response_sequence(
            message_hash,
            vec![AttestationResponse {
                status: crate::protocol::AttestationStatus::Failed,
                attestation: None,
                message: None,
            }],
        );
    }

    /// Configure a pending response that never completes
    pub fn add_always_pending(&self, message_hash: FixedBytes<32>) {
        self.add_response_sequence(message_hash, vec![AttestationResponse::pending()]);
    }

    /// Number of `get_attestation` calls made for a message hash
    pub fn get_call_count(&self, message_hash: FixedBytes<32>) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&message_hash)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl AttestationProvider for FakeAttestationProvider {
    async fn get_attestation(&self, message_hash: FixedBytes<32>) -> Result<AttestationResponse> {
        let replies = self.replies.lock().unwrap();
        let mut calls = self.calls.lock().unwrap();

        let index = calls.entry(message_hash).or_insert(0);
        let call = *index;
        *index += 1;

        match replies.get(&message_hash) {
            Some(sequence) if !sequence.is_empty() => {
                let reply = sequence.get(call).unwrap_or(&sequence[sequence.len() - 1]);
                reply.clone().into_result()
            }
            _ => Err(BridgeError::AttestationNotFound),
        }
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A fake clock that allows fast-forwarding time in tests.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast-forward the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    /// Get the total time "slept" by this clock
    pub fn total_sleep_time(&self) -> Duration {
        self.sleep_log.lock().unwrap().iter().sum()
    }

    /// Get the number of times sleep was called
    pub fn sleep_count(&self) -> usize {
        self.sleep_log.lock().unwrap().len()
    }

    pub fn sleep_log(&self) -> Vec<Duration> {
        self.sleep_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleep_log.lock().unwrap().push(duration);
        self.advance(duration);
    }

    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A `MessageSent(message)` log emitted by `transmitter`.
pub fn message_sent_log(transmitter: Address, message: Bytes) -> Log {
    let event = MessageSent { message };
    Log {
        address: transmitter,
        data: LogData::new_unchecked(vec![MessageSent::SIGNATURE_HASH], event.encode_data().into()),
    }
}

/// A v1 burn message as the source TokenMessenger would emit it.
pub fn burn_message(
    source: DomainId,
    destination: DomainId,
    nonce: u64,
    burn_token: Address,
    sender: Address,
    recipient: Address,
    amount: U256,
) -> CctpMessage {
    CctpMessage {
        header: MessageHeader {
            version: 0,
            source_domain: source,
            destination_domain: destination,
            nonce,
            sender: address_to_bytes32(sender),
            recipient: address_to_bytes32(recipient),
            destination_caller: FixedBytes::ZERO,
        },
        body: BurnMessage {
            version: 0,
            burn_token,
            mint_recipient: recipient,
            amount,
            message_sender: sender,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::AttestationStatus;

    #[tokio::test]
    async fn test_fake_clock_tracks_sleep_calls() {
        let clock = FakeClock::new();

        clock.sleep(Duration::from_secs(60)).await;
        clock.sleep(Duration::from_secs(120)).await;

        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.total_sleep_time(), Duration::from_secs(180));
        assert_eq!(
            clock.sleep_log(),
            vec![Duration::from_secs(60), Duration::from_secs(120)]
        );
    }

    #[tokio::test]
    async fn test_fake_attestation_provider_sequence() {
        let provider = FakeAttestationProvider::new();
        let message_hash = FixedBytes::from([1u8; 32]);

        provider.add_reply_sequence(
            message_hash,
            vec![
                AttestationReply::RateLimited(3),
                AttestationResponse::pending().into(),
                AttestationResponse::complete(Bytes::from_static(&[0xde, 0xad])).into(),
            ],
        );

        assert!(matches!(
            provider.get_attestation(message_hash).await.unwrap_err(),
            BridgeError::RateLimitExceeded {
                retry_after_seconds: 3
            }
        ));
        let second = provider.get_attestation(message_hash).await.unwrap();
        assert_eq!(second.status, AttestationStatus::Pending);

        // exhausted sequences repeat the last reply
        for _ in 0..2 {
            let reply = provider.get_attestation(message_hash).await.unwrap();
            assert_eq!(reply.status, AttestationStatus::Complete);
        }
        assert_eq!(provider.get_call_count(message_hash), 4);
    }

    #[tokio::test]
    async fn test_fake_attestation_provider_not_found() {
        let provider = FakeAttestationProvider::new();
        let message_hash = FixedBytes::from([1u8; 32]);

        let result = provider.get_attestation(message_hash).await;
        assert!(matches!(
            result.unwrap_err(),
            BridgeError::AttestationNotFound
        ));
        assert_eq!(provider.get_call_count(message_hash), 1);
    }

    #[tokio::test]
    async fn test_fake_blockchain_provider_not_found() {
        let provider = FakeBlockchainProvider::new();
        let tx_hash = TxHash::from([1u8; 32]);

        provider.add_not_found(tx_hash);

        let result = provider.get_transaction_receipt(tx_hash).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fake_blockchain_provider_failure() {
        let provider = FakeBlockchainProvider::new();
        let tx_hash = TxHash::from([1u8; 32]);

        provider.add_failure(tx_hash);

        let result = provider.get_transaction_receipt(tx_hash).await;
        assert!(matches!(result.unwrap_err(), BridgeError::Provider(_)));
    }

    #[tokio::test]
    async fn test_sent_transactions_are_mined_or_reverted() {
        let provider = FakeBlockchainProvider::new();
        let usdc = Address::repeat_byte(0x11);
        let erc20 = crate::contracts::erc20::Erc20Contract::new(usdc, &provider);

        provider.revert_on(Erc20::transferCall::SELECTOR);
        let transfer = erc20.transfer_transaction(Address::ZERO, Address::ZERO, U256::from(1u64));
        let approve = erc20.approve_transaction(Address::ZERO, Address::ZERO, U256::from(1u64));

        let reverted = provider.send_transaction(transfer).await.unwrap();
        let mined = provider.send_transaction(approve).await.unwrap();
        assert_ne!(reverted, mined);

        let reverted = provider.get_transaction_receipt(reverted).await.unwrap().unwrap();
        assert!(!reverted.success);
        let mined = provider.get_transaction_receipt(mined).await.unwrap().unwrap();
        assert!(mined.success);
        assert_eq!(mined.block_number, Some(12345));

        assert_eq!(provider.sent_transactions().len(), 2);
        assert_eq!(provider.sent_with_selector(Erc20::approveCall::SELECTOR), 1);
    }
}
