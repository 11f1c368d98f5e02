// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Core trait abstractions for chain, attestation and time access.
//!
//! Every command talks to the outside world through these three traits, so
//! the whole burn → attestation → mint flow runs against the fakes in
//! [`crate::testing`] without a node, an HTTP server or real waiting.

use alloy_primitives::{Bytes, FixedBytes, TxHash};
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::protocol::AttestationResponse;
use crate::receipt::TransactionOutcome;

/// Trait for blockchain RPC operations on a single chain.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Reverted burns and mints
/// - Transactions that never get mined
/// - Receipts without a `MessageSent` event
/// - Slow block confirmations
#[async_trait]
pub trait BlockchainProvider: Send + Sync {
    /// Executes a read-only `eth_call` and returns the raw output.
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes>;

    /// Signs and broadcasts a transaction, returning its hash once accepted
    /// by the node. Does not wait for inclusion.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash>;

    /// Fetches the outcome of a mined transaction.
    ///
    /// Returns `None` if the transaction is not found or not yet mined.
    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionOutcome>>;

    async fn get_block_number(&self) -> Result<u64>;
}

/// Trait for attestation retrieval from Circle's attestation service.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Rate limiting (429 responses)
/// - Messages not yet indexed (404)
/// - State transitions (Pending → PendingConfirmations → Complete)
/// - Failed attestations
#[async_trait]
pub trait AttestationProvider: Send + Sync {
    /// Fetches attestation status and data for a message hash.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::AttestationNotFound`](crate::BridgeError::AttestationNotFound) on 404
    /// - [`BridgeError::RateLimitExceeded`](crate::BridgeError::RateLimitExceeded) on 429
    /// - [`BridgeError::AttestationService`](crate::BridgeError::AttestationService) on other
    ///   HTTP errors
    /// - [`BridgeError::Network`](crate::BridgeError::Network) when the request never completes
    async fn get_attestation(&self, message_hash: FixedBytes<32>) -> Result<AttestationResponse>;
}

/// Trait for time-based operations.
///
/// Lets tests advance through polling loops and timeouts instantly.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);

    /// Used for timeouts and elapsed time reporting.
    fn now(&self) -> Instant;
}
