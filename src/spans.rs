// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span helpers for USDC and CCTP operations
//!
//! Static span names with structured attributes, kept apart from business
//! logic. Spans that can fail declare empty `error.*` fields so
//! [`record_error`] can fill them in.
//!
//! # Example
//!
//! ```rust,no_run
//! use alloy_chains::NamedChain;
//! use alloy_primitives::FixedBytes;
//! use std::time::Duration;
//! use tracing::Instrument;
//! use usdc_cctp::spans;
//!
//! # async fn example() {
//! let span = spans::wait_for_attestation(
//!     &FixedBytes::ZERO,
//!     &NamedChain::BaseSepolia,
//!     Duration::from_secs(5),
//!     Duration::from_secs(300),
//! );
//! async {
//!     // custom polling here
//! }
//! .instrument(span)
//! .await;
//! # }
//! ```

use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, FixedBytes, TxHash, U256};
use tracing::Span;

use crate::error::BridgeError;

/// Top-level span for one burn → attestation → mint transfer.
///
/// Children: every other bridge span
#[inline]
pub fn transfer(
    source_chain: &NamedChain,
    destination_chain: &NamedChain,
    recipient: &str,
    amount: &U256,
) -> Span {
    tracing::info_span!(
        "usdc_cctp.transfer",
        source_chain = %source_chain,
        destination_chain = %destination_chain,
        recipient = recipient,
        amount = %amount,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Parent: usdc_cctp.transfer
#[inline]
pub fn approve(owner: &Address, spender: &Address, amount: &U256, chain: &NamedChain) -> Span {
    tracing::info_span!(
        "usdc_cctp.approve",
        owner = %owner,
        spender = %spender,
        amount = %amount,
        chain = %chain,
    )
}

/// Parent: usdc_cctp.transfer
#[inline]
pub fn deposit_for_burn(
    from_address: &Address,
    recipient: &Address,
    destination_domain: u32,
    token_address: &Address,
    amount: &U256,
) -> Span {
    tracing::info_span!(
        "usdc_cctp.deposit_for_burn",
        from_address = %from_address,
        recipient = %recipient,
        destination_domain = destination_domain,
        token_address = %token_address,
        amount = %amount,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Parent: whichever operation submitted the transaction
/// Children: receipt and block number RPC calls
#[inline]
pub fn wait_for_confirmation(
    tx_hash: TxHash,
    chain: &NamedChain,
    required_confirmations: u64,
) -> Span {
    tracing::debug_span!(
        "usdc_cctp.wait_for_confirmation",
        tx_hash = %tx_hash,
        chain = %chain,
        required_confirmations = required_confirmations,
    )
}

/// Extracting `MessageSent` from a burn receipt.
#[inline]
pub fn get_message_sent_event(tx_hash: TxHash, source_chain: &NamedChain) -> Span {
    tracing::info_span!(
        "usdc_cctp.get_message_sent_event",
        tx_hash = %tx_hash,
        source_chain = %source_chain,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Polling the attestation service until complete or out of time.
///
/// Children: usdc_cctp.get_attestation (one per attempt)
#[inline]
pub fn wait_for_attestation(
    message_hash: &FixedBytes<32>,
    source_chain: &NamedChain,
    poll_interval: Duration,
    timeout: Duration,
) -> Span {
    tracing::info_span!(
        "usdc_cctp.wait_for_attestation",
        message_hash = %message_hash,
        source_chain = %source_chain,
        poll_interval_secs = poll_interval.as_secs(),
        timeout_secs = timeout.as_secs(),
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Parent: usdc_cctp.wait_for_attestation
#[inline]
pub fn get_attestation(message_hash: &FixedBytes<32>, attempt: u32) -> Span {
    tracing::debug_span!(
        "usdc_cctp.get_attestation",
        message_hash = %message_hash,
        attempt = attempt,
    )
}

/// Submitting `receiveMessage` on the destination chain.
#[inline]
pub fn receive_message(
    message_hash: &FixedBytes<32>,
    destination_chain: &NamedChain,
    attestation_length: usize,
) -> Span {
    tracing::info_span!(
        "usdc_cctp.receive_message",
        message_hash = %message_hash,
        destination_chain = %destination_chain,
        attestation_length_bytes = attestation_length,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

#[inline]
pub fn check_status(source_chain: &NamedChain, query: &str, wait: bool) -> Span {
    tracing::info_span!(
        "usdc_cctp.check_status",
        source_chain = %source_chain,
        query = query,
        wait = wait,
    )
}

#[inline]
pub fn balance(owner: &Address, chain: &NamedChain) -> Span {
    tracing::info_span!("usdc_cctp.balance", owner = %owner, chain = %chain)
}

#[inline]
pub fn send(from: &Address, to: &str, amount: &U256, chain: &NamedChain) -> Span {
    tracing::info_span!(
        "usdc_cctp.send",
        from = %from,
        to = to,
        amount = %amount,
        chain = %chain,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// `error.type` is the failing step when the error names one.
pub fn record_error(error: &BridgeError) {
    let current_span = Span::current();
    let error_type = error
        .step()
        .map(|step| step.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    current_span.record("error.type", error_type.as_str());
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");

    if let Some(source) = std::error::Error::source(error) {
        current_span.record("error.source", source.to_string());
    }
}

/// Record error attributes with custom context on the current span.
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.context", context);
    }
}
