// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Waiting for submitted transactions and reading burn messages back out of
//! their receipts.

use std::time::Duration;

use alloy_primitives::TxHash;
use tracing::{debug, error, info, warn, Instrument};

use crate::chain::{ChainDescriptor, ConfirmationConfig};
use crate::contracts::message_transmitter::MessageTransmitterContract;
use crate::error::{BridgeError, Result};
use crate::protocol::BurnReceipt;
use crate::providers::Deadline;
use crate::receipt::TransactionOutcome;
use crate::spans;
use crate::traits::{BlockchainProvider, Clock};

/// Floor for the receipt poll interval so a zero setting cannot spin.
const MIN_RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls for the receipt of `tx_hash` until it is mined with the required
/// depth or the timeout elapses.
///
/// Returns `Ok(None)` on timeout. A reverted transaction is returned as soon
/// as its receipt appears, regardless of depth. Transient RPC failures are
/// logged and polled through.
pub async fn wait_for_confirmation<P, C>(
    provider: &P,
    clock: &C,
    chain: &ChainDescriptor,
    tx_hash: TxHash,
    config: &ConfirmationConfig,
) -> Result<Option<TransactionOutcome>>
where
    P: BlockchainProvider + ?Sized,
    C: Clock + ?Sized,
{
    let span = spans::wait_for_confirmation(tx_hash, &chain.chain, config.required_confirmations);

    async {
        let deadline = Deadline::start(clock, config.timeout);
        let interval = config.poll_interval.max(MIN_RECEIPT_POLL_INTERVAL);

        loop {
            match confirmed_outcome(provider, tx_hash, config.required_confirmations).await {
                Ok(Some(outcome)) => {
                    info!(
                        tx_hash = %tx_hash,
                        success = outcome.success,
                        block_number = ?outcome.block_number,
                        event = "transaction_confirmed"
                    );
                    return Ok(Some(outcome));
                }
                Ok(None) => debug!(tx_hash = %tx_hash, event = "transaction_pending"),
                Err(e) if e.is_transient() => {
                    warn!(tx_hash = %tx_hash, error = %e, event = "receipt_poll_failed");
                }
                Err(e) => return Err(e),
            }

            let remaining = deadline.remaining(clock);
            if remaining.is_zero() {
                warn!(
                    tx_hash = %tx_hash,
                    timeout_secs = config.timeout.as_secs(),
                    event = "confirmation_timeout"
                );
                return Ok(None);
            }
            clock.sleep(interval.min(remaining)).await;
        }
    }
    .instrument(span)
    .await
}

async fn confirmed_outcome<P: BlockchainProvider + ?Sized>(
    provider: &P,
    tx_hash: TxHash,
    required_confirmations: u64,
) -> Result<Option<TransactionOutcome>> {
    let Some(outcome) = provider.get_transaction_receipt(tx_hash).await? else {
        return Ok(None);
    };

    if !outcome.success || required_confirmations <= 1 {
        return Ok(Some(outcome));
    }

    let Some(mined_at) = outcome.block_number else {
        return Ok(None);
    };
    let head = provider.get_block_number().await?;
    let depth = head.saturating_sub(mined_at) + 1;

    if depth >= required_confirmations {
        Ok(Some(outcome))
    } else {
        debug!(
            tx_hash = %tx_hash,
            depth = depth,
            required_confirmations = required_confirmations,
            event = "awaiting_confirmations"
        );
        Ok(None)
    }
}

/// Reads the `MessageSent` message out of a confirmed burn on `source`.
///
/// The event must come from the chain's own MessageTransmitter and decode as
/// a v1 burn originating from `source`'s domain.
pub async fn extract_burn_receipt<P>(
    provider: &P,
    source: &ChainDescriptor,
    tx_hash: TxHash,
) -> Result<BurnReceipt>
where
    P: BlockchainProvider + ?Sized,
{
    let span = spans::get_message_sent_event(tx_hash, &source.chain);

    async {
        let outcome = provider
            .get_transaction_receipt(tx_hash)
            .await?
            .ok_or_else(|| {
                spans::record_error_with_context(
                    "TransactionNotFound",
                    "Transaction receipt not found",
                    Some("Not mined yet, or the RPC node does not have it"),
                );
                error!(tx_hash = %tx_hash, event = "transaction_not_found");
                BridgeError::TransactionFailed {
                    reason: format!("burn transaction {tx_hash} not found on {}", source.chain),
                }
            })?;

        if !outcome.success {
            return Err(BridgeError::BurnFailed {
                reason: format!("burn transaction {tx_hash} reverted"),
            });
        }

        let transmitter = MessageTransmitterContract::new(source.message_transmitter);
        let message = transmitter.message_sent(&outcome).ok_or_else(|| {
            spans::record_error_with_context(
                "MessageSentEventNotFound",
                "MessageSent event not found in transaction logs",
                Some(&format!(
                    "Transaction contained {} logs but none matched MessageSent from {}",
                    outcome.logs.len(),
                    source.message_transmitter
                )),
            );
            error!(
                available_logs = outcome.logs.len(),
                event = "message_sent_event_not_found"
            );
            BridgeError::MalformedMessage {
                reason: format!("no MessageSent event in transaction {tx_hash}"),
            }
        })?;

        let receipt = BurnReceipt::from_message(tx_hash, message)?;
        if receipt.source_domain != source.domain {
            return Err(BridgeError::MalformedMessage {
                reason: format!(
                    "message source domain {} does not match {}",
                    receipt.source_domain, source
                ),
            });
        }

        info!(
            message_hash = %receipt.message_hash(),
            nonce = receipt.nonce,
            message_length_bytes = receipt.message.len(),
            event = "message_sent_event_extracted"
        );

        Ok(receipt)
    }
    .instrument(span)
    .await
}
