// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network-agnostic view of a mined transaction.
//!
//! Providers hand back a [`TransactionOutcome`] rather than an RPC receipt so
//! the bridge logic (and its fakes) only deal with status, block and logs.

use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, Log, TxHash, B256};
use alloy_rpc_types::TransactionReceipt;
use alloy_sol_types::SolEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub tx_hash: TxHash,
    /// `false` when the transaction reverted.
    pub success: bool,
    pub block_number: Option<u64>,
    pub logs: Vec<Log>,
}

impl TransactionOutcome {
    /// Logs emitted by `emitter` whose first topic is `topic`.
    pub fn logs_with_topic(
        &self,
        emitter: Option<Address>,
        topic: B256,
    ) -> impl Iterator<Item = &Log> {
        self.logs.iter().filter(move |log| {
            emitter.is_none_or(|address| log.address == address)
                && log.topics().first() == Some(&topic)
        })
    }

    /// Decodes the first log matching event `E`.
    pub fn decode_first<E: SolEvent>(&self, emitter: Option<Address>) -> Option<E> {
        self.logs_with_topic(emitter, E::SIGNATURE_HASH)
            .find_map(|log| E::decode_log_data(&log.data).ok())
    }
}

impl From<&TransactionReceipt> for TransactionOutcome {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: ReceiptResponse::transaction_hash(receipt),
            success: ReceiptResponse::status(receipt),
            block_number: ReceiptResponse::block_number(receipt),
            logs: receipt
                .inner
                .logs()
                .iter()
                .map(|log| log.inner.clone())
                .collect(),
        }
    }
}
