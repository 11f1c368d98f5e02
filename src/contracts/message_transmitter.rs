// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! MessageTransmitter contract bindings
//!
//! Emits `MessageSent` on the source chain and verifies attested messages via
//! `receiveMessage` on the destination chain.

use alloy_primitives::{Address, Bytes};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use tracing::info;

use super::call_request;
use crate::receipt::TransactionOutcome;

use MessageTransmitter::MessageSent;

#[derive(Debug, Clone, Copy)]
pub struct MessageTransmitterContract {
    address: Address,
}

impl MessageTransmitterContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Create the `receiveMessage(message, attestation)` transaction that mints
    /// on the destination chain.
    pub fn receive_message_transaction(
        &self,
        from_address: Address,
        message: Bytes,
        attestation: Bytes,
    ) -> TransactionRequest {
        info!(
            from_address = %from_address,
            message_length_bytes = message.len(),
            attestation_length_bytes = attestation.len(),
            contract_address = %self.address,
            event = "receive_message_transaction_created"
        );

        call_request(
            self.address,
            &MessageTransmitter::receiveMessageCall {
                message,
                attestation,
            },
        )
        .from(from_address)
    }

    /// The message bytes of the first `MessageSent` this contract emitted in
    /// `outcome`.
    pub fn message_sent(&self, outcome: &TransactionOutcome) -> Option<Bytes> {
        outcome
            .decode_first::<MessageSent>(Some(self.address))
            .map(|event| event.message)
    }
}

sol!(
    #[allow(missing_docs)]
    contract MessageTransmitter {
        event MessageSent(bytes message);

        event MessageReceived(
            address indexed caller,
            uint32 sourceDomain,
            uint64 indexed nonce,
            bytes32 sender,
            bytes messageBody
        );

        function receiveMessage(bytes message, bytes attestation) external returns (bool success);
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{call_selector, call_target};
    use alloy_primitives::{address, hex, keccak256, Log, LogData, TxHash};
    use alloy_sol_types::{SolCall, SolEvent};

    const TRANSMITTER: Address = address!("7865fafc2db2093669d92c0f33aeef291086befd");

    #[test]
    fn test_message_sent_topic() {
        assert_eq!(MessageSent::SIGNATURE_HASH, keccak256(b"MessageSent(bytes)"));
    }

    #[test]
    fn test_receive_message_selector() {
        assert_eq!(
            hex::encode(MessageTransmitter::receiveMessageCall::SELECTOR),
            "57ecfd28"
        );
    }

    #[test]
    fn test_receive_message_transaction() {
        let sender = address!("1111111111111111111111111111111111111111");
        let tx = MessageTransmitterContract::new(TRANSMITTER).receive_message_transaction(
            sender,
            Bytes::from_static(b"message"),
            Bytes::from_static(b"signature"),
        );

        assert_eq!(call_target(&tx), Some(TRANSMITTER));
        assert_eq!(
            call_selector(&tx),
            Some(MessageTransmitter::receiveMessageCall::SELECTOR)
        );
        let call =
            MessageTransmitter::receiveMessageCall::abi_decode(tx.input.input().unwrap()).unwrap();
        assert_eq!(call.message.as_ref(), b"message");
        assert_eq!(call.attestation.as_ref(), b"signature");
    }

    #[test]
    fn test_message_sent_extraction() {
        let event = MessageSent {
            message: Bytes::from_static(b"burn message"),
        };
        let outcome = TransactionOutcome {
            tx_hash: TxHash::ZERO,
            success: true,
            block_number: Some(1),
            logs: vec![Log {
                address: TRANSMITTER,
                data: LogData::new_unchecked(
                    vec![MessageSent::SIGNATURE_HASH],
                    event.encode_data().into(),
                ),
            }],
        };

        let contract = MessageTransmitterContract::new(TRANSMITTER);
        assert_eq!(
            contract.message_sent(&outcome).unwrap().as_ref(),
            b"burn message"
        );

        let elsewhere = MessageTransmitterContract::new(Address::ZERO);
        assert!(elsewhere.message_sent(&outcome).is_none());
    }
}
