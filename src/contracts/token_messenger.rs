// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! TokenMessenger contract bindings and wrapper
//!
//! The CCTP v1 TokenMessenger burns USDC on the source chain and emits the
//! cross-chain message through the local MessageTransmitter.

use alloy_primitives::{Address, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::sol;
use tracing::info;

use super::call_request;
use crate::protocol::{address_to_bytes32, DomainId};
use crate::spans;

/// The CCTP v1 TokenMessenger at a known address.
#[derive(Debug, Clone, Copy)]
pub struct TokenMessengerContract {
    address: Address,
}

impl TokenMessengerContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Create the transaction request for the `depositForBurn` function.
    ///
    /// The recipient is left-padded to `bytes32` as the contract expects.
    pub fn deposit_for_burn_transaction(
        &self,
        from_address: Address,
        recipient: Address,
        destination_domain: DomainId,
        token_address: Address,
        amount: U256,
    ) -> TransactionRequest {
        let span = spans::deposit_for_burn(
            &from_address,
            &recipient,
            destination_domain.as_u32(),
            &token_address,
            &amount,
        );
        let _guard = span.enter();

        info!(
            from_address = %from_address,
            recipient = %recipient,
            destination_domain = destination_domain.as_u32(),
            token_address = %token_address,
            amount = %amount,
            contract_address = %self.address,
            event = "deposit_for_burn_transaction_created"
        );

        call_request(
            self.address,
            &TokenMessenger::depositForBurnCall {
                amount,
                destinationDomain: destination_domain.as_u32(),
                mintRecipient: address_to_bytes32(recipient),
                burnToken: token_address,
            },
        )
        .from(from_address)
    }
}

sol!(
    #[allow(missing_docs)]
    contract TokenMessenger {
        event DepositForBurn(
            uint64 indexed nonce,
            address indexed burnToken,
            uint256 amount,
            address indexed depositor,
            bytes32 mintRecipient,
            uint32 destinationDomain,
            bytes32 destinationTokenMessenger,
            bytes32 destinationCaller
        );

        function depositForBurn(
            uint256 amount,
            uint32 destinationDomain,
            bytes32 mintRecipient,
            address burnToken
        ) external returns (uint64 nonce);
    }
);
