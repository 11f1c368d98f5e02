// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract bindings
//!
//! Inline `sol!` interfaces for the CCTP v1 contracts and ERC20, with thin
//! wrappers that produce [`TransactionRequest`]s. Nothing here holds a
//! provider; reads go through [`crate::traits::BlockchainProvider`].

use alloy_primitives::{Address, TxKind};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;

pub mod erc20;
pub mod message_transmitter;
pub mod token_messenger;

/// A call to `to` carrying the ABI-encoded `call` as input.
pub fn call_request<C: SolCall>(to: Address, call: &C) -> TransactionRequest {
    TransactionRequest::default()
        .to(to)
        .input(TransactionInput::new(call.abi_encode().into()))
}

/// The contract a request calls, if any.
pub fn call_target(tx: &TransactionRequest) -> Option<Address> {
    match tx.to {
        Some(TxKind::Call(address)) => Some(address),
        _ => None,
    }
}

/// The four-byte function selector of a request's input.
pub fn call_selector(tx: &TransactionRequest) -> Option<[u8; 4]> {
    tx.input
        .input()
        .and_then(|input| input.get(..4))
        .and_then(|selector| selector.try_into().ok())
}
