// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain configuration and contract addresses
//!
//! This module contains the static per-chain table (CCTP contracts, USDC,
//! default RPC endpoints, explorers, confirmation policy) and the command line
//! chain names that resolve into it.

pub mod addresses;
mod config;
mod descriptor;

pub use config::{
    CctpChain, ConfirmationConfig, CHAIN_CONFIRMATION_CONFIG, DEFAULT_CONFIRMATION_TIMEOUT,
};
pub use descriptor::{ChainDescriptor, Network, SupportedChain, IRIS_API, IRIS_API_SANDBOX};
