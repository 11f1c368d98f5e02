// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # usdc-cctp
//!
//! USDC balance lookups, same-chain transfers and cross-chain transfers over
//! Circle's Cross-Chain Transfer Protocol (CCTP v1).
//!
//! A cross-chain transfer burns USDC on the source chain, waits for Circle's
//! attestation of the emitted message and mints on the destination chain.
//! Once the burn is confirmed the transfer can always be finished later from
//! the burn transaction hash, see [`CctpBridge::resume`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use alloy_chains::NamedChain;
//! use alloy_signer_local::PrivateKeySigner;
//! use usdc_cctp::providers::{signing_provider, IrisAttestationProvider, TokioClock};
//! use usdc_cctp::{CctpBridge, ChainDescriptor, ProviderConfig, TransferRequest};
//!
//! # async fn example(signer: PrivateKeySigner) -> usdc_cctp::Result<()> {
//! let source = ChainDescriptor::for_chain(NamedChain::BaseSepolia, None)?;
//! let destination = ChainDescriptor::for_chain(NamedChain::Sepolia, None)?;
//!
//! let bridge = CctpBridge::builder()
//!     .source_provider(signing_provider(
//!         source.rpc_url.clone(),
//!         signer.clone(),
//!         ProviderConfig::default(),
//!     ))
//!     .destination_provider(signing_provider(
//!         destination.rpc_url.clone(),
//!         signer.clone(),
//!         ProviderConfig::default(),
//!     ))
//!     .attestation_provider(IrisAttestationProvider::for_network(source.network()))
//!     .clock(TokioClock)
//!     .source(source)
//!     .destination(destination)
//!     .build();
//!
//! let request = TransferRequest::builder()
//!     .sender(signer.address())
//!     .recipient("0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d")
//!     .amount("10.00".parse()?)
//!     .build();
//!
//! let report = bridge.transfer(&request).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Checking on a transfer
//!
//! ```rust,no_run
//! use alloy_chains::NamedChain;
//! use usdc_cctp::providers::{http_provider, IrisAttestationProvider, TokioClock};
//! use usdc_cctp::{ChainDescriptor, StatusChecker, StatusQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ChainDescriptor::for_chain(NamedChain::BaseSepolia, None)?;
//! let checker = StatusChecker::builder()
//!     .provider(http_provider(source.rpc_url.clone()))
//!     .attestation_provider(IrisAttestationProvider::for_network(source.network()))
//!     .clock(TokioClock)
//!     .source(source)
//!     .build();
//!
//! let burn_tx_hash = "0x0000000000000000000000000000000000000000000000000000000000000001";
//! let report = checker
//!     .check(StatusQuery::BurnTransaction(burn_tx_hash.parse()?))
//!     .await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Public API
//!
//! - [`UsdcClient`] - balance and same-chain transfer on one chain
//! - [`CctpBridge`] - burn → attestation → mint, and resuming after the burn
//! - [`StatusChecker`] - read-only attestation lookups
//! - [`ChainDescriptor`] and [`SupportedChain`] - the static chain table
//! - [`BridgeError`] and [`Result`] - error types naming the failing [`Step`]
//! - [`traits`], [`providers`] and [`testing`] - the I/O seams, their
//!   production implementations and in-memory fakes

mod amount;
mod bridge;
mod chain;
pub mod config;
pub mod contracts;
mod error;
pub mod protocol;
mod provider;
pub mod providers;
mod receipt;
pub mod testing;
pub mod traits;
mod usdc;

pub use amount::{format_base_units, UsdcAmount, USDC_DECIMALS};
pub use bridge::{
    extract_burn_receipt, parse_recipient, wait_for_confirmation, AttestationPoller, CctpBridge,
    PollingConfig, StatusChecker, StatusQuery, StatusReport, TransferReport, TransferRequest,
    ATTESTATION_TIMEOUT_HEADROOM, DEFAULT_POLL_INTERVAL, MAX_ATTESTATION_TIMEOUT,
    MIN_ATTESTATION_TIMEOUT,
};
pub use chain::{
    addresses, CctpChain, ChainDescriptor, ConfirmationConfig, Network, SupportedChain,
    CHAIN_CONFIRMATION_CONFIG, DEFAULT_CONFIRMATION_TIMEOUT, IRIS_API, IRIS_API_SANDBOX,
};
pub use config::Settings;
pub use error::{BridgeError, Result, Step};
pub use protocol::{
    Attestation, AttestationResponse, AttestationStatus, BurnReceipt, DomainId,
};
pub use provider::ProviderConfig;
pub use receipt::TransactionOutcome;
pub use usdc::{BalanceReport, SendReport, UsdcClient};

// Public module for advanced users who need custom instrumentation
pub mod spans;
