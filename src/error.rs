// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use alloy_chains::NamedChain;
use alloy_primitives::{FixedBytes, TxHash, U256};
use serde::Serialize;
use thiserror::Error;

/// The step of a command an error was raised in.
///
/// Every error that reaches the user names one of these, so a failed bridge
/// can be told apart from a failed balance lookup at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Configure,
    Validate,
    Approve,
    Burn,
    ExtractMessage,
    Attestation,
    Mint,
    Balance,
    Send,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configure => "configure",
            Self::Validate => "validate",
            Self::Approve => "approve",
            Self::Burn => "burn",
            Self::ExtractMessage => "extract message",
            Self::Attestation => "attestation",
            Self::Mint => "mint",
            Self::Balance => "balance",
            Self::Send => "send",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient balance: {available} available, {required} required (base units)")]
    InsufficientBalance { available: U256, required: U256 },

    #[error("Chain not supported: {0}")]
    UnsupportedChain(NamedChain),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Burn failed: {reason}")]
    BurnFailed { reason: String },

    #[error("Malformed CCTP message: {reason}")]
    MalformedMessage { reason: String },

    #[error("Timed out after {elapsed_secs}s waiting for attestation of {message_hash}")]
    AttestationTimeout {
        message_hash: FixedBytes<32>,
        elapsed_secs: u64,
    },

    #[error("Attestation failed: {reason}")]
    AttestationFailed { reason: String },

    #[error("Attestation not found (will retry)")]
    AttestationNotFound,

    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    #[error("Attestation service returned HTTP {status}")]
    AttestationService { status: u16 },

    #[error("Mint failed for message {message_hash}: {reason}")]
    MintFailed {
        reason: String,
        message_hash: FixedBytes<32>,
    },

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{step} step failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: Box<BridgeError>,
    },

    #[error("transfer incomplete after burn {burn_tx_hash}: {source}")]
    Incomplete {
        burn_tx_hash: TxHash,
        message_hash: Option<FixedBytes<32>>,
        #[source]
        source: Box<BridgeError>,
    },
}

impl BridgeError {
    /// Returns the innermost error, looking through step and checkpoint wrappers.
    pub fn root(&self) -> &BridgeError {
        match self {
            Self::Step { source, .. } | Self::Incomplete { source, .. } => source.root(),
            other => other,
        }
    }

    /// Names the step this error was raised in, when known.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Step { step, .. } => Some(*step),
            Self::Incomplete { source, .. } => source.step(),
            Self::InvalidInput(_) | Self::InsufficientBalance { .. } => Some(Step::Validate),
            Self::UnsupportedChain(_) | Self::InvalidConfig(_) => Some(Step::Configure),
            Self::BurnFailed { .. } => Some(Step::Burn),
            Self::MalformedMessage { .. } => Some(Step::ExtractMessage),
            Self::AttestationTimeout { .. } | Self::AttestationFailed { .. } => {
                Some(Step::Attestation)
            }
            Self::MintFailed { .. } => Some(Step::Mint),
            _ => None,
        }
    }

    /// Tags an error with the step it surfaced in, unless it already names one.
    pub fn at_step(self, step: Step) -> Self {
        if self.step().is_some() {
            self
        } else {
            Self::Step {
                step,
                source: Box::new(self),
            }
        }
    }

    /// Whether the failure is worth retrying with the same inputs.
    ///
    /// Only the attestation poll acts on this; transactions are never resent.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_)
            | Self::Provider(_)
            | Self::AttestationNotFound
            | Self::RateLimitExceeded { .. } => true,
            Self::AttestationService { status } => *status >= 500,
            Self::Rpc(e) => matches!(e, alloy_json_rpc::RpcError::Transport(_)),
            Self::Step { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    /// The burn transaction and message hash to resume from, if the burn
    /// already happened.
    pub fn resume_point(&self) -> Option<(TxHash, Option<FixedBytes<32>>)> {
        match self {
            Self::Incomplete {
                burn_tx_hash,
                message_hash,
                ..
            } => Some((*burn_tx_hash, *message_hash)),
            Self::Step { source, .. } => source.resume_point(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
