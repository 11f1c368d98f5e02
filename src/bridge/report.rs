// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! What the bridge and status commands hand back to the caller.

use std::fmt;

use alloy_primitives::{Address, Bytes, FixedBytes, TxHash};
use serde::Serialize;

use crate::protocol::{AttestationStatus, DomainId};

/// Outcome of a completed burn → attestation → mint transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub source_chain: String,
    pub destination_chain: String,
    pub recipient: Address,
    /// Decimal USDC
    pub amount: String,
    /// Present when an allowance had to be granted first.
    pub approve_tx_hash: Option<TxHash>,
    pub burn_tx_hash: TxHash,
    pub mint_tx_hash: TxHash,
    pub message_hash: FixedBytes<32>,
    pub nonce: u64,
    pub elapsed_secs: u64,
    pub burn_tx_url: String,
    pub mint_tx_url: String,
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Bridged {} USDC from {} to {}",
            self.amount, self.source_chain, self.destination_chain
        )?;
        writeln!(f, "  recipient:    {}", self.recipient)?;
        if let Some(approve) = self.approve_tx_hash {
            writeln!(f, "  approve tx:   {approve}")?;
        }
        writeln!(f, "  burn tx:      {}", self.burn_tx_url)?;
        writeln!(f, "  mint tx:      {}", self.mint_tx_url)?;
        writeln!(f, "  message hash: {}", self.message_hash)?;
        writeln!(f, "  nonce:        {}", self.nonce)?;
        write!(f, "  elapsed:      {}s", self.elapsed_secs)
    }
}

/// Attestation state of an in-flight transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub source_chain: String,
    pub message_hash: FixedBytes<32>,
    pub status: AttestationStatus,
    /// Only known when queried by burn transaction.
    pub burn_tx_hash: Option<TxHash>,
    pub nonce: Option<u64>,
    pub destination_domain: Option<DomainId>,
    pub amount: Option<String>,
    pub attestation: Option<Bytes>,
}

impl StatusReport {
    pub fn is_complete(&self) -> bool {
        self.status == AttestationStatus::Complete && self.attestation.is_some()
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Attestation {} on {}", self.status, self.source_chain)?;
        write!(f, "  message hash: {}", self.message_hash)?;
        if let Some(tx) = self.burn_tx_hash {
            write!(f, "\n  burn tx:      {tx}")?;
        }
        if let Some(nonce) = self.nonce {
            write!(f, "\n  nonce:        {nonce}")?;
        }
        if let Some(domain) = self.destination_domain {
            write!(f, "\n  destination:  {domain}")?;
        }
        if let Some(amount) = &self.amount {
            write!(f, "\n  amount:       {amount} USDC")?;
        }
        if let Some(attestation) = &self.attestation {
            write!(f, "\n  attestation:  {attestation}")?;
        }
        Ok(())
    }
}
