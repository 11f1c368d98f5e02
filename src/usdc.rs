// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Single-chain USDC operations: balance lookup and plain transfers.

use std::fmt;

use alloy_primitives::{Address, TxHash, U256};
use bon::Builder;
use serde::Serialize;
use tracing::{error, info, Instrument};

use crate::amount::{format_base_units, UsdcAmount};
use crate::bridge::{parse_recipient, wait_for_confirmation};
use crate::chain::ChainDescriptor;
use crate::contracts::erc20::Erc20Contract;
use crate::error::{BridgeError, Result, Step};
use crate::spans;
use crate::traits::{BlockchainProvider, Clock};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    pub chain: String,
    pub owner: Address,
    pub token: Address,
    /// Base units, as a decimal integer string.
    pub raw: String,
    pub decimals: u8,
    pub formatted: String,
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} USDC on {} ({} base units)",
            self.formatted, self.chain, self.raw
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReport {
    pub chain: String,
    pub from: Address,
    pub to: Address,
    pub amount: String,
    pub tx_hash: TxHash,
    pub explorer_url: String,
}

impl fmt::Display for SendReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sent {} USDC to {} on {}", self.amount, self.to, self.chain)?;
        write!(f, "  tx: {}", self.explorer_url)
    }
}

/// USDC on one chain.
#[derive(Builder)]
pub struct UsdcClient<P, C> {
    chain: ChainDescriptor,
    provider: P,
    clock: C,
}

impl<P: BlockchainProvider, C: Clock> UsdcClient<P, C> {
    pub fn chain(&self) -> &ChainDescriptor {
        &self.chain
    }

    fn token(&self) -> Erc20Contract<'_, P> {
        Erc20Contract::new(self.chain.usdc, &self.provider)
    }

    /// `balanceOf(owner)` formatted with the token's own `decimals()`.
    pub async fn balance(&self, owner: Address) -> Result<BalanceReport> {
        let span = spans::balance(&owner, &self.chain.chain);
        async {
            let token = self.token();
            let raw = token.balance_of(owner).await?;
            let decimals = token.decimals().await?;

            Ok::<_, BridgeError>(BalanceReport {
                chain: self.chain.chain.to_string(),
                owner,
                token: self.chain.usdc,
                raw: raw.to_string(),
                decimals,
                formatted: format_base_units(raw, decimals),
            })
        }
        .instrument(span)
        .await
        .map_err(|e| e.at_step(Step::Balance))
    }

    /// Submits `transfer(to, amount)` and waits for it to confirm.
    pub async fn send(&self, from: Address, to: &str, amount: UsdcAmount) -> Result<SendReport> {
        let units = amount.base_units();
        let span = spans::send(&from, to, &units, &self.chain.chain);

        async {
            let result = self.run_send(from, to, units).await;
            if let Err(e) = &result {
                spans::record_error(e);
                error!(error = %e, event = "send_failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_send(&self, from: Address, to: &str, amount: U256) -> Result<SendReport> {
        let to = parse_recipient(to)?;
        if amount.is_zero() {
            return Err(BridgeError::InvalidInput(
                "amount must be greater than zero".to_string(),
            ));
        }

        let token = self.token();
        let balance = token
            .balance_of(from)
            .await
            .map_err(|e| e.at_step(Step::Validate))?;
        if balance < amount {
            return Err(BridgeError::InsufficientBalance {
                available: balance,
                required: amount,
            });
        }

        let tx = token.transfer_transaction(from, to, amount);
        let tx_hash = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| e.at_step(Step::Send))?;
        info!(tx_hash = %tx_hash, event = "transfer_submitted");

        let outcome = wait_for_confirmation(
            &self.provider,
            &self.clock,
            &self.chain,
            tx_hash,
            &self.chain.confirmations,
        )
        .await
        .map_err(|e| e.at_step(Step::Send))?;

        match outcome {
            Some(outcome) if outcome.success => {
                info!(tx_hash = %tx_hash, event = "transfer_confirmed");
                Ok(SendReport {
                    chain: self.chain.chain.to_string(),
                    from,
                    to,
                    amount: UsdcAmount::from_base_units(amount).to_decimal_string(),
                    tx_hash,
                    explorer_url: self.chain.tx_url(tx_hash),
                })
            }
            Some(_) => Err(BridgeError::TransactionFailed {
                reason: format!("transfer {tx_hash} reverted"),
            }
            .at_step(Step::Send)),
            None => Err(BridgeError::TransactionFailed {
                reason: format!(
                    "transfer {tx_hash} not confirmed within {}s",
                    self.chain.confirmations.timeout.as_secs()
                ),
            }
            .at_step(Step::Send)),
        }
    }
}
