// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Instant;

use alloy_primitives::{Address, FixedBytes, TxHash, U256};
use bon::Builder;
use tracing::{debug, error, info, Instrument};

use super::config::PollingConfig;
use super::params::{parse_recipient, TransferRequest};
use super::poller::AttestationPoller;
use super::receipts::{extract_burn_receipt, wait_for_confirmation};
use super::report::TransferReport;
use crate::amount::UsdcAmount;
use crate::chain::ChainDescriptor;
use crate::contracts::erc20::Erc20Contract;
use crate::contracts::message_transmitter::MessageTransmitterContract;
use crate::contracts::token_messenger::TokenMessengerContract;
use crate::error::{BridgeError, Result, Step};
use crate::protocol::{Attestation, BurnReceipt};
use crate::spans;
use crate::traits::{AttestationProvider, BlockchainProvider, Clock};

/// CCTP v1 transfer between two chains of the same network.
///
/// Runs burn → attestation → mint strictly in that order. Once the burn is
/// confirmed, every failure is returned as [`BridgeError::Incomplete`] so the
/// caller can resume with [`CctpBridge::resume`] instead of burning again.
///
/// # Example
///
/// ```rust,no_run
/// use alloy_chains::NamedChain;
/// use alloy_signer_local::PrivateKeySigner;
/// use usdc_cctp::providers::{signing_provider, IrisAttestationProvider, TokioClock};
/// use usdc_cctp::{CctpBridge, ChainDescriptor, ProviderConfig, TransferRequest};
///
/// # async fn example(signer: PrivateKeySigner) -> usdc_cctp::Result<()> {
/// let source = ChainDescriptor::for_chain(NamedChain::BaseSepolia, None)?;
/// let destination = ChainDescriptor::for_chain(NamedChain::Sepolia, None)?;
///
/// let bridge = CctpBridge::builder()
///     .source_provider(signing_provider(
///         source.rpc_url.clone(),
///         signer.clone(),
///         ProviderConfig::default(),
///     ))
///     .destination_provider(signing_provider(
///         destination.rpc_url.clone(),
///         signer.clone(),
///         ProviderConfig::default(),
///     ))
///     .attestation_provider(IrisAttestationProvider::for_network(source.network()))
///     .clock(TokioClock)
///     .source(source)
///     .destination(destination)
///     .build();
///
/// let request = TransferRequest::builder()
///     .sender(signer.address())
///     .recipient("0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d")
///     .amount("10.00".parse()?)
///     .build();
///
/// let report = bridge.transfer(&request).await?;
/// println!("{report}");
/// # Ok(())
/// # }
/// ```
#[derive(Builder)]
pub struct CctpBridge<SP, DP, A, C> {
    source: ChainDescriptor,
    destination: ChainDescriptor,
    source_provider: SP,
    destination_provider: DP,
    attestation_provider: A,
    clock: C,
    /// Defaults to [`PollingConfig::for_chain`] of the source.
    polling: Option<PollingConfig>,
}

impl<SP, DP, A, C> CctpBridge<SP, DP, A, C>
where
    SP: BlockchainProvider,
    DP: BlockchainProvider,
    A: AttestationProvider,
    C: Clock,
{
    pub fn source(&self) -> &ChainDescriptor {
        &self.source
    }

    pub fn destination(&self) -> &ChainDescriptor {
        &self.destination
    }

    pub fn polling_config(&self) -> PollingConfig {
        self.polling
            .unwrap_or_else(|| PollingConfig::for_chain(&self.source))
    }

    /// Burns, waits for the attestation and mints.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<TransferReport> {
        let amount = request.amount().base_units();
        let span = spans::transfer(
            &self.source.chain,
            &self.destination.chain,
            request.recipient(),
            &amount,
        );

        async {
            let result = self.run_transfer(request).await;
            if let Err(e) = &result {
                spans::record_error(e);
                error!(error = %e, step = ?e.step(), event = "transfer_failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Finishes a transfer whose burn is already confirmed: extracts the
    /// message, waits for its attestation and mints.
    pub async fn resume(&self, sender: Address, burn_tx_hash: TxHash) -> Result<TransferReport> {
        self.check_route()?;
        self.polling_config().validate()?;

        let started = self.clock.now();
        info!(burn_tx_hash = %burn_tx_hash, event = "transfer_resumed");

        let (receipt, mint_tx_hash) = self.finish(sender, burn_tx_hash).await.inspect_err(|e| {
            error!(error = %e, step = ?e.step(), event = "resume_failed");
        })?;

        Ok(self.report(
            receipt.mint_recipient,
            receipt.amount,
            None,
            &receipt,
            mint_tx_hash,
            started,
        ))
    }

    async fn run_transfer(&self, request: &TransferRequest) -> Result<TransferReport> {
        let started = self.clock.now();
        let recipient = self.validate(request).await?;
        let sender = request.sender();
        let amount = request.amount().base_units();

        let approve_tx_hash = self.approve_if_needed(sender, amount).await?;
        let burn_tx_hash = self.burn(sender, recipient, amount).await?;
        let (receipt, mint_tx_hash) = self.finish(sender, burn_tx_hash).await?;

        let report = self.report(
            recipient,
            amount,
            approve_tx_hash,
            &receipt,
            mint_tx_hash,
            started,
        );
        info!(
            burn_tx_hash = %report.burn_tx_hash,
            mint_tx_hash = %report.mint_tx_hash,
            elapsed_secs = report.elapsed_secs,
            event = "transfer_complete"
        );
        Ok(report)
    }

    /// Steps after a confirmed burn. Errors carry the burn hash, and the
    /// message hash once it is known.
    async fn finish(&self, sender: Address, burn_tx_hash: TxHash) -> Result<(BurnReceipt, TxHash)> {
        let receipt = self
            .message_for_burn(burn_tx_hash)
            .await
            .map_err(incomplete(burn_tx_hash, None))?;
        let message_hash = receipt.message_hash();

        let attestation = self
            .wait_for_attestation(message_hash)
            .await
            .map_err(incomplete(burn_tx_hash, Some(message_hash)))?;

        let mint_tx_hash = self
            .mint(sender, &receipt, &attestation)
            .await
            .map_err(incomplete(burn_tx_hash, Some(message_hash)))?;

        Ok((receipt, mint_tx_hash))
    }

    fn check_route(&self) -> Result<()> {
        if self.source.domain == self.destination.domain {
            return Err(BridgeError::InvalidInput(format!(
                "source and destination must differ (both are {})",
                self.source.domain
            )));
        }
        if self.source.network() != self.destination.network() {
            return Err(BridgeError::InvalidInput(format!(
                "cannot bridge from {} ({}) to {} ({})",
                self.source.chain,
                self.source.network(),
                self.destination.chain,
                self.destination.network()
            )));
        }
        Ok(())
    }

    /// Checks everything that can be checked before a transaction is sent and
    /// returns the parsed recipient.
    pub async fn validate(&self, request: &TransferRequest) -> Result<Address> {
        let recipient = parse_recipient(request.recipient())?;
        let amount = request.amount().base_units();
        if amount.is_zero() {
            return Err(BridgeError::InvalidInput(
                "amount must be greater than zero".to_string(),
            ));
        }
        self.check_route()?;
        self.polling_config().validate()?;

        let balance = Erc20Contract::new(self.source.usdc, &self.source_provider)
            .balance_of(request.sender())
            .await
            .map_err(|e| e.at_step(Step::Validate))?;
        if balance < amount {
            return Err(BridgeError::InsufficientBalance {
                available: balance,
                required: amount,
            });
        }

        debug!(
            recipient = %recipient,
            amount = %amount,
            balance = %balance,
            event = "transfer_validated"
        );
        Ok(recipient)
    }

    /// Grants the source TokenMessenger an allowance of `amount` when the
    /// current one falls short.
    pub async fn approve_if_needed(&self, owner: Address, amount: U256) -> Result<Option<TxHash>> {
        let usdc = Erc20Contract::new(self.source.usdc, &self.source_provider);
        let spender = self.source.token_messenger;

        let allowance = usdc
            .allowance(owner, spender)
            .await
            .map_err(|e| e.at_step(Step::Approve))?;
        if allowance >= amount {
            debug!(allowance = %allowance, event = "allowance_sufficient");
            return Ok(None);
        }

        let span = spans::approve(&owner, &spender, &amount, &self.source.chain);
        async {
            let tx = usdc.approve_transaction(owner, spender, amount);
            let tx_hash = self
                .source_provider
                .send_transaction(tx)
                .await
                .map_err(|e| BridgeError::BurnFailed {
                    reason: format!("approval was not submitted: {e}"),
                })?;

            match self.confirm_on_source(tx_hash).await {
                Ok(true) => {
                    info!(tx_hash = %tx_hash, event = "approval_confirmed");
                    Ok(Some(tx_hash))
                }
                Ok(false) => Err(BridgeError::BurnFailed {
                    reason: format!("approval {tx_hash} reverted"),
                }),
                Err(reason) => Err(BridgeError::BurnFailed {
                    reason: format!("approval {tx_hash} {reason}"),
                }),
            }
        }
        .instrument(span)
        .await
    }

    /// Submits `depositForBurn` and waits for it to confirm.
    ///
    /// A burn that was broadcast but not confirmed in time is returned as
    /// [`BridgeError::Incomplete`] since it may still land.
    pub async fn burn(&self, sender: Address, recipient: Address, amount: U256) -> Result<TxHash> {
        let tx = TokenMessengerContract::new(self.source.token_messenger)
            .deposit_for_burn_transaction(
                sender,
                recipient,
                self.destination.domain,
                self.source.usdc,
                amount,
            );

        let tx_hash = self
            .source_provider
            .send_transaction(tx)
            .await
            .map_err(|e| BridgeError::BurnFailed {
                reason: format!("burn was not submitted: {e}"),
            })?;
        info!(
            tx_hash = %tx_hash,
            explorer = %self.source.tx_url(tx_hash),
            event = "burn_submitted"
        );

        match self.confirm_on_source(tx_hash).await {
            Ok(true) => {
                info!(tx_hash = %tx_hash, event = "burn_confirmed");
                Ok(tx_hash)
            }
            Ok(false) => Err(BridgeError::BurnFailed {
                reason: format!("burn transaction {tx_hash} reverted"),
            }),
            Err(reason) => Err(incomplete(tx_hash, None)(BridgeError::BurnFailed {
                reason: format!("burn transaction {tx_hash} {reason}"),
            })),
        }
    }

    /// The burn message emitted by `burn_tx_hash`, checked against this route.
    pub async fn message_for_burn(&self, burn_tx_hash: TxHash) -> Result<BurnReceipt> {
        let receipt = extract_burn_receipt(&self.source_provider, &self.source, burn_tx_hash)
            .await
            .map_err(|e| e.at_step(Step::ExtractMessage))?;

        if receipt.destination_domain != self.destination.domain {
            return Err(BridgeError::MalformedMessage {
                reason: format!(
                    "message is destined for {}, not {}",
                    receipt.destination_domain, self.destination
                ),
            });
        }
        Ok(receipt)
    }

    pub async fn wait_for_attestation(&self, message_hash: FixedBytes<32>) -> Result<Attestation> {
        AttestationPoller::new(&self.attestation_provider, &self.clock, self.polling_config())
            .wait_for_attestation(message_hash, &self.source.chain)
            .await
            .map_err(|e| e.at_step(Step::Attestation))
    }

    /// Submits `receiveMessage` with the original message bytes.
    pub async fn mint(
        &self,
        sender: Address,
        receipt: &BurnReceipt,
        attestation: &Attestation,
    ) -> Result<TxHash> {
        let message_hash = receipt.message_hash();
        let span = spans::receive_message(
            &message_hash,
            &self.destination.chain,
            attestation.signature.len(),
        );

        async {
            let mint_failed = |reason: String| BridgeError::MintFailed {
                reason,
                message_hash,
            };

            let tx = MessageTransmitterContract::new(self.destination.message_transmitter)
                .receive_message_transaction(
                    sender,
                    receipt.message.clone(),
                    attestation.signature.clone(),
                );

            let tx_hash = self
                .destination_provider
                .send_transaction(tx)
                .await
                .map_err(|e| mint_failed(format!("mint was not submitted: {e}")))?;
            info!(
                tx_hash = %tx_hash,
                explorer = %self.destination.tx_url(tx_hash),
                event = "mint_submitted"
            );

            let confirmation = wait_for_confirmation(
                &self.destination_provider,
                &self.clock,
                &self.destination,
                tx_hash,
                &self.destination.confirmations,
            )
            .await;

            let result = match confirmation {
                Ok(Some(outcome)) if outcome.success => {
                    info!(tx_hash = %tx_hash, event = "mint_confirmed");
                    Ok(tx_hash)
                }
                Ok(Some(_)) => Err(mint_failed(format!("mint transaction {tx_hash} reverted"))),
                Ok(None) => Err(mint_failed(format!(
                    "mint transaction {tx_hash} not confirmed within {}s",
                    self.destination.confirmations.timeout.as_secs()
                ))),
                Err(e) => Err(mint_failed(format!(
                    "could not confirm mint transaction {tx_hash}: {e}"
                ))),
            };
            if let Err(e) = &result {
                spans::record_error(e);
            }
            result
        }
        .instrument(span)
        .await
    }

    /// `Ok(success)` once mined, `Err(reason)` when it could not be confirmed.
    async fn confirm_on_source(&self, tx_hash: TxHash) -> std::result::Result<bool, String> {
        let confirmation = wait_for_confirmation(
            &self.source_provider,
            &self.clock,
            &self.source,
            tx_hash,
            &self.source.confirmations,
        )
        .await;

        match confirmation {
            Ok(Some(outcome)) => Ok(outcome.success),
            Ok(None) => Err(format!(
                "not confirmed within {}s",
                self.source.confirmations.timeout.as_secs()
            )),
            Err(e) => Err(format!("could not be confirmed: {e}")),
        }
    }

    fn report(
        &self,
        recipient: Address,
        amount: U256,
        approve_tx_hash: Option<TxHash>,
        receipt: &BurnReceipt,
        mint_tx_hash: TxHash,
        started: Instant,
    ) -> TransferReport {
        TransferReport {
            source_chain: self.source.chain.to_string(),
            destination_chain: self.destination.chain.to_string(),
            recipient,
            amount: UsdcAmount::from_base_units(amount).to_decimal_string(),
            approve_tx_hash,
            burn_tx_hash: receipt.tx_hash,
            mint_tx_hash,
            message_hash: receipt.message_hash(),
            nonce: receipt.nonce,
            elapsed_secs: self.clock.now().saturating_duration_since(started).as_secs(),
            burn_tx_url: self.source.tx_url(receipt.tx_hash),
            mint_tx_url: self.destination.tx_url(mint_tx_hash),
        }
    }
}

/// Wraps a failure after the burn with the hashes needed to resume.
fn incomplete(
    burn_tx_hash: TxHash,
    message_hash: Option<FixedBytes<32>>,
) -> impl FnOnce(BridgeError) -> BridgeError {
    move |source| BridgeError::Incomplete {
        burn_tx_hash,
        message_hash,
        source: Box::new(source),
    }
}
